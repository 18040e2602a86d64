//! Streaming markup event source
//!
//! This module turns raw page markup into a flat sequence of structural
//! events (open tag, close tag, text) in document order. It deliberately
//! builds no DOM: the extractors downstream only need a narrow, forgiving
//! event stream, and the pages being harvested are full of markup that a
//! strict parser would reject.

mod tokenizer;

pub use tokenizer::Tokenizer;

/// One ordered attribute list for an open tag
///
/// Names are lowercased. Lookup is last-value-wins on duplicate names,
/// mirroring how an attribute dict built front-to-back behaves. A valueless
/// attribute maps to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub(crate) fn push(&mut self, name: String, value: String) {
        self.pairs.push((name, value));
    }

    /// Returns the value of `name`, preferring the last occurrence
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Attrs {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// One structural event produced by the tokenizer, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An opening tag with its attributes (also emitted for self-closing
    /// tags, immediately followed by the matching CloseTag)
    OpenTag { name: String, attrs: Attrs },

    /// A closing tag
    CloseTag { name: String },

    /// A run of character data between tags, verbatim
    Text(String),
}

/// Decodes a raw page payload as UTF-8, replacing invalid sequences
///
/// Listing and chapter pages occasionally carry latin-1-mislabeled bytes;
/// those must not abort a harvest, so decoding is lossy rather than strict.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
