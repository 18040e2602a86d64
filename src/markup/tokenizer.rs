//! Forgiving single-pass markup tokenizer
//!
//! Produces `MarkupEvent`s lazily from an input string. The tokenizer is
//! best-effort in the way browsers are: comments, doctypes, and processing
//! instructions are consumed silently, a stray `<` that cannot start a tag
//! is plain text, and a tag left unclosed at end of input is dropped rather
//! than reported as an error. A tokenizer is single-use; create a fresh one
//! per input.

use super::{Attrs, MarkupEvent};

/// Streaming tokenizer over one markup document
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Holds the synthetic CloseTag queued by a self-closing tag
    pending: Option<MarkupEvent>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: None,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// True if `b` can follow `<` to begin markup (tag, close tag,
    /// comment/doctype, or processing instruction)
    fn is_markup_start(b: u8) -> bool {
        b.is_ascii_alphabetic() || b == b'/' || b == b'!' || b == b'?'
    }

    /// Scans a text run starting at `self.pos`, stopping before the next
    /// plausible markup start. Stray `<` characters stay inside the run so
    /// adjacent character data is coalesced into one event.
    fn scan_text(&mut self) -> &'a str {
        let bytes = self.bytes();
        let start = self.pos;
        let mut i = self.pos;

        while i < bytes.len() {
            if bytes[i] == b'<' && i + 1 < bytes.len() && Self::is_markup_start(bytes[i + 1]) {
                break;
            }
            i += 1;
        }

        self.pos = i;
        &self.input[start..i]
    }

    /// Consumes a `<!-- -->` comment, or a `<!...>` / `<?...>` declaration.
    /// An unterminated construct swallows the rest of the input.
    fn skip_declaration(&mut self) {
        let rest = &self.input[self.pos..];

        if let Some(tail) = rest.strip_prefix("<!--") {
            match tail.find("-->") {
                Some(end) => self.pos += 4 + end + 3,
                None => self.pos = self.input.len(),
            }
            return;
        }

        // <!DOCTYPE ...> or <?xml ...?>
        match rest.find('>') {
            Some(end) => self.pos += end + 1,
            None => self.pos = self.input.len(),
        }
    }

    /// Parses `</name ...>` starting at `self.pos`. Returns None for a
    /// bogus or unterminated close tag, which is skipped silently.
    fn scan_close_tag(&mut self) -> Option<MarkupEvent> {
        let bytes = self.bytes();
        let mut i = self.pos + 2;

        let name_start = i;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
            i += 1;
        }
        let name = &self.input[name_start..i];

        // Anything between the name and '>' is ignored
        while i < bytes.len() && bytes[i] != b'>' {
            i += 1;
        }

        if i >= bytes.len() {
            // Unterminated close tag at end of input
            self.pos = bytes.len();
            return None;
        }

        self.pos = i + 1;
        if name.is_empty() {
            return None;
        }

        Some(MarkupEvent::CloseTag {
            name: name.to_ascii_lowercase(),
        })
    }

    /// Parses an open tag starting at `self.pos`. Returns None if the tag
    /// is unterminated at end of input (the fragment is dropped).
    fn scan_open_tag(&mut self) -> Option<MarkupEvent> {
        let bytes = self.bytes();
        let mut i = self.pos + 1;

        let name_start = i;
        while i < bytes.len()
            && (bytes[i].is_ascii_alphanumeric()
                || bytes[i] == b'-'
                || bytes[i] == b':'
                || bytes[i] == b'_')
        {
            i += 1;
        }
        let name = self.input[name_start..i].to_ascii_lowercase();

        let mut attrs = Attrs::new();
        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            if i >= bytes.len() {
                // Unclosed tag: drop the fragment entirely
                self.pos = bytes.len();
                return None;
            }

            if bytes[i] == b'>' {
                self.pos = i + 1;
                return Some(MarkupEvent::OpenTag { name, attrs });
            }

            if bytes[i] == b'/' {
                if i + 1 < bytes.len() && bytes[i + 1] == b'>' {
                    self.pos = i + 2;
                    self.pending = Some(MarkupEvent::CloseTag { name: name.clone() });
                    return Some(MarkupEvent::OpenTag { name, attrs });
                }
                // Stray slash inside the tag
                i += 1;
                continue;
            }

            // Attribute name
            let attr_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'='
                && bytes[i] != b'>'
                && bytes[i] != b'/'
            {
                i += 1;
            }
            if i == attr_start {
                // Unparseable byte; step over it rather than loop forever
                i += 1;
                continue;
            }
            let attr_name = self.input[attr_start..i].to_ascii_lowercase();

            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            if i < bytes.len() && bytes[i] == b'=' {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }

                if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                    let quote = bytes[i];
                    let value_start = i + 1;
                    let mut j = value_start;
                    while j < bytes.len() && bytes[j] != quote {
                        j += 1;
                    }
                    if j >= bytes.len() {
                        // Unterminated quoted value: drop the whole tag
                        self.pos = bytes.len();
                        return None;
                    }
                    attrs.push(attr_name, self.input[value_start..j].to_string());
                    i = j + 1;
                } else {
                    // Unquoted value: everything up to whitespace or '>'
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    attrs.push(attr_name, self.input[value_start..i].to_string());
                }
            } else {
                // Valueless attribute
                attrs.push(attr_name, String::new());
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = MarkupEvent;

    fn next(&mut self) -> Option<MarkupEvent> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        loop {
            let bytes = self.bytes();
            if self.pos >= bytes.len() {
                return None;
            }

            let at_markup = bytes[self.pos] == b'<'
                && self.pos + 1 < bytes.len()
                && Self::is_markup_start(bytes[self.pos + 1]);

            if !at_markup {
                let text = self.scan_text();
                if !text.is_empty() {
                    return Some(MarkupEvent::Text(text.to_string()));
                }
                continue;
            }

            match bytes[self.pos + 1] {
                b'!' | b'?' => {
                    self.skip_declaration();
                    continue;
                }
                b'/' => match self.scan_close_tag() {
                    Some(event) => return Some(event),
                    None => continue,
                },
                _ => match self.scan_open_tag() {
                    Some(event) => return Some(event),
                    None => continue,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Vec<MarkupEvent> {
        Tokenizer::new(input).collect()
    }

    fn open(name: &str, attrs: &[(&str, &str)]) -> MarkupEvent {
        MarkupEvent::OpenTag {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn close(name: &str) -> MarkupEvent {
        MarkupEvent::CloseTag {
            name: name.to_string(),
        }
    }

    fn text(content: &str) -> MarkupEvent {
        MarkupEvent::Text(content.to_string())
    }

    #[test]
    fn test_simple_tag_pair_with_text() {
        assert_eq!(
            events("<p>hello</p>"),
            vec![open("p", &[]), text("hello"), close("p")]
        );
    }

    #[test]
    fn test_tag_names_lowercased() {
        assert_eq!(
            events("<DIV CLASS=\"x\"></DIV>"),
            vec![open("div", &[("class", "x")]), close("div")]
        );
    }

    #[test]
    fn test_quoted_and_unquoted_attributes() {
        assert_eq!(
            events(r#"<a href="01/1.htm" class='chap' id=v3>"#),
            vec![open(
                "a",
                &[("href", "01/1.htm"), ("class", "chap"), ("id", "v3")]
            )]
        );
    }

    #[test]
    fn test_unquoted_value_may_contain_slash() {
        assert_eq!(
            events("<a href=01/2.htm>x</a>"),
            vec![open("a", &[("href", "01/2.htm")]), text("x"), close("a")]
        );
    }

    #[test]
    fn test_valueless_attribute() {
        assert_eq!(
            events("<option selected>"),
            vec![open("option", &[("selected", "")])]
        );
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let evs = events(r#"<a class="a" class="b">"#);
        match &evs[0] {
            MarkupEvent::OpenTag { attrs, .. } => assert_eq!(attrs.get("class"), Some("b")),
            other => panic!("expected open tag, got {:?}", other),
        }
    }

    #[test]
    fn test_self_closing_emits_open_then_close() {
        assert_eq!(
            events("a<br/>b"),
            vec![text("a"), open("br", &[]), close("br"), text("b")]
        );
    }

    #[test]
    fn test_comment_is_skipped() {
        assert_eq!(
            events("a<!-- <div class=\"textBody\"> -->b"),
            vec![text("a"), text("b")]
        );
    }

    #[test]
    fn test_doctype_and_pi_are_skipped() {
        assert_eq!(
            events("<!DOCTYPE html><?xml version=\"1.0\"?><p>x</p>"),
            vec![open("p", &[]), text("x"), close("p")]
        );
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        assert_eq!(events("3 < 4 and 5 > 2"), vec![text("3 < 4 and 5 > 2")]);
    }

    #[test]
    fn test_trailing_angle_bracket_is_text() {
        assert_eq!(events("tail<"), vec![text("tail<")]);
    }

    #[test]
    fn test_unclosed_tag_at_eof_is_dropped() {
        assert_eq!(events("ok<a href=\"x"), vec![text("ok")]);
        assert_eq!(events("ok<div class"), vec![text("ok")]);
    }

    #[test]
    fn test_unterminated_comment_swallows_rest() {
        assert_eq!(events("a<!-- never closed"), vec![text("a")]);
    }

    #[test]
    fn test_bogus_close_tag_skipped() {
        assert_eq!(events("a</>b"), vec![text("a"), text("b")]);
    }

    #[test]
    fn test_close_tag_with_junk_before_bracket() {
        assert_eq!(events("</div >"), vec![close("div")]);
    }

    #[test]
    fn test_whitespace_text_preserved_verbatim() {
        assert_eq!(
            events("<p>  two  spaces  </p>"),
            vec![open("p", &[]), text("  two  spaces  "), close("p")]
        );
    }

    #[test]
    fn test_text_concatenation_equals_non_tag_content() {
        let input = "<html><body>In the <b>beginning</b>, God\ncreated</body></html>";
        let concatenated: String = Tokenizer::new(input)
            .filter_map(|e| match e {
                MarkupEvent::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(concatenated, "In the beginning, God\ncreated");
    }

    #[test]
    fn test_well_formed_pairs_never_dropped() {
        let input = r#"<div class="a"><span>x</span><p id="p1">y</p></div>"#;
        let evs = events(input);
        let opens = evs
            .iter()
            .filter(|e| matches!(e, MarkupEvent::OpenTag { .. }))
            .count();
        let closes = evs
            .iter()
            .filter(|e| matches!(e, MarkupEvent::CloseTag { .. }))
            .count();
        assert_eq!(opens, 3);
        assert_eq!(closes, 3);
    }

    #[test]
    fn test_multibyte_text_survives() {
        assert_eq!(
            events("<p>I begynnelsen skapte Gud himmelen og jorden. Ære være Gud</p>"),
            vec![
                open("p", &[]),
                text("I begynnelsen skapte Gud himmelen og jorden. Ære være Gud"),
                close("p")
            ]
        );
    }

    #[test]
    fn test_single_pass_not_restartable() {
        let mut tok = Tokenizer::new("<p>x</p>");
        assert!(tok.next().is_some());
        let _rest: Vec<_> = (&mut tok).collect();
        assert!(tok.next().is_none());
    }
}
