//! Link extraction from listing pages
//!
//! Each level of the corpus hierarchy links to its children with a
//! different anchor shape, so the extractor is a small policy object: an
//! anchor predicate plus a resolution rule. Extraction order follows
//! document order and duplicates are kept; an empty result simply means
//! "no children at this level".

use crate::markup::{Attrs, MarkupEvent};
use crate::url::{is_book_link, is_translation_link, resolve_by_concat, swap_suffix};

/// Which level of the hierarchy this extractor discovers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    /// Root page: anchors matching `bibles/<code>/index.htm`, resolved by
    /// concatenation with the root URL
    TranslationIndex,

    /// Translation listing: anchors matching `<digits>/<digits>.htm`,
    /// resolved by swapping the listing's `index.htm` suffix
    BookIndex,

    /// Book page: anchors with `class="chap"` (any href shape), resolved by
    /// swapping the book URL's `1.htm` suffix
    ChapterLinks,
}

/// Extracts child URLs of one hierarchy level from a listing page
pub struct LinkExtractor {
    policy: Policy,
}

impl LinkExtractor {
    /// Extractor for translation listing links on the root page
    pub fn translation_index() -> Self {
        Self {
            policy: Policy::TranslationIndex,
        }
    }

    /// Extractor for book links on a translation listing page
    pub fn book_index() -> Self {
        Self {
            policy: Policy::BookIndex,
        }
    }

    /// Extractor for subsequent-chapter links on a book page
    pub fn chapter_links() -> Self {
        Self {
            policy: Policy::ChapterLinks,
        }
    }

    /// Consumes a markup event stream and returns the accepted child URLs
    /// as absolute URLs, in order of appearance
    pub fn extract<I>(&self, events: I, current_url: &str) -> Vec<String>
    where
        I: IntoIterator<Item = MarkupEvent>,
    {
        let mut urls = Vec::new();

        for event in events {
            let MarkupEvent::OpenTag { name, attrs } = event else {
                continue;
            };
            if name != "a" {
                continue;
            }
            if let Some(resolved) = self.accept(&attrs, current_url) {
                urls.push(resolved);
            }
        }

        urls
    }

    /// Applies the anchor predicate and resolution rule to one `<a>` tag
    fn accept(&self, attrs: &Attrs, current_url: &str) -> Option<String> {
        let href = attrs.get("href")?;

        match self.policy {
            Policy::TranslationIndex => {
                if !is_translation_link(href) {
                    return None;
                }
                Some(resolve_by_concat(current_url, href))
            }

            Policy::BookIndex => {
                if !is_book_link(href) {
                    return None;
                }
                self.swap_or_drop(current_url, "index.htm", href)
            }

            Policy::ChapterLinks => {
                if attrs.get("class") != Some("chap") {
                    return None;
                }
                self.swap_or_drop(current_url, "1.htm", href)
            }
        }
    }

    fn swap_or_drop(&self, current_url: &str, suffix: &str, href: &str) -> Option<String> {
        match swap_suffix(current_url, suffix, href) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                tracing::debug!("Dropping link '{}': {}", href, e);
                None
            }
        }
    }
}
