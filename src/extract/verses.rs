//! Verse body text extraction from chapter pages
//!
//! A chapter page interleaves verse text with navigation chrome. The body
//! regions are delimited by class attributes, so extraction is a single
//! boolean capture state driven by open tags:
//! - a tag classed `textBody` or `textHeader` enters capture (this is
//!   checked first, so a `div` with one of those classes still enters)
//! - otherwise any `div`, or any tag classed `chap`, leaves capture
//! - everything else leaves the state alone
//!
//! Text seen while capturing is emitted verbatim. This is the only place
//! body text crosses into persisted output, so no trimming or
//! normalization happens here; whitespace-only runs are markup indentation
//! and are never meaningful.

use crate::markup::MarkupEvent;

/// Advances the capture state by one event
///
/// Pure transition function: returns the next state and, for a text event
/// inside a body region, the fragment to emit.
pub fn step<'a>(capturing: bool, event: &'a MarkupEvent) -> (bool, Option<&'a str>) {
    match event {
        MarkupEvent::OpenTag { name, attrs } => {
            let class = attrs.get("class");
            if matches!(class, Some("textBody") | Some("textHeader")) {
                (true, None)
            } else if name == "div" || class == Some("chap") {
                (false, None)
            } else {
                (capturing, None)
            }
        }

        MarkupEvent::CloseTag { .. } => (capturing, None),

        MarkupEvent::Text(content) => {
            if capturing && !content.trim().is_empty() {
                (capturing, Some(content))
            } else {
                (capturing, None)
            }
        }
    }
}

/// Runs the capture state machine over a chapter page's event stream,
/// passing each body text fragment to `sink` in document order
pub fn extract_verses<I, F>(events: I, mut sink: F)
where
    I: IntoIterator<Item = MarkupEvent>,
    F: FnMut(&str),
{
    let mut capturing = false;
    for event in events {
        let (next, emission) = step(capturing, &event);
        capturing = next;
        if let Some(fragment) = emission {
            sink(fragment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Tokenizer;

    fn fragments(html: &str) -> Vec<String> {
        let mut out = Vec::new();
        extract_verses(Tokenizer::new(html), |t| out.push(t.to_string()));
        out
    }

    #[test]
    fn test_captures_inside_text_body() {
        let html = r#"
            <div class="header">Site navigation</div>
            <p class="textBody">In the beginning God created the heaven and the earth.</p>
        "#;
        assert_eq!(
            fragments(html),
            vec!["In the beginning God created the heaven and the earth."]
        );
    }

    #[test]
    fn test_text_header_also_captures() {
        let html = r#"<h2 class="textHeader">Chapter 1</h2>"#;
        assert_eq!(fragments(html), vec!["Chapter 1"]);
    }

    #[test]
    fn test_div_exits_capture() {
        let html = r#"
            <p class="textBody">verse one</p>
            <div class="footer">copyright notice</div>
        "#;
        assert_eq!(fragments(html), vec!["verse one"]);
    }

    #[test]
    fn test_chap_class_exits_capture() {
        let html = r#"
            <p class="textBody">verse one</p>
            <a class="chap" href="2.htm">2</a>
            outside text
        "#;
        assert_eq!(fragments(html), vec!["verse one"]);
    }

    #[test]
    fn test_div_classed_text_body_enters_capture() {
        // The body-class check has precedence over the div exit rule
        let html = r#"<div class="textBody">captured</div><div>not captured</div>"#;
        assert_eq!(fragments(html), vec!["captured"]);
    }

    #[test]
    fn test_nothing_captured_outside_body_regions() {
        let html = r#"
            <div class="menu"><a href="index.htm">home</a> menu text</div>
            <span>stray text</span>
        "#;
        // Initial state is not-capturing, so nothing before a body region
        // is ever emitted
        assert!(fragments(html).is_empty());
    }

    #[test]
    fn test_close_tags_do_not_change_state() {
        let html = r#"<p class="textBody">one<span>two</span>three</p>"#;
        assert_eq!(fragments(html), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_fragments_in_document_order() {
        let html = r#"
            <h2 class="textHeader">Genesis 1</h2>
            <p class="textBody">verse 1</p>
            <div class="ad">skip me</div>
            <p class="textBody">verse 2</p>
        "#;
        assert_eq!(fragments(html), vec!["Genesis 1", "verse 1", "verse 2"]);
    }

    #[test]
    fn test_whitespace_only_text_skipped() {
        let html = "<p class=\"textBody\">\r\n  \n<b>word</b>\t </p>";
        assert_eq!(fragments(html), vec!["word"]);
    }

    #[test]
    fn test_embedded_whitespace_preserved_verbatim() {
        let html = "<p class=\"textBody\">1  In the beginning </p>";
        assert_eq!(fragments(html), vec!["1  In the beginning "]);
    }

    #[test]
    fn test_step_is_pure_over_unrelated_tags() {
        let event = MarkupEvent::OpenTag {
            name: "em".to_string(),
            attrs: Default::default(),
        };
        assert_eq!(step(true, &event), (true, None));
        assert_eq!(step(false, &event), (false, None));
    }
}
