//! URL classification and resolution
//!
//! Every page in the corpus hierarchy is addressed by a URL with a
//! predictable shape, so discovery works on small anchored patterns rather
//! than general link following:
//! - translation listings: `bibles/<code>/index.htm` relative to the root
//! - book pages: `<digits>/<digits>.htm` relative to a listing
//! - chapter pages: siblings of a book's `1.htm` page
//!
//! Resolution never touches scheme or host; a child URL is derived from its
//! parent either by plain concatenation or by substituting a known path
//! suffix.

use crate::UrlError;
use regex::Regex;
use std::sync::LazyLock;

/// Accepts hrefs that point at a translation listing page.
///
/// Anchored at the start only: the code group is one or more lowercase
/// letters or underscores.
static RE_TRANSLATION_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^bibles/([a-z_]+)/index\.htm").unwrap());

/// Finds the translation code anywhere inside an absolute listing URL.
static RE_TRANSLATION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bibles/([a-z_]+)/index\.htm").unwrap());

/// Accepts hrefs that point at a book page: digit sequences separated by a
/// single slash.
static RE_BOOK_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+/[0-9]+\.htm").unwrap());

/// Returns true if `href` looks like a relative translation listing link
pub fn is_translation_link(href: &str) -> bool {
    RE_TRANSLATION_LINK.is_match(href)
}

/// Returns true if `href` looks like a relative book page link
pub fn is_book_link(href: &str) -> bool {
    RE_BOOK_LINK.is_match(href)
}

/// Derives the short translation code from an absolute listing URL
///
/// The code uniquely identifies one output corpus and is derivable from the
/// listing URL alone, e.g. `https://host/bibles/kj/index.htm` -> `kj`.
pub fn translation_code(url: &str) -> Option<String> {
    RE_TRANSLATION_CODE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Resolves a relative href against a base URL by plain concatenation
///
/// Used at the root level, where discovered hrefs are relative to the site
/// entry point (which is expected to end with `/`).
pub fn resolve_by_concat(base: &str, href: &str) -> String {
    format!("{}{}", base, href)
}

/// Resolves a relative href by substituting a known suffix of the base URL
///
/// `swap_suffix("https://h/bibles/kj/index.htm", "index.htm", "01/1.htm")`
/// yields `https://h/bibles/kj/01/1.htm`. Only the trailing path segment
/// changes; a base that does not end with `suffix` is an error so callers
/// can drop the candidate instead of fabricating a bad URL.
pub fn swap_suffix(base: &str, suffix: &str, replacement: &str) -> Result<String, UrlError> {
    match base.strip_suffix(suffix) {
        Some(prefix) => Ok(format!("{}{}", prefix, replacement)),
        None => Err(UrlError::MissingSuffix {
            url: base.to_string(),
            suffix: suffix.to_string(),
        }),
    }
}
