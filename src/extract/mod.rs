//! Extraction policies over the markup event stream
//!
//! Two families of consumers sit on top of the tokenizer:
//! - link extractors, which walk a listing page and collect child URLs for
//!   the next level of the hierarchy
//! - the verse extractor, which walks a chapter page and emits the body
//!   text fragments that become the persisted corpus

mod links;
mod verses;

pub use links::LinkExtractor;
pub use verses::{extract_verses, step};
