//! Tag extraction and graph document discovery for taglint.
//!
//! - [`extractor`]: The [`TagExtractor`](extractor::TagExtractor) contract
//! - [`comment_tags`]: `+prefix:name(args)=value` comment tag parser
//! - [`walker`]: Finds graph documents on disk and loads them in parallel

pub mod comment_tags;
pub mod extractor;
pub mod walker;
