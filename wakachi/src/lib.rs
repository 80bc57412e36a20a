//! # Wakachi
//!
//! Wakachi turns Japanese text into lexicon-resolved word tokens. It
//! normalizes the input, hands it to an external morphological
//! analyzer, repairs the analyzer's segmentation against the lexicon,
//! and disambiguates every token to one lexicon form by additive
//! feature scoring.
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! use std::sync::Arc;
//!
//! use wakachi::analyzer::{Analyzer, RawSegment};
//! use wakachi::errors::Result;
//! use wakachi::lexicon::MemoryLexicon;
//! use wakachi::Parser;
//!
//! // Stands in for a real analyzer command; splits on spaces and
//! // reads every piece back as written.
//! struct SpaceAnalyzer;
//!
//! impl Analyzer for SpaceAnalyzer {
//!     fn analyze(&self, text: &str) -> Result<Vec<RawSegment>> {
//!         Ok(text
//!             .split_whitespace()
//!             .map(|piece| RawSegment {
//!                 surface: piece.to_string(),
//!                 pos_tag: "名詞".to_string(),
//!                 dictionary_form: piece.to_string(),
//!                 reading: piece.to_string(),
//!                 ..Default::default()
//!             })
//!             .collect())
//!     }
//! }
//!
//! let lexicon_csv = "1578010,3,兎,うさぎ,kanji,0,
//! 1578010,3,うさぎ,うさぎ,kana,0,
//! 1578010,3,ウサギ,うさぎ,kana,0,search";
//!
//! let lexicon = Arc::new(MemoryLexicon::from_reader(lexicon_csv.as_bytes())?);
//! let parser = Parser::new(Box::new(SpaceAnalyzer), lexicon);
//!
//! let words = parser.parse_text("うさぎ が きた")?;
//! assert_eq!(words.len(), 3);
//!
//! let w0 = &words[0];
//! assert_eq!(w0.surface(), "うさぎ");
//! assert_eq!(w0.range_char(), 0..3);
//! assert_eq!(w0.word().map(|idx| idx.word_id), Some(1578010));
//!
//! assert!(words[1].is_oov());
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analyzer;
pub mod candidates;
pub mod common;
pub mod diagnostics;
pub mod errors;
pub mod lexicon;
pub mod normalizer;
pub mod parser;
pub mod repair;
pub mod scorer;
mod script;
pub mod token;
mod utils;
pub mod word_token;


pub use normalizer::normalize;
pub use parser::{MediaKind, Parser};
pub use word_token::WordToken;

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
