//! Sentence autocomplete over a fixed text corpus.
//!
//! A [`SentenceStore`] plus a precomputed [`SubstringIndex`] answer substring
//! containment in O(1). Queries are expanded into single-edit variants
//! (delete, insert, replace) and matched sentences are ranked so that exact
//! substring hits always outrank one-edit hits.

pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod store;
pub mod variants;

pub use corpus::{CorpusLine, normalize_line, read_corpus_dir};
pub use engine::{Engine, EngineConfig, Match, Suggestion, find_matches, rank};
pub use error::{Error, Result};
pub use index::SubstringIndex;
pub use store::{Sentence, SentenceId, SentenceStore};
