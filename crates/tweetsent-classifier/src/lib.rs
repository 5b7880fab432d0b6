//! tweetsent-classifier
//!
//! Scores a record's body text against a [`Lexicon`](tweetsent_lexicon::Lexicon)
//! and emits an [`OutputRecord`](tweetsent_core::types::OutputRecord) only for
//! non-neutral results. See `examples/` for a quick way to score ad-hoc text.
pub mod batch;
pub mod classify;

pub use batch::BatchClassifier;
pub use classify::{classify, score, tokens, Classifier};
