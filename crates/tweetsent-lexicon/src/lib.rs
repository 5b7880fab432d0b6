//! tweetsent-lexicon
//!
//! Word → weight lexicon loaded once from a `word<TAB>integer` resource and
//! shared read-only afterwards. See [`Lexicon::load`] for the line policy.
pub mod lexicon;

pub use lexicon::{Lexicon, LexiconError, LoadReport, MalformedLine};
pub use tweetsent_core::types::LoadPolicy;
