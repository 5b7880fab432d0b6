use std::sync::Arc;

use tracing::{debug, trace};

use tweetsent_core::traits::{RecordClassifier, WordWeights};
use tweetsent_core::types::{InputRecord, OutputRecord, Polarity, TEXT_FIELD};
use tweetsent_lexicon::Lexicon;

/// Split on single ASCII spaces. Consecutive spaces yield empty tokens, which
/// never match a lexicon word.
pub fn tokens(text: &str) -> std::str::Split<'_, char> {
    text.split(' ')
}

/// Sum of the weights of every lowercased token found in `weights`.
pub fn score<W: WordWeights + ?Sized>(text: &str, weights: &W) -> i64 {
    let lowered = text.to_lowercase();
    tokens(&lowered).filter_map(|t| weights.weight(t)).map(i64::from).sum()
}

/// Classify one record. Returns `None` when the payload has no string
/// `"text"` or when the score is exactly zero.
pub fn classify<W: WordWeights + ?Sized>(record: &InputRecord, weights: &W) -> Option<OutputRecord> {
    let Some(text) = record.body_text() else {
        if record.payload.contains_key(TEXT_FIELD) {
            debug!(track = %record.track, "record with non-string text skipped");
        } else {
            trace!(track = %record.track, "record without text skipped");
        }
        return None;
    };
    let polarity = Polarity::from_score(score(text, weights));
    let sentiment = polarity.sentiment()?;
    Some(OutputRecord { track: record.track.clone(), tweet: text.to_string(), sentiment })
}

/// Stateless classifier over a shared, already-loaded lexicon. Cloning is
/// cheap and every clone reads the same lexicon.
#[derive(Debug, Clone)]
pub struct Classifier {
    lexicon: Arc<Lexicon>,
}

impl Classifier {
    pub fn new(lexicon: Lexicon) -> Self { Self::from_shared(Arc::new(lexicon)) }

    pub fn from_shared(lexicon: Arc<Lexicon>) -> Self { Self { lexicon } }

    pub fn lexicon(&self) -> &Lexicon { &self.lexicon }

    pub fn score(&self, text: &str) -> i64 { score(text, self.lexicon.as_ref()) }

    pub fn polarity(&self, text: &str) -> Polarity { Polarity::from_score(self.score(text)) }

    pub fn classify(&self, record: &InputRecord) -> Option<OutputRecord> {
        classify(record, self.lexicon.as_ref())
    }
}

impl RecordClassifier for Classifier {
    fn classify(&self, record: &InputRecord) -> Option<OutputRecord> { Classifier::classify(self, record) }
}
