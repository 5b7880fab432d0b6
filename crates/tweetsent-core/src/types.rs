//! Domain types shared by the lexicon, the classifier and the harness.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Structured payload attached to an inbound record (the decoded post JSON).
pub type Payload = Map<String, Value>;

/// Payload key holding the body text.
pub const TEXT_FIELD: &str = "text";

/// One inbound record: a tracking keyword plus the structured payload it was
/// collected with.
///
/// - `track`: opaque tag passed through unchanged
/// - `payload`: decoded post; expected (not guaranteed) to carry `"text"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub track: String,
    #[serde(rename = "tweet", default)]
    pub payload: Payload,
}

impl InputRecord {
    pub fn new(track: impl Into<String>, payload: Payload) -> Self {
        Self { track: track.into(), payload }
    }

    /// Shorthand for a record whose payload only carries a body text.
    pub fn with_text(track: impl Into<String>, text: impl Into<String>) -> Self {
        let mut payload = Payload::new();
        payload.insert(TEXT_FIELD.to_string(), Value::String(text.into()));
        Self::new(track, payload)
    }

    /// The body text, if the payload has a string under `"text"`.
    pub fn body_text(&self) -> Option<&str> {
        self.payload.get(TEXT_FIELD).and_then(Value::as_str)
    }
}

/// Emitted polarity. Only two values exist so a neutral record cannot be
/// turned into an [`OutputRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

impl Sentiment {
    pub fn symbol(self) -> &'static str {
        match self {
            Sentiment::Positive => "+",
            Sentiment::Negative => "-",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Polarity of an aggregate score, including the neutral case that never
/// leaves the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn from_score(score: i64) -> Self {
        match score.signum() {
            1 => Polarity::Positive,
            -1 => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }

    /// Wire symbol; `"o"` is for diagnostics only.
    pub fn symbol(self) -> &'static str {
        match self {
            Polarity::Positive => "+",
            Polarity::Negative => "-",
            Polarity::Neutral => "o",
        }
    }

    /// The emittable sentiment, or `None` when neutral.
    pub fn sentiment(self) -> Option<Sentiment> {
        match self {
            Polarity::Positive => Some(Sentiment::Positive),
            Polarity::Negative => Some(Sentiment::Negative),
            Polarity::Neutral => None,
        }
    }
}

impl From<Sentiment> for Polarity {
    fn from(s: Sentiment) -> Self {
        match s {
            Sentiment::Positive => Polarity::Positive,
            Sentiment::Negative => Polarity::Negative,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One outbound tuple. Field names match the downstream declaration
/// `(track, tweet, sentiment)`; `tweet` is the original, non-lowercased text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub track: String,
    pub tweet: String,
    pub sentiment: Sentiment,
}

/// What the lexicon loader does with a line that is not `word<TAB>integer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Log the line and keep loading.
    #[default]
    Skip,
    /// Fail the whole load on the first bad line.
    Abort,
}
