use crate::types::{InputRecord, OutputRecord};

/// Read-only word → weight lookup. Implementations must not change after
/// construction so they can be shared across threads without locking.
pub trait WordWeights: Send + Sync {
    fn weight(&self, word: &str) -> Option<i32>;
}

pub trait RecordClassifier: Send + Sync {
    /// Zero or one output per input; never fails.
    fn classify(&self, record: &InputRecord) -> Option<OutputRecord>;
}
