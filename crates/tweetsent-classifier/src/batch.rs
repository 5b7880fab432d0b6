use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use tweetsent_core::types::{InputRecord, OutputRecord};

use crate::classify::Classifier;

/// Classifies batches of records on a dedicated rayon pool. All workers share
/// the classifier's lexicon read-only.
pub struct BatchClassifier {
    classifier: Classifier,
    pool: ThreadPool,
}

impl BatchClassifier {
    /// `workers == 0` lets rayon pick one thread per CPU.
    pub fn new(classifier: Classifier, workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tweetsent-worker-{i}"))
            .build()?;
        Ok(Self { classifier, pool })
    }

    pub fn workers(&self) -> usize { self.pool.current_num_threads() }

    pub fn classifier(&self) -> &Classifier { &self.classifier }

    /// Outputs come back in the same relative order as their inputs.
    pub fn classify_batch(&self, records: &[InputRecord]) -> Vec<OutputRecord> {
        self.pool.install(|| {
            records
                .par_iter()
                .filter_map(|record| self.classifier.classify(record))
                .collect()
        })
    }
}
