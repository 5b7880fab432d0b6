use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, warn};

use tweetsent_classifier::BatchClassifier;
use tweetsent_core::types::InputRecord;

/// Counters for one run over an input stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub records: usize,
    pub invalid: usize,
    pub emitted: usize,
}

/// Read JSON-lines records, classify them in batches of `batch_size`, and
/// write each emitted record as one JSON line.
///
/// Blank lines are ignored and lines that don't decode as a record are logged
/// and skipped. Output order follows input order. Output is only written when
/// a batch fills up or the input ends, so a `batch_size` of 1 gives
/// record-at-a-time latency.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    classifier: &BatchClassifier,
    batch_size: usize,
) -> anyhow::Result<PipelineStats> {
    let batch_size = batch_size.max(1);
    let mut stats = PipelineStats::default();
    let mut batch = Vec::with_capacity(batch_size);

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("reading input line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<InputRecord>(&line) {
            Ok(record) => {
                stats.records += 1;
                batch.push(record);
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping unreadable input record");
                stats.invalid += 1;
                continue;
            }
        }
        if batch.len() >= batch_size {
            stats.emitted += flush(&mut batch, classifier, &mut output)?;
        }
    }
    stats.emitted += flush(&mut batch, classifier, &mut output)?;
    output.flush().context("flushing output")?;

    debug!(records = stats.records, invalid = stats.invalid, emitted = stats.emitted, "input drained");
    Ok(stats)
}

fn flush<W: Write>(batch: &mut Vec<InputRecord>, classifier: &BatchClassifier, output: &mut W) -> anyhow::Result<usize> {
    if batch.is_empty() {
        return Ok(0);
    }
    let emitted = classifier.classify_batch(batch);
    batch.clear();
    for record in &emitted {
        serde_json::to_writer(&mut *output, record).context("writing output record")?;
        output.write_all(b"\n").context("writing output record")?;
    }
    Ok(emitted.len())
}
