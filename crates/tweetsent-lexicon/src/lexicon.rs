use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, warn};

use tweetsent_core::traits::WordWeights;
use tweetsent_core::types::LoadPolicy;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Lexicon unavailable at {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed reading lexicon line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed lexicon line {line}: {reason}")]
    Malformed { line: usize, reason: MalformedLine },
}

/// Why a lexicon line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLine {
    #[error("expected 2 tab-separated fields, found {0}")]
    FieldCount(usize),

    #[error("empty word")]
    EmptyWord,

    #[error("weight {0:?} is not an integer")]
    BadWeight(String),

    #[error("not valid UTF-8")]
    Encoding,
}

/// Counters from one load.
///
/// - `lines`: lines read, blank ones included
/// - `entries`: distinct words in the resulting lexicon
/// - `skipped`: malformed lines dropped under [`LoadPolicy::Skip`]
/// - `overridden`: lines whose word was already present (last one wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub lines: usize,
    pub entries: usize,
    pub skipped: usize,
    pub overridden: usize,
}

/// Immutable word → weight mapping.
///
/// Words are stored exactly as read; callers lowercase their tokens before
/// [`Lexicon::lookup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    weights: HashMap<String, i32>,
}

impl Lexicon {
    pub fn new() -> Self { Self::default() }

    /// Load from a `word<TAB>integer` file.
    ///
    /// The file is closed before this returns, whatever the outcome. On error
    /// no lexicon is produced; a caller that wants to keep running with an
    /// inert classifier can fall back to [`Lexicon::new`].
    pub fn load(path: &Path, policy: LoadPolicy) -> Result<(Self, LoadReport), LexiconError> {
        let file = File::open(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "cannot open lexicon");
            LexiconError::Unavailable { path: path.to_path_buf(), source }
        })?;
        let (lexicon, report) = Self::from_reader(BufReader::new(file), policy)?;
        debug!(
            path = %path.display(),
            entries = report.entries,
            skipped = report.skipped,
            overridden = report.overridden,
            "sentiment words loaded"
        );
        Ok((lexicon, report))
    }

    /// Load from any buffered source. Blank lines are ignored; `\r\n` endings
    /// are accepted. A line that is not UTF-8 is malformed like any other bad
    /// line; only I/O failures end the load with [`LexiconError::Read`].
    pub fn from_reader<R: BufRead>(mut reader: R, policy: LoadPolicy) -> Result<(Self, LoadReport), LexiconError> {
        let mut weights = HashMap::new();
        let mut report = LoadReport::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let line_no = report.lines + 1;
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LexiconError::Read { line: line_no, source })?;
            if read == 0 {
                break;
            }
            report.lines += 1;
            strip_line_ending(&mut buf);

            let parsed = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => parse_line(line),
                Err(_) => Err(MalformedLine::Encoding),
            };
            match parsed {
                Ok((word, weight)) => {
                    if weights.insert(word.to_string(), weight).is_some() {
                        report.overridden += 1;
                    }
                }
                Err(reason) => match policy {
                    LoadPolicy::Abort => return Err(LexiconError::Malformed { line: line_no, reason }),
                    LoadPolicy::Skip => {
                        warn!(line = line_no, %reason, "skipping malformed lexicon line");
                        report.skipped += 1;
                    }
                },
            }
        }

        report.entries = weights.len();
        Ok((Self { weights }, report))
    }

    pub fn lookup(&self, word: &str) -> Option<i32> {
        self.weights.get(word).copied()
    }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.weights.iter().map(|(w, s)| (w.as_str(), *s))
    }
}

fn strip_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

fn parse_line(line: &str) -> Result<(&str, i32), MalformedLine> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [word, weight] = fields.as_slice() else {
        return Err(MalformedLine::FieldCount(fields.len()));
    };
    if word.is_empty() {
        return Err(MalformedLine::EmptyWord);
    }
    let weight = weight.parse::<i32>().map_err(|_| MalformedLine::BadWeight((*weight).to_string()))?;
    Ok((*word, weight))
}

impl WordWeights for Lexicon {
    fn weight(&self, word: &str) -> Option<i32> { self.lookup(word) }
}

impl<W: Into<String>> FromIterator<(W, i32)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (W, i32)>>(iter: I) -> Self {
        Self { weights: iter.into_iter().map(|(w, s)| (w.into(), s)).collect() }
    }
}
