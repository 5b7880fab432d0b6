use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};

use tweetsent_core::config::{Config, SentimentSettings};

pub const USAGE: &str = "Usage: tweetsent [--config <file>] [--lexicon <path>] [--workers <n>] [--input <file>] [--progress]";

/// Command-line flags. Anything not given falls back to the config.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub lexicon: Option<String>,
    pub workers: Option<usize>,
    pub input: Option<PathBuf>,
    pub progress: bool,
    pub help: bool,
}

impl CliArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(value_for(&mut args, "--config")?)),
                "--lexicon" => parsed.lexicon = Some(value_for(&mut args, "--lexicon")?),
                "--input" => parsed.input = Some(PathBuf::from(value_for(&mut args, "--input")?)),
                "--workers" => {
                    let raw = value_for(&mut args, "--workers")?;
                    let n = raw.parse::<usize>().with_context(|| format!("--workers expects a number, got {raw:?}"))?;
                    parsed.workers = Some(n);
                }
                "--progress" => parsed.progress = true,
                "--help" | "-h" => parsed.help = true,
                other => bail!("Unknown argument: {other}"),
            }
        }
        Ok(parsed)
    }

    /// Sentiment settings from the config with flag overrides applied. A
    /// `--lexicon` flag is enough on its own when the config has no
    /// `[sentiment]` section; a section that is present is always validated.
    pub fn settings(&self, config: &Config) -> anyhow::Result<SentimentSettings> {
        let mut settings = match &self.lexicon {
            Some(path) => config.sentiment_with_lexicon(path)?,
            None => config
                .sentiment()
                .context("no lexicon configured (set sentiment.lexicon_path or pass --lexicon)")?,
        };
        if let Some(workers) = self.workers {
            settings.workers = workers;
        }
        Ok(settings)
    }
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next().ok_or_else(|| anyhow!("{flag} requires a value"))
}
