use anyhow::Context;
use tracing::{info, warn};

use tweetsent_core::config::SentimentSettings;
use tweetsent_core::error::Error;
use tweetsent_lexicon::Lexicon;

/// Load the lexicon the settings point at.
///
/// With `require_entries` any load failure, or a lexicon with no words, stops
/// startup. Without it the harness keeps running on whatever it could get,
/// falling back to an empty lexicon that classifies everything as neutral.
pub fn load_lexicon(settings: &SentimentSettings) -> anyhow::Result<Lexicon> {
    let path = settings.lexicon_path();
    let lexicon = match Lexicon::load(&path, settings.malformed_lines) {
        Ok((lexicon, report)) => {
            info!(
                path = %path.display(),
                entries = report.entries,
                skipped = report.skipped,
                "lexicon loaded"
            );
            lexicon
        }
        Err(e) if !settings.require_entries => {
            warn!(path = %path.display(), error = %e, "continuing with an empty lexicon");
            Lexicon::new()
        }
        Err(e) => return Err(e).with_context(|| format!("loading lexicon {}", path.display())),
    };

    if lexicon.is_empty() {
        if settings.require_entries {
            return Err(Error::EmptyLexicon(path.display().to_string()).into());
        }
        warn!("lexicon has no words; no record will be emitted");
    }
    Ok(lexicon)
}
