use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use tweetsent_classifier::{BatchClassifier, Classifier};
use tweetsent_cli::args::{CliArgs, USAGE};
use tweetsent_cli::logging::init_logging;
use tweetsent_cli::{pipeline, startup};
use tweetsent_core::config::Config;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1)).map_err(|e| { eprintln!("{e}\n{USAGE}"); e })?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .map_err(|e| { eprintln!("Error loading config: {}", e); e })?;

    let log_level: String = config.get("logging.level").unwrap_or_else(|_| "info".to_string());
    init_logging(&log_level);

    let settings = args.settings(&config)?;
    let lexicon = startup::load_lexicon(&settings)?;
    let classifier = BatchClassifier::new(Classifier::new(lexicon), settings.workers)
        .context("building worker pool")?;
    info!(workers = classifier.workers(), batch_size = settings.batch_size, "classifier ready");

    let progress = ProgressBar::hidden();
    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening input {}", path.display()))?;
            if args.progress {
                progress.set_length(file.metadata()?.len());
                progress.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                progress.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%)")?
                        .progress_chars("#>-"),
                );
            }
            Box::new(BufReader::new(progress.wrap_read(file)))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout().lock();
    let stats = pipeline::run(input, io::BufWriter::new(stdout), &classifier, settings.batch_size)?;
    progress.finish_and_clear();

    info!(records = stats.records, invalid = stats.invalid, emitted = stats.emitted, "done");
    Ok(())
}
