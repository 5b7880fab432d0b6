use std::env;
use std::path::PathBuf;

use tweetsent_classifier::Classifier;
use tweetsent_lexicon::{Lexicon, LoadPolicy};

// Score ad-hoc text against a lexicon file and print the diagnostic polarity.
// Usage:
//   cargo run -p tweetsent-classifier --example score -- --lexicon ../dev_data/AFINN-111.txt "What a great day"
// Notes:
//   - Neutral results print as "o"; the classifier itself never emits them.
//   - LEXICON_PATH is used when --lexicon is not given.

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut lexicon_path: Option<PathBuf> = None;
    let mut texts = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--lexicon" => {
                if i + 1 >= args.len() { eprintln!("--lexicon requires a path"); std::process::exit(2); }
                lexicon_path = Some(PathBuf::from(&args[i + 1]));
                i += 2; continue;
            }
            s if s.starts_with("--") => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => { texts.push(s.to_string()); i += 1; }
        }
    }

    let lexicon_path = lexicon_path
        .or_else(|| env::var("LEXICON_PATH").ok().map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("no lexicon given (use --lexicon or LEXICON_PATH)"))?;

    let (lexicon, report) = Lexicon::load(&lexicon_path, LoadPolicy::Skip)?;
    println!("Lexicon: {} ({} words, {} skipped lines)", lexicon_path.display(), report.entries, report.skipped);

    let classifier = Classifier::new(lexicon);
    for text in &texts {
        let score = classifier.score(text);
        println!("{:>4} {} {}", score, classifier.polarity(text), text);
    }
    Ok(())
}
