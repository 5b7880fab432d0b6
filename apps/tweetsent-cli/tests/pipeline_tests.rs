use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

use tweetsent_classifier::{BatchClassifier, Classifier};
use tweetsent_cli::args::CliArgs;
use tweetsent_cli::{pipeline, startup};
use tweetsent_core::config::{Config, SentimentSettings};
use tweetsent_core::types::{LoadPolicy, OutputRecord, Sentiment};
use tweetsent_lexicon::Lexicon;

fn args(list: &[&str]) -> anyhow::Result<CliArgs> {
    CliArgs::parse(list.iter().map(|s| s.to_string()))
}

fn batch(entries: &[(&str, i32)], workers: usize) -> BatchClassifier {
    let lexicon: Lexicon = entries.iter().map(|(w, s)| (*w, *s)).collect();
    BatchClassifier::new(Classifier::new(lexicon), workers).expect("pool")
}

#[test]
fn parse_flags() {
    let parsed = args(&["--lexicon", "words.tsv", "--workers", "3", "--input", "in.jsonl", "--progress"]).unwrap();
    assert_eq!(parsed.lexicon.as_deref(), Some("words.tsv"));
    assert_eq!(parsed.workers, Some(3));
    assert_eq!(parsed.input, Some("in.jsonl".into()));
    assert!(parsed.progress);
    assert!(parsed.config.is_none());

    assert!(args(&["--workers", "many"]).is_err());
    assert!(args(&["--lexicon"]).is_err());
    assert!(args(&["--verbose"]).is_err());
}

#[test]
fn flags_override_config() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, "[sentiment]\nlexicon_path = \"words.tsv\"\nworkers = 2\nbatch_size = 16\n").unwrap();
    let config = Config::from_file(&cfg).unwrap();

    let from_config = args(&[]).unwrap().settings(&config).unwrap();
    assert_eq!(from_config.lexicon_path(), tmp.path().join("words.tsv"));
    assert_eq!(from_config.workers, 2);

    let overridden = args(&["--lexicon", "/other.tsv", "--workers", "8"]).unwrap().settings(&config).unwrap();
    assert_eq!(overridden.lexicon_path, "/other.tsv");
    assert_eq!(overridden.workers, 8);
    assert_eq!(overridden.batch_size, 16);
}

#[test]
fn lexicon_flag_suffices_without_config_section() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, "[logging]\nlevel = \"debug\"\n").unwrap();
    let config = Config::from_file(&cfg).unwrap();

    assert!(args(&[]).unwrap().settings(&config).is_err());
    let settings = args(&["--lexicon", "w.tsv"]).unwrap().settings(&config).unwrap();
    assert_eq!(settings.lexicon_path, "w.tsv");
    assert!(settings.require_entries);
}

#[test]
fn lexicon_flag_keeps_the_rest_of_the_config_section() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        "[sentiment]\nmalformed_lines = \"abort\"\nrequire_entries = false\nworkers = 8\nbatch_size = 32\n",
    )
    .unwrap();
    let config = Config::from_file(&cfg).unwrap();

    let settings = args(&["--lexicon", "x.tsv"]).unwrap().settings(&config).unwrap();
    assert_eq!(settings.lexicon_path, "x.tsv");
    assert_eq!(settings.malformed_lines, LoadPolicy::Abort);
    assert!(!settings.require_entries);
    assert_eq!(settings.workers, 8);
    assert_eq!(settings.batch_size, 32);
}

#[test]
fn lexicon_flag_does_not_hide_an_invalid_config_section() {
    let tmp = TempDir::new().unwrap();
    let cfg = tmp.path().join("config.toml");

    fs::write(&cfg, "[sentiment]\nmalformed_lines = \"abort\"\nworkers = 8\nbatch_size = 0\n").unwrap();
    let config = Config::from_file(&cfg).unwrap();
    assert!(args(&["--lexicon", "x.tsv"]).unwrap().settings(&config).is_err());

    fs::write(&cfg, "[sentiment]\nlexicon_path = \"w.tsv\"\nmalformed_lines = \"sometimes\"\n").unwrap();
    let config = Config::from_file(&cfg).unwrap();
    assert!(args(&["--lexicon", "x.tsv"]).unwrap().settings(&config).is_err());
}

#[test]
fn strict_startup_rejects_missing_or_empty_lexicon() {
    let tmp = TempDir::new().unwrap();
    let missing = SentimentSettings::new(tmp.path().join("missing.tsv").to_string_lossy());
    assert!(startup::load_lexicon(&missing).is_err());

    let empty_path = tmp.path().join("empty.tsv");
    fs::write(&empty_path, "\n\n").unwrap();
    let empty = SentimentSettings::new(empty_path.to_string_lossy());
    assert!(startup::load_lexicon(&empty).is_err());
}

#[test]
fn lenient_startup_degrades_to_empty_lexicon() {
    let tmp = TempDir::new().unwrap();
    let mut settings = SentimentSettings::new(tmp.path().join("missing.tsv").to_string_lossy());
    settings.require_entries = false;
    let lexicon = startup::load_lexicon(&settings).expect("lenient");
    assert!(lexicon.is_empty());

    let bad = tmp.path().join("bad.tsv");
    fs::write(&bad, "good\t1\nbroken line\n").unwrap();
    let mut settings = SentimentSettings::new(bad.to_string_lossy());
    settings.malformed_lines = LoadPolicy::Abort;
    settings.require_entries = false;
    assert!(startup::load_lexicon(&settings).unwrap().is_empty());

    settings.require_entries = true;
    assert!(startup::load_lexicon(&settings).is_err());

    settings.malformed_lines = LoadPolicy::Skip;
    assert_eq!(startup::load_lexicon(&settings).unwrap().lookup("good"), Some(1));
}

#[test]
fn run_emits_only_polar_records_as_json_lines() {
    let input = concat!(
        r#"{"track":"rust","tweet":{"text":"Good good bad","id":1}}"#, "\n",
        r#"{"track":"rust","tweet":{"text":"good bad"}}"#, "\n",
        "\n",
        r#"{"track":"go","tweet":{"id":3}}"#, "\n",
        "not json at all\n",
        r#"{"track":"go","tweet":{"text":"so BAD"}}"#, "\n",
    );
    let classifier = batch(&[("good", 1), ("bad", -1)], 2);
    let mut out = Vec::new();
    let stats = pipeline::run(Cursor::new(input), &mut out, &classifier, 2).unwrap();

    assert_eq!(stats.records, 4);
    assert_eq!(stats.invalid, 1);
    assert_eq!(stats.emitted, 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"{"track":"rust","tweet":"Good good bad","sentiment":"+"}"#);
    let second: OutputRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second, OutputRecord { track: "go".into(), tweet: "so BAD".into(), sentiment: Sentiment::Negative });
    assert!(!text.contains("\"o\""));
}

#[test]
fn run_preserves_order_across_batches() {
    let mut input = String::new();
    for i in 0..50 {
        let text = if i % 2 == 0 { "up" } else { "down" };
        input.push_str(&format!("{{\"track\":\"t{i}\",\"tweet\":{{\"text\":\"{text}\"}}}}\n"));
    }
    let classifier = batch(&[("up", 1), ("down", -1)], 4);
    let mut out = Vec::new();
    let stats = pipeline::run(Cursor::new(input), &mut out, &classifier, 7).unwrap();
    assert_eq!(stats.emitted, 50);

    let tracks: Vec<String> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str::<OutputRecord>(l).unwrap().track)
        .collect();
    let expected: Vec<String> = (0..50).map(|i| format!("t{i}")).collect();
    assert_eq!(tracks, expected);
}
