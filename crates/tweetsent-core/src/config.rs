//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys are reached from the environment with `__`, e.g.
//! `APP_SENTIMENT__LEXICON_PATH`. Relative paths found in a config file are
//! resolved against that file's directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::LoadPolicy;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment, base_dir: PathBuf::from(".") })
    }

    /// Load a single TOML file (plus `APP_*` overrides). Unlike [`Config::load`]
    /// the file must exist.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Err(Error::InvalidConfig(format!("config file not found: {}", path.display())).into());
        }
        let figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("APP_").split("__"));
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { figment, base_dir })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[sentiment]` section, validated, with `lexicon_path` expanded and
    /// resolved against the config's base directory.
    pub fn sentiment(&self) -> anyhow::Result<SentimentSettings> {
        let mut settings: SentimentSettings = self.get("sentiment")?;
        settings.validate()?;
        settings.lexicon_path = resolve_with_base(&self.base_dir, &settings.lexicon_path)
            .to_string_lossy()
            .into_owned();
        Ok(settings)
    }

    /// Like [`Config::sentiment`], with `lexicon_path` taken verbatim from the
    /// caller (relative to the working directory, not the config file). The
    /// rest of an existing `[sentiment]` section still applies and is still
    /// validated; defaults are used only when the section is missing.
    pub fn sentiment_with_lexicon(&self, lexicon_path: &str) -> anyhow::Result<SentimentSettings> {
        if self.figment.find_value("sentiment").is_err() {
            let settings = SentimentSettings::new(lexicon_path);
            settings.validate()?;
            return Ok(settings);
        }
        let mut settings: SentimentSettings = self
            .figment
            .clone()
            .merge(Serialized::default("sentiment", json!({ "lexicon_path": lexicon_path })))
            .extract_inner("sentiment")
            .map_err(|e| anyhow::anyhow!("Failed to get 'sentiment': {}", e))?;
        settings.validate()?;
        settings.lexicon_path = lexicon_path.to_string();
        Ok(settings)
    }
}

/// Settings for the classification stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSettings {
    /// Location of the tab-separated word/weight resource.
    pub lexicon_path: String,
    #[serde(default)]
    pub malformed_lines: LoadPolicy,
    /// Refuse to start with an empty or unreadable lexicon.
    #[serde(default = "default_require_entries")]
    pub require_entries: bool,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_require_entries() -> bool { true }
fn default_workers() -> usize { 1 }
fn default_batch_size() -> usize { 1024 }

impl SentimentSettings {
    pub fn new(lexicon_path: impl Into<String>) -> Self {
        Self {
            lexicon_path: lexicon_path.into(),
            malformed_lines: LoadPolicy::default(),
            require_entries: default_require_entries(),
            workers: default_workers(),
            batch_size: default_batch_size(),
        }
    }

    pub fn lexicon_path(&self) -> PathBuf {
        expand_path(&self.lexicon_path)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.lexicon_path.trim().is_empty() {
            return Err(Error::InvalidConfig("sentiment.lexicon_path is empty".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("sentiment.batch_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
