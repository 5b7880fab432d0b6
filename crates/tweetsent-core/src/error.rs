use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Lexicon is empty: {0}")]
    EmptyLexicon(String),
}

pub type Result<T> = std::result::Result<T, Error>;
