use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Qualifier string contains unknown or out-of-order tokens
    #[error("invalid qualifiers: {0:?}")]
    InvalidQualifiers(String),

    /// Binary ResTable_config structure is truncated or malformed
    #[error("got error while parsing ResTable_config")]
    ParseError,
}
