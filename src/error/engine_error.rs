use thiserror::Error;

/// Failures that prevent a validation from producing a report at all.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to encode bid request for validation: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid engine configuration: {0}")]
    Config(String),
    #[error("failed to parse engine configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
