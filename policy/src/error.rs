use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("No legal action in battle {battle_id}")]
    NoLegalAction { battle_id: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
