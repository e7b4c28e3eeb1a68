use thiserror::Error;

pub type Result<T> = std::result::Result<T, MudawamaError>;

#[derive(Debug, Error)]
pub enum MudawamaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
