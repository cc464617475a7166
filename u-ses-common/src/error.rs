#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    Common(String),
    #[error("serialize query params failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("format date failed: {0}")]
    Format(#[from] time::error::Format),
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },
}
