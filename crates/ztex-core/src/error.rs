use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZtError>;

#[derive(Debug, Error)]
pub enum ZtError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("bad value for {key}: {value}")]
    BadValue { key: String, value: String },
}
