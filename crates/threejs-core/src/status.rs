use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThreeJsError {
    #[error("Bad signature: {0}")]
    BadSignature(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Length mismatch: {0}")]
    LengthMismatch(String),
    #[error("Invalid length: {0}")]
    InvalidLength(String),
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

pub type Status = Result<(), ThreeJsError>;

impl From<std::io::Error> for ThreeJsError {
    fn from(err: std::io::Error) -> Self {
        ThreeJsError::IoError(err.to_string())
    }
}
