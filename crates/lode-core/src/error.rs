use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("corrupt object: {0}")]
    CorruptObject(String),
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("unknown object type: {0}")]
    UnknownObjectType(String),
    #[error("size mismatch: header declares {declared} bytes, body has {actual}")]
    SizeMismatch { declared: usize, actual: usize },
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
