use std::path::PathBuf;

use thiserror::Error;

use lode_core::{CoreError, ObjectId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("corrupt object at {path}: {source}")]
    CorruptObject { path: PathBuf, source: CoreError },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
