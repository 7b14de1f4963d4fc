use std::path::{Path, PathBuf};

use lode_core::codec;
use lode_core::id::ObjectId;
use lode_core::object::Object;

use crate::StoreError;

pub fn object_path(root: &Path, id: &ObjectId) -> PathBuf {
    root.join(id.shard_prefix()).join(id.shard_suffix())
}

/// Read and decode one object by id without scanning the rest of the store.
pub fn read_object(root: &Path, id: &ObjectId) -> Result<Object, StoreError> {
    let path = object_path(root, id);
    if !path.exists() {
        return Err(StoreError::ObjectNotFound(*id));
    }
    let raw = std::fs::read(&path)?;
    codec::decode(&raw).map_err(|e| StoreError::CorruptObject { path, source: e })
}
