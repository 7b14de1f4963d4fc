use std::collections::BTreeMap;
use std::fs::ReadDir;
use std::path::Path;

use lode_core::codec::{self, SizeCheck};
use lode_core::error::CoreError;
use lode_core::id::ObjectId;
use lode_core::object::Object;

use crate::{Store, StoreError};

/// Failure policy for [`scan_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// The first unreadable or undecodable entry aborts the scan.
    #[default]
    Strict,
    /// Offending entries are skipped with a warning and left out of the
    /// result.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub mode: ScanMode,
    pub size_check: SizeCheck,
}

/// Scan a store directory into a [`Store`] with strict defaults.
pub fn scan(root: &Path) -> Result<Store, StoreError> {
    scan_with(root, &ScanOptions::default())
}

/// Walk every directory level under `root` and decode each regular file as
/// one object. The object's id is the concatenation of the path components
/// below the root (directory names in order, then the file name), which must
/// form a 40-char hex id. For the canonical bucket layout that is exactly
/// `<2-hex-dir><38-hex-file>`.
pub fn scan_with(root: &Path, opts: &ScanOptions) -> Result<Store, StoreError> {
    let mut objects = BTreeMap::new();
    walk(std::fs::read_dir(root)?, "", opts, &mut objects)?;
    Ok(Store { objects })
}

fn walk(
    entries: ReadDir,
    prefix: &str,
    opts: &ScanOptions,
    objects: &mut BTreeMap<ObjectId, Object>,
) -> Result<(), StoreError> {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if opts.mode == ScanMode::Lenient => {
                tracing::warn!("skipping unreadable store entry: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let path = entry.path();
        let name = entry.file_name();
        let concat = format!("{}{}", prefix, name.to_string_lossy());
        if path.is_dir() {
            match std::fs::read_dir(&path) {
                Ok(sub) => walk(sub, &concat, opts, objects)?,
                Err(e) if opts.mode == ScanMode::Lenient => {
                    tracing::warn!("skipping unreadable directory: {} ({})", path.display(), e);
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            match read_one(&path, &concat, opts.size_check) {
                Ok((id, object)) => {
                    objects.insert(id, object);
                }
                Err(e) if opts.mode == ScanMode::Lenient => {
                    tracing::warn!("skipping object file: {} ({})", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}

fn read_one(
    path: &Path,
    hex: &str,
    size_check: SizeCheck,
) -> Result<(ObjectId, Object), StoreError> {
    let corrupt = |source: CoreError| StoreError::CorruptObject {
        path: path.to_path_buf(),
        source,
    };
    let id = ObjectId::from_hex(hex).map_err(corrupt)?;
    let raw = std::fs::read(path).map_err(|e| corrupt(CoreError::Io(e)))?;
    let object = codec::decode_with(&raw, size_check).map_err(corrupt)?;
    Ok((id, object))
}
