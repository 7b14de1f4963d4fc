use lode_core::id::{ObjectId, ID_LEN};
use lode_core::object::{Object, ObjectKind};
use lode_store::Store;

use crate::GraphError;

/// One level of a tree, every entry resolved against the store. Entries keep
/// body order; a later duplicate name replaces the earlier binding in place.
#[derive(Debug, PartialEq)]
pub struct TreeRecord<'a> {
    pub entries: Vec<TreeEntry<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct TreeEntry<'a> {
    pub name: String,
    pub id: ObjectId,
    pub object: &'a Object,
}

impl<'a> TreeRecord<'a> {
    pub fn get(&self, name: &str) -> Option<&TreeEntry<'a>> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

/// Parse the binary body of a tree object, one level deep.
///
/// The body is a sequence of `<mode-octal> <name>\0<20 raw id bytes>` with
/// no padding between entries. Modes are validated for shape and dropped.
/// Child ids missing from the store are an error, or skipped with a warning
/// when `ignore_missing` is set.
pub fn parse_tree<'a>(
    store: &'a Store,
    tree: &Object,
    ignore_missing: bool,
) -> Result<TreeRecord<'a>, GraphError> {
    if tree.kind != ObjectKind::Tree {
        return Err(GraphError::WrongKind {
            expected: ObjectKind::Tree,
            actual: tree.kind,
        });
    }

    let mut entries: Vec<TreeEntry<'a>> = Vec::new();
    let mut rest = tree.content.as_slice();
    while !rest.is_empty() {
        let (name, id, remainder) = split_entry(rest)?;
        rest = remainder;

        let object = match store.get(&id) {
            Some(object) => object,
            None if ignore_missing => {
                tracing::warn!("skipping unresolved tree entry {:?} -> {}", name, id);
                continue;
            }
            None => return Err(GraphError::MissingObject(id)),
        };

        let entry = TreeEntry { name, id, object };
        match entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }
    Ok(TreeRecord { entries })
}

fn split_entry(buf: &[u8]) -> Result<(String, ObjectId, &[u8]), GraphError> {
    let space = buf
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| malformed("entry has no space after the mode"))?;
    let mode = &buf[..space];
    if mode.is_empty() || !mode.iter().all(u8::is_ascii_digit) {
        return Err(malformed("entry mode is not octal ascii"));
    }

    let nul = buf[space..]
        .iter()
        .position(|&b| b == 0)
        .map(|i| space + i)
        .ok_or_else(|| malformed("entry name is not NUL-terminated"))?;
    let name = std::str::from_utf8(&buf[space + 1..nul])
        .map_err(|_| malformed("entry name is not utf-8"))?
        .to_string();
    if name.is_empty() {
        return Err(malformed("entry name is empty"));
    }

    let id_end = nul + 1 + ID_LEN;
    if buf.len() < id_end {
        return Err(malformed("entry is truncated before the child id"));
    }
    let id = <[u8; ID_LEN]>::try_from(&buf[nul + 1..id_end])
        .map(ObjectId::from_bytes)
        .map_err(|_| malformed("entry id has the wrong width"))?;

    Ok((name, id, &buf[id_end..]))
}

fn malformed(what: &str) -> GraphError {
    GraphError::MalformedTree(what.to_string())
}
