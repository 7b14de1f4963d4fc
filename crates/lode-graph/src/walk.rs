use std::collections::HashSet;

use lode_core::id::ObjectId;
use lode_core::object::{Object, ObjectKind};
use lode_store::Store;

use crate::commit::{parse_commit, Commit};
use crate::tree::parse_tree;
use crate::GraphError;

/// Find the unique parentless commit in the store.
///
/// Every commit object is parsed; the outcome depends only on the store's
/// contents, never on mapping iteration order. Zero parentless commits is
/// [`GraphError::NoRootCommit`], more than one is
/// [`GraphError::AmbiguousRoot`] with the candidate ids in sorted order.
pub fn find_root_commit(store: &Store) -> Result<Commit, GraphError> {
    let mut roots: Vec<(ObjectId, Commit)> = Vec::new();
    for (id, object) in store.of_kind(ObjectKind::Commit) {
        let commit = parse_commit(object)?;
        if commit.parent_ids.is_empty() {
            roots.push((*id, commit));
        }
    }
    match roots.len() {
        0 => Err(GraphError::NoRootCommit),
        1 => Ok(roots.remove(0).1),
        _ => Err(GraphError::AmbiguousRoot(
            roots.into_iter().map(|(id, _)| id).collect(),
        )),
    }
}

/// Search the tree rooted at `root` for a file named `filename`.
///
/// A name match among the entries of the current tree always wins over any
/// match further down. Only when a level has no match are its tree-kind
/// entries searched, in entry order, first hit wins. Entries that do not
/// resolve against the store are skipped, and no tree is visited twice.
pub fn find_file<'a>(
    store: &'a Store,
    root: &ObjectId,
    filename: &str,
) -> Result<&'a Object, GraphError> {
    let tree = store.get(root).ok_or(GraphError::MissingObject(*root))?;
    if tree.kind != ObjectKind::Tree {
        return Err(GraphError::WrongKind {
            expected: ObjectKind::Tree,
            actual: tree.kind,
        });
    }

    let mut visited = HashSet::new();
    match search(store, root, tree, filename, &mut visited)? {
        Some(object) => Ok(object),
        None => Err(GraphError::FileNotFound {
            name: filename.to_string(),
            tree: *root,
        }),
    }
}

fn search<'a>(
    store: &'a Store,
    id: &ObjectId,
    tree: &Object,
    filename: &str,
    visited: &mut HashSet<ObjectId>,
) -> Result<Option<&'a Object>, GraphError> {
    if !visited.insert(*id) {
        return Ok(None);
    }

    let record = parse_tree(store, tree, true)?;
    if let Some(entry) = record.get(filename) {
        return Ok(Some(entry.object));
    }
    for entry in &record.entries {
        if entry.object.kind != ObjectKind::Tree {
            continue;
        }
        if let Some(found) = search(store, &entry.id, entry.object, filename, visited)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
