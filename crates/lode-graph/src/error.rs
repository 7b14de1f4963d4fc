use thiserror::Error;

use lode_core::object::ObjectKind;
use lode_core::ObjectId;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("expected a {expected} object, found {actual}")]
    WrongKind {
        expected: ObjectKind,
        actual: ObjectKind,
    },
    #[error("malformed commit: {0}")]
    MalformedCommit(String),
    #[error("malformed tree: {0}")]
    MalformedTree(String),
    #[error("missing object: {0}")]
    MissingObject(ObjectId),
    #[error("store has no parentless commit")]
    NoRootCommit,
    #[error("store has multiple parentless commits: {}", join_ids(.0))]
    AmbiguousRoot(Vec<ObjectId>),
    #[error("no file named {name:?} under tree {tree}")]
    FileNotFound { name: String, tree: ObjectId },
}

fn join_ids(ids: &[ObjectId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
