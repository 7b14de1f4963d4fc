use serde::{Deserialize, Serialize};

use lode_core::id::ObjectId;
use lode_core::object::{Object, ObjectKind};

use crate::GraphError;

/// A parsed commit: tree snapshot, parents in header order, authorship, and
/// the free-form message after the first blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub tree_id: ObjectId,
    pub parent_ids: Vec<ObjectId>,
    pub author: String,
    pub committer: String,
    pub message: String,
}

/// Parse the text body of a commit object.
///
/// Header lines are `<field-name> <value>` and are matched by field name,
/// never by line position: `tree` exactly once, `parent` zero or more times
/// with order kept, `author` and `committer` exactly once each. Unrecognized
/// fields and continuation lines (leading space) are skipped.
pub fn parse_commit(object: &Object) -> Result<Commit, GraphError> {
    if object.kind != ObjectKind::Commit {
        return Err(GraphError::WrongKind {
            expected: ObjectKind::Commit,
            actual: object.kind,
        });
    }

    let text = std::str::from_utf8(&object.content)
        .map_err(|_| GraphError::MalformedCommit("body is not utf-8".into()))?;
    let (header, message) = text
        .split_once("\n\n")
        .ok_or_else(|| GraphError::MalformedCommit("no blank line before message".into()))?;

    let mut tree_id = None;
    let mut parent_ids = Vec::new();
    let mut author = None;
    let mut committer = None;

    for line in header.lines() {
        if line.starts_with(' ') {
            continue;
        }
        let (field, value) = line.split_once(' ').ok_or_else(|| {
            GraphError::MalformedCommit(format!("header line {:?} has no value", line))
        })?;
        match field {
            "tree" => set_once(&mut tree_id, parse_id(value)?, "tree")?,
            "parent" => parent_ids.push(parse_id(value)?),
            "author" => set_once(&mut author, value.to_string(), "author")?,
            "committer" => set_once(&mut committer, value.to_string(), "committer")?,
            _ => {}
        }
    }

    Ok(Commit {
        tree_id: tree_id.ok_or_else(|| missing("tree"))?,
        parent_ids,
        author: author.ok_or_else(|| missing("author"))?,
        committer: committer.ok_or_else(|| missing("committer"))?,
        message: message.trim().to_string(),
    })
}

fn parse_id(value: &str) -> Result<ObjectId, GraphError> {
    ObjectId::from_hex(value).map_err(|e| GraphError::MalformedCommit(e.to_string()))
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &str) -> Result<(), GraphError> {
    if slot.replace(value).is_some() {
        return Err(GraphError::MalformedCommit(format!(
            "duplicate {} field",
            field
        )));
    }
    Ok(())
}

fn missing(field: &str) -> GraphError {
    GraphError::MalformedCommit(format!("missing {} field", field))
}
