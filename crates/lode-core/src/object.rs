use serde::{Deserialize, Serialize};
use std::fmt;

/// The three object kinds the store can hold, derived from the header tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
}

impl ObjectKind {
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"commit" => Some(Self::Commit),
            b"tree" => Some(Self::Tree),
            b"blob" => Some(Self::Blob),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A decoded object: kind tag plus the header-stripped payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub kind: ObjectKind,
    pub content: Vec<u8>,
}

impl Object {
    pub fn new(kind: ObjectKind, content: Vec<u8>) -> Self {
        Self { kind, content }
    }

    /// Body length in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
