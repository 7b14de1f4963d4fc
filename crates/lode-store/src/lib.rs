pub mod error;
pub mod loose;
pub mod scan;

pub use error::StoreError;
pub use scan::{scan, scan_with, ScanMode, ScanOptions};

use std::collections::BTreeMap;

use lode_core::id::ObjectId;
use lode_core::object::{Object, ObjectKind};

/// An in-memory snapshot of a store directory: every decoded object, keyed
/// by id. Ordered by id, so walks over the snapshot are deterministic for a
/// given set of contents.
#[derive(Debug, Default)]
pub struct Store {
    objects: BTreeMap<ObjectId, Object>,
}

impl Store {
    pub fn get(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Object)> {
        self.objects.iter()
    }

    pub fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = (&ObjectId, &Object)> {
        self.objects.iter().filter(move |(_, obj)| obj.kind == kind)
    }
}

impl FromIterator<(ObjectId, Object)> for Store {
    fn from_iter<I: IntoIterator<Item = (ObjectId, Object)>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
