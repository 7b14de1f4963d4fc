use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use lode_core::codec::{self, SizeCheck};
use lode_core::id::ObjectId;
use lode_core::object::ObjectKind;
use lode_graph::commit::parse_commit;
use lode_graph::walk::{find_file, find_root_commit};
use lode_graph::GraphError;
use lode_store::{loose, scan, scan_with, ScanMode, ScanOptions, StoreError};

fn oid(n: u8) -> ObjectId {
    ObjectId::from_bytes([n; 20])
}

fn put(root: &Path, id: &ObjectId, kind: ObjectKind, body: &[u8]) {
    let path = loose::object_path(root, id);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, codec::encode(kind, body).unwrap()).unwrap();
}

fn put_raw(root: &Path, id: &ObjectId, raw: &[u8]) {
    let path = loose::object_path(root, id);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, raw).unwrap();
}

fn commit_body(tree: &ObjectId, parents: &[ObjectId], message: &str) -> Vec<u8> {
    let mut text = format!("tree {}\n", tree);
    for parent in parents {
        text.push_str(&format!("parent {}\n", parent));
    }
    text.push_str("author Ada Lovelace <ada@example.com> 1700000000 +0000\n");
    text.push_str("committer Ada Lovelace <ada@example.com> 1700000000 +0000\n\n");
    text.push_str(message);
    text.into_bytes()
}

fn tree_body(entries: &[(&str, &str, ObjectId)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (mode, name, id) in entries {
        body.extend_from_slice(mode.as_bytes());
        body.push(b' ');
        body.extend_from_slice(name.as_bytes());
        body.push(0);
        body.extend_from_slice(id.as_bytes());
    }
    body
}

/// A small repository: a three-commit mainline, a short branch off the root,
/// and a merge tip. Every commit snapshots the same nested source tree.
///
///   0x13 <- 0x12 <- 0x11 <- 0x15 (merge tip, second parent 0x14)
///      \<- 0x14 <------------/
///   tree 0x20: README.md, src/ -> 0x21: lib.rs, util/ -> 0x22: helper.rs
fn lay_out_repo(root: &Path) {
    put(root, &oid(0x01), ObjectKind::Blob, b"# lode\n");
    put(root, &oid(0x02), ObjectKind::Blob, b"pub fn lib() {}\n");
    put(root, &oid(0x03), ObjectKind::Blob, b"pub fn helper() {}\n");

    put(
        root,
        &oid(0x22),
        ObjectKind::Tree,
        &tree_body(&[("100644", "helper.rs", oid(0x03))]),
    );
    put(
        root,
        &oid(0x21),
        ObjectKind::Tree,
        &tree_body(&[("100644", "lib.rs", oid(0x02)), ("40000", "util", oid(0x22))]),
    );
    put(
        root,
        &oid(0x20),
        ObjectKind::Tree,
        &tree_body(&[("100644", "README.md", oid(0x01)), ("40000", "src", oid(0x21))]),
    );

    put(
        root,
        &oid(0x13),
        ObjectKind::Commit,
        &commit_body(&oid(0x20), &[], "initial import"),
    );
    put(
        root,
        &oid(0x12),
        ObjectKind::Commit,
        &commit_body(&oid(0x20), &[oid(0x13)], "add src"),
    );
    put(
        root,
        &oid(0x11),
        ObjectKind::Commit,
        &commit_body(&oid(0x20), &[oid(0x12)], "polish"),
    );
    put(
        root,
        &oid(0x14),
        ObjectKind::Commit,
        &commit_body(&oid(0x20), &[oid(0x13)], "branch work"),
    );
    put(
        root,
        &oid(0x15),
        ObjectKind::Commit,
        &commit_body(&oid(0x20), &[oid(0x11), oid(0x14)], "merge branch"),
    );
}

// === Test 1: scan a real layout and walk it end to end ===
#[test]
fn scan_then_find_root_then_find_file() {
    let tmp = tempfile::tempdir().unwrap();
    lay_out_repo(tmp.path());

    let store = scan(tmp.path()).unwrap();
    assert_eq!(store.len(), 11);

    let root = find_root_commit(&store).unwrap();
    assert_eq!(root.message, "initial import");
    assert_eq!(root.tree_id, oid(0x20));
    assert!(root.parent_ids.is_empty());

    let merge = parse_commit(store.get(&oid(0x15)).unwrap()).unwrap();
    assert_eq!(merge.parent_ids, vec![oid(0x11), oid(0x14)]);

    let readme = find_file(&store, &root.tree_id, "README.md").unwrap();
    assert_eq!(readme.content, b"# lode\n");

    let helper = find_file(&store, &root.tree_id, "helper.rs").unwrap();
    assert_eq!(helper.kind, ObjectKind::Blob);
    assert_eq!(helper.content, b"pub fn helper() {}\n");
}

// === Test 2: targeted read agrees with the bulk scan ===
#[test]
fn read_object_matches_scanned_object() {
    let tmp = tempfile::tempdir().unwrap();
    lay_out_repo(tmp.path());

    let store = scan(tmp.path()).unwrap();
    for id in [oid(0x01), oid(0x20), oid(0x11)] {
        let single = loose::read_object(tmp.path(), &id).unwrap();
        assert_eq!(&single, store.get(&id).unwrap());
    }

    assert!(matches!(
        loose::read_object(tmp.path(), &oid(0x7f)),
        Err(StoreError::ObjectNotFound(_))
    ));
}

// === Test 3: strict scan aborts on junk, lenient scan works around it ===
#[test]
fn scan_modes_disagree_about_junk() {
    let tmp = tempfile::tempdir().unwrap();
    lay_out_repo(tmp.path());
    put_raw(tmp.path(), &oid(0x44), b"definitely not compressed");
    std::fs::create_dir_all(tmp.path().join("info")).unwrap();
    std::fs::write(tmp.path().join("info").join("packs"), b"").unwrap();

    assert!(matches!(
        scan(tmp.path()),
        Err(StoreError::CorruptObject { .. })
    ));

    let opts = ScanOptions {
        mode: ScanMode::Lenient,
        ..ScanOptions::default()
    };
    let store = scan_with(tmp.path(), &opts).unwrap();
    assert_eq!(store.len(), 11);
    let root = find_root_commit(&store).unwrap();
    assert_eq!(root.message, "initial import");
}

// === Test 4: legacy stores with lying size headers ===
#[test]
fn legacy_size_check_reads_old_store() {
    let tmp = tempfile::tempdir().unwrap();
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"blob 3\0more than three").unwrap();
    put_raw(tmp.path(), &oid(0x30), &encoder.finish().unwrap());

    match scan(tmp.path()) {
        Err(StoreError::CorruptObject { source, .. }) => {
            assert!(source.to_string().contains("size mismatch"));
        }
        other => panic!("expected CorruptObject, got {:?}", other),
    }

    let opts = ScanOptions {
        size_check: SizeCheck::Legacy,
        ..ScanOptions::default()
    };
    let store = scan_with(tmp.path(), &opts).unwrap();
    assert_eq!(store.get(&oid(0x30)).unwrap().content, b"more than three");
}

// === Test 5: root commit multiplicities over on-disk stores ===
#[test]
fn root_commit_multiplicity() {
    let tmp = tempfile::tempdir().unwrap();
    put(tmp.path(), &oid(0x20), ObjectKind::Tree, &tree_body(&[]));
    put(
        tmp.path(),
        &oid(0x02),
        ObjectKind::Commit,
        &commit_body(&oid(0x20), &[], "root b"),
    );
    put(
        tmp.path(),
        &oid(0x01),
        ObjectKind::Commit,
        &commit_body(&oid(0x20), &[], "root a"),
    );

    let store = scan(tmp.path()).unwrap();
    match find_root_commit(&store) {
        Err(GraphError::AmbiguousRoot(ids)) => assert_eq!(ids, vec![oid(0x01), oid(0x02)]),
        other => panic!("expected AmbiguousRoot, got {:?}", other),
    }

    let empty = tempfile::tempdir().unwrap();
    put(empty.path(), &oid(0x20), ObjectKind::Tree, &tree_body(&[]));
    let store = scan(empty.path()).unwrap();
    assert!(matches!(
        find_root_commit(&store),
        Err(GraphError::NoRootCommit)
    ));
}

// === Test 6: a file-search miss names the file and the root tree ===
#[test]
fn find_file_miss_is_descriptive() {
    let tmp = tempfile::tempdir().unwrap();
    lay_out_repo(tmp.path());

    let store = scan(tmp.path()).unwrap();
    match find_file(&store, &oid(0x20), "missing.txt") {
        Err(GraphError::FileNotFound { name, tree }) => {
            assert_eq!(name, "missing.txt");
            assert_eq!(tree, oid(0x20));
        }
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

// === Test 7: a level match beats a deeper one even on disk ===
#[test]
fn level_priority_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    put(tmp.path(), &oid(0x01), ObjectKind::Blob, b"deep");
    put(tmp.path(), &oid(0x02), ObjectKind::Blob, b"top");
    put(
        tmp.path(),
        &oid(0x21),
        ObjectKind::Tree,
        &tree_body(&[("100644", "config", oid(0x01))]),
    );
    put(
        tmp.path(),
        &oid(0x20),
        ObjectKind::Tree,
        &tree_body(&[("40000", "nested", oid(0x21)), ("100644", "config", oid(0x02))]),
    );

    let store = scan(tmp.path()).unwrap();
    let found = find_file(&store, &oid(0x20), "config").unwrap();
    assert_eq!(found.content, b"top");
}
