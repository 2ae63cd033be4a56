use std::io::Cursor;
use std::sync::Arc;

use rowport::export::{
    ExportOptions, export_file, export_filename, export_into_writer, export_to_dir,
};
use rowport::hooks::NoHooks;
use rowport::import::{ImportOptions, import_from_reader};
use rowport::store::{MemoryStore, RecordStore};
use rowport::types::{Record, unique_key};
use serde_json::{Value, json};
use tempfile::tempdir;

fn record(pairs: &[(&str, Value)]) -> Record {
    pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
}

#[test]
fn empty_collection_exports_nothing() {
    let store = MemoryStore::new();
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let report = export_file(&store, "users", &out, &ExportOptions::default(), &NoHooks).unwrap();
    assert!(report.is_none());
    assert!(!out.exists());
}

#[test]
fn header_is_sorted_union_minus_excluded() {
    let store = MemoryStore::new();
    store
        .insert(
            "t",
            vec![
                record(&[("b", json!("1")), ("a", json!("2"))]),
                record(&[("c", json!("3")), ("a", json!("4"))]),
            ],
        )
        .unwrap();
    let opts = ExportOptions {
        exclude_fields: vec!["c".into(), "id".into()],
        ..ExportOptions::default()
    };
    let mut buf: Vec<u8> = Vec::new();
    let report = export_into_writer(&store, "t", &mut buf, &opts, &NoHooks).unwrap().unwrap();
    assert_eq!(report.written, 2);

    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), "\"a\",\"b\"");
    // Missing fields render as empty cells; every field is quoted.
    assert_eq!(lines.next().unwrap(), "\"2\",\"1\"");
    assert_eq!(lines.next().unwrap(), "\"4\",\"\"");
}

#[test]
fn nested_values_are_json_stringified() {
    let store = MemoryStore::new();
    store.insert("t", vec![record(&[("name", json!("report")), ("tags", json!(["x", "y"]))])]).unwrap();
    let opts = ExportOptions { exclude_fields: vec!["id".into()], ..ExportOptions::default() };
    let mut buf: Vec<u8> = Vec::new();
    export_into_writer(&store, "t", &mut buf, &opts, &NoHooks).unwrap().unwrap();

    let mut rdr = csv::Reader::from_reader(Cursor::new(buf));
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(ToString::to_string).collect();
    assert_eq!(headers, vec!["name", "tags"]);
    let row = rdr.records().next().unwrap().unwrap();
    assert_eq!(row.get(1).unwrap(), "[\"x\",\"y\"]");
}

#[test]
fn export_file_overwrites_atomically() {
    let store = MemoryStore::new();
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let opts = ExportOptions::default();

    store.insert("t", vec![record(&[("name", json!("alice"))])]).unwrap();
    let first = export_file(&store, "t", &out, &opts, &NoHooks).unwrap().unwrap();
    assert_eq!(first.written, 1);

    store.insert("t", vec![record(&[("name", json!("bob"))])]).unwrap();
    let second = export_file(&store, "t", &out, &opts, &NoHooks).unwrap().unwrap();
    assert_eq!(second.written, 2);
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("alice") && text.contains("bob"));
}

#[test]
fn export_to_dir_uses_dated_name() {
    let store = MemoryStore::new();
    store.insert("contacts", vec![record(&[("name", json!("alice"))])]).unwrap();
    let dir = tempdir().unwrap();
    let opts = ExportOptions { filename: Some("contacts".into()), ..ExportOptions::default() };
    let path = export_to_dir(&store, "contacts", dir.path(), &opts, &NoHooks).unwrap().unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("contacts_export_"), "name: {name}");
    assert!(name.ends_with(".csv"));
    assert!(path.exists());
}

#[test]
fn export_filename_shape() {
    let name = export_filename("events");
    assert!(name.starts_with("events_export_"));
    assert!(name.ends_with(".csv"));
}

#[test]
fn round_trip_preserves_unique_set_even_with_delimiters() {
    let store = MemoryStore::new();
    store
        .insert(
            "vendors",
            vec![
                record(&[("name", json!("Acme, Inc.")), ("notes", json!("line one\nline two"))]),
                record(&[("name", json!("Bolt \"Fast\" LLC")), ("notes", json!("plain"))]),
            ],
        )
        .unwrap();

    let mut buf: Vec<u8> = Vec::new();
    export_into_writer(&store, "vendors", &mut buf, &ExportOptions::default(), &NoHooks)
        .unwrap()
        .unwrap();

    let target = MemoryStore::new();
    let opts = ImportOptions {
        collection: "vendors".into(),
        required_fields: vec!["name".into()],
        unique_field: "name".into(),
        ..ImportOptions::default()
    };
    let report = import_from_reader(&target, Cursor::new(buf.clone()), &opts, &NoHooks);
    assert!(report.success, "details: {}", report.details);
    assert_eq!(report.imported, 2);

    let keys = |s: &MemoryStore| -> std::collections::BTreeSet<String> {
        s.fetch_all("vendors").unwrap().iter().filter_map(|r| unique_key(r, "name")).collect()
    };
    assert_eq!(keys(&store), keys(&target));

    // Same bytes again: everything is already there.
    let again = import_from_reader(&target, Cursor::new(buf), &opts, &NoHooks);
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, 2);
}

#[tokio::test]
async fn concurrent_exports_spawn_blocking() {
    let store = Arc::new(MemoryStore::new());
    let batch: Vec<Record> =
        (0..200).map(|i| record(&[("i", json!(i)), ("name", json!("n"))])).collect();
    store.insert("users", batch).unwrap();

    let dir = tempdir().unwrap();
    let out1 = dir.path().join("a.csv");
    let out2 = dir.path().join("b.csv");
    let s1 = store.clone();
    let s2 = store.clone();
    let h1 = tokio::task::spawn_blocking(move || {
        export_file(&*s1, "users", &out1, &ExportOptions::default(), &NoHooks)
            .map(|r| r.map_or(0, |r| r.written))
    });
    let h2 = tokio::task::spawn_blocking(move || {
        export_file(&*s2, "users", &out2, &ExportOptions::default(), &NoHooks)
            .map(|r| r.map_or(0, |r| r.written))
    });
    let (a, b) = tokio::join!(h1, h2);
    assert_eq!(a.unwrap().unwrap(), 200);
    assert_eq!(b.unwrap().unwrap(), 200);
}
