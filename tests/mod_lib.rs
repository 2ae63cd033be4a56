use rowport::Porter;
use rowport::export::ExportOptions;
use rowport::hooks::NoHooks;
use rowport::import::ImportOptions;
use rowport::store::RecordStore;
use tempfile::tempdir;

#[test]
fn porter_end_to_end_with_file_store() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("crm.json");
    let csv_path = dir.path().join("contacts.csv");
    std::fs::write(&csv_path, "name,email\nAlice,a@x.io\nBob,b@x.io\nalice,A@X.IO\n").unwrap();

    let porter = Porter::open(&store_path).unwrap();
    let opts = ImportOptions {
        collection: "contacts".into(),
        required_fields: vec!["name".into(), "email".into()],
        unique_field: "email".into(),
        ..ImportOptions::default()
    };
    let report = porter.import_csv(&csv_path, &opts, &NoHooks);
    assert!(report.success);
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 1);

    let out = dir.path().join("contacts_out.csv");
    let exported = porter
        .export_csv("contacts", &out, &ExportOptions::default(), &NoHooks)
        .unwrap()
        .unwrap();
    assert_eq!(exported.written, 2);

    // The same store reopened still answers queries.
    drop(porter);
    let porter = Porter::open(&store_path).unwrap();
    assert_eq!(porter.store().count("contacts").unwrap(), 2);
}

#[test]
fn porter_in_memory_starts_empty() {
    let porter = Porter::in_memory();
    assert!(porter.store().list_collections().unwrap().is_empty());
}
