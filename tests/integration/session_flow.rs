//! End-to-end session flows over the mock file capability

use serde_json::json;
use storyboard::{
    ImportOutcome, MockFileAccess, Session, SnapshotMode, StepMode, StepPatch, StepStore,
};

use super::common::{described_step, sql_snapshot};

/// Create, duplicate, export, re-import: the imported sequence carries the
/// same content with export defaults filled in.
#[tokio::test]
async fn create_duplicate_export_import_flow() {
    let mut session = Session::new();
    session
        .commit_step(StepMode::Create, StepPatch::default().description("init"))
        .unwrap();
    session.duplicate_step(0).unwrap();
    assert_eq!(session.steps().len(), 2);

    let sink = MockFileAccess::new();
    session.export_to(&sink, None).await.unwrap();
    let saved = sink.saved_documents();
    assert_eq!(saved.len(), 1);
    let (name, bytes) = &saved[0];
    assert!(name.starts_with("codestoryboard-export-"));
    assert!(name.ends_with(".json"));

    let mut fresh = Session::new();
    let source = MockFileAccess::new().with_document(name.clone(), bytes.clone());
    let outcome = fresh.import_from(&source).await.unwrap();
    assert_eq!(outcome, ImportOutcome::Replaced { count: 2 });

    for step in fresh.steps().steps() {
        assert_eq!(step.description.as_deref(), Some("init"));
        assert_eq!(step.code.as_deref(), Some(""));
        assert_eq!(step.location.as_deref(), Some(""));
        assert_eq!(step.line_number, None);
    }
}

/// Templates added to the library stay copies: importing them into a step
/// and then mutating the step never reaches the library entry.
#[test]
fn template_library_keeps_copy_semantics() {
    let mut session = Session::seeded(StepStore::from_steps(vec![described_step("s1", "init")]));
    session.add_template(sql_snapshot("users")).unwrap();

    let document = serde_json::to_vec(&json!({
        "dbTemplates": [{
            "dbType": "sql",
            "table_name": "users",
            "data": {"id": {"value": "1", "type": "integer"}}
        }]
    }))
    .unwrap();
    session.import_templates(0, &document).unwrap();

    // replace the imported snapshot on the step
    session
        .commit_snapshot(0, sql_snapshot("orders"), SnapshotMode::Replace(0))
        .unwrap();

    assert_eq!(session.templates().get(0).unwrap().table_name, "users");
    let db = session.steps().get(0).unwrap().db.as_ref().unwrap();
    assert_eq!(db[0].table_name, "orders");
}

/// A failed template import must not disturb the step it targeted.
#[test]
fn failed_template_import_preserves_existing_snapshots() {
    let mut session = Session::seeded(StepStore::from_steps(vec![described_step("s1", "init")]));
    session
        .commit_snapshot(0, sql_snapshot("existing"), SnapshotMode::Append)
        .unwrap();

    let err = session.import_templates(0, br#"{"dbTemplates": "not-an-array"}"#);
    assert!(err.is_err());

    let db = session.steps().get(0).unwrap().db.as_ref().unwrap();
    assert_eq!(db.len(), 1);
    assert_eq!(db[0].table_name, "existing");
}

/// Syncing down a storyboard: each step inherits the previous step's
/// snapshots without sharing storage with it.
#[test]
fn sync_db_chains_without_aliasing() {
    let mut session = Session::new();
    for i in 0..3 {
        session
            .commit_step(
                StepMode::Create,
                StepPatch::default().description(format!("step {i}")),
            )
            .unwrap();
    }
    session
        .commit_snapshot(0, sql_snapshot("users"), SnapshotMode::Append)
        .unwrap();

    session.sync_db(1).unwrap();
    session.sync_db(2).unwrap();

    // replacing step 2's copy leaves steps 0 and 1 untouched
    session
        .commit_snapshot(2, sql_snapshot("orders"), SnapshotMode::Replace(0))
        .unwrap();

    let table_at = |i: usize| {
        session.steps().get(i).unwrap().db.as_ref().unwrap()[0]
            .table_name
            .clone()
    };
    assert_eq!(table_at(0), "users");
    assert_eq!(table_at(1), "users");
    assert_eq!(table_at(2), "orders");
}
