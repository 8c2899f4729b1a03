//! Export/import round-trip coverage
//!
//! The contract: re-importing an exported document reproduces the same
//! effective step data, with absent optional fields filled with export
//! defaults (empty string, empty state, empty db) and `line_number`
//! presence preserved exactly.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;
use serde_json::json;
use storyboard::{
    export_steps, import_steps, ColumnEntry, ColumnType, DbSnapshot, LineRange, StateMap, Step,
    TableType,
};

use super::common::{LEGACY_DOCUMENT, SAMPLE_DOCUMENT};

fn arb_state() -> impl Strategy<Value = StateMap> {
    vec(("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}"), 0..4).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(name, value)| (name, json!(value)))
            .collect()
    })
}

fn arb_snapshot() -> impl Strategy<Value = DbSnapshot> {
    (
        select(&[TableType::Sql, TableType::Nosql][..]),
        "[a-z_]{1,10}",
        vec(("[a-z]{1,8}", "[a-zA-Z0-9]{0,10}", select(ColumnType::ALL)), 0..4),
    )
        .prop_map(|(db_type, table_name, columns)| {
            let mut snapshot = DbSnapshot::new(db_type, table_name);
            for (name, value, column_type) in columns {
                snapshot
                    .data
                    .insert(name, ColumnEntry::new(value, column_type));
            }
            snapshot
        })
}

fn arb_line_range() -> impl Strategy<Value = LineRange> {
    (option::of(0u32..1000), option::of(0u32..1000))
        .prop_map(|(start, end)| LineRange { start, end })
}

fn arb_step() -> impl Strategy<Value = Step> {
    (
        "[a-zA-Z0-9-]{1,12}",
        option::of("[a-zA-Z0-9 .,]{0,30}"),
        option::of("[a-zA-Z0-9 ();={}]{0,30}"),
        option::of("[a-z/._-]{0,20}"),
        option::of(arb_line_range()),
        option::of(arb_state()),
        option::of(vec(arb_snapshot(), 0..3)),
    )
        .prop_map(
            |(key, description, code, location, line_number, state, db)| Step {
                key,
                description,
                code,
                location,
                line_number,
                state,
                db,
            },
        )
}

/// The defaults import fills for fields the source step omitted
fn with_import_defaults(mut step: Step) -> Step {
    step.description.get_or_insert_with(String::new);
    step.code.get_or_insert_with(String::new);
    step.location.get_or_insert_with(String::new);
    step.state.get_or_insert_with(StateMap::new);
    step.db.get_or_insert_with(Vec::new);
    step
}

proptest! {
    #[test]
    fn export_then_import_reproduces_steps_with_defaults(
        steps in vec(arb_step(), 0..6)
    ) {
        let exported = export_steps(&steps).unwrap();
        let imported = import_steps(exported.as_bytes()).unwrap();

        let expected: Vec<Step> = steps.into_iter().map(with_import_defaults).collect();
        prop_assert_eq!(imported, expected);
    }

    #[test]
    fn a_second_round_trip_is_a_fixed_point(steps in vec(arb_step(), 0..4)) {
        let once = import_steps(export_steps(&steps).unwrap().as_bytes()).unwrap();
        let twice = import_steps(export_steps(&once).unwrap().as_bytes()).unwrap();
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn sample_document_round_trips_field_for_field() {
    let imported = import_steps(SAMPLE_DOCUMENT.as_bytes()).unwrap();
    assert_eq!(imported.len(), 2);
    assert_eq!(
        imported[0].line_number,
        Some(LineRange {
            start: Some(10),
            end: Some(14)
        })
    );
    assert_eq!(imported[1].line_number, None);

    let re_exported = export_steps(&imported).unwrap();
    let re_imported = import_steps(re_exported.as_bytes()).unwrap();
    assert_eq!(re_imported, imported);
}

#[test]
fn legacy_shapes_normalize_into_the_canonical_document() {
    let imported = import_steps(LEGACY_DOCUMENT.as_bytes()).unwrap();
    assert_eq!(imported.len(), 4);

    // bare placeholder gets defaults only
    assert_eq!(imported[0].description.as_deref(), Some(""));

    // free-form value lands in the description
    assert_eq!(
        imported[1].description.as_deref(),
        Some("notes from the first draft")
    );

    // nested value object is lifted
    assert_eq!(imported[2].description.as_deref(), Some("d"));
    assert_eq!(imported[2].code.as_deref(), Some("c"));

    // numeric snapshot tag and bare-string column are normalized
    let db = imported[3].db.as_ref().unwrap();
    assert_eq!(db[0].db_type, TableType::Nosql);
    assert_eq!(db[0].data["at"], ColumnEntry::varchar("noon"));

    // once normalized, the canonical export is stable
    let re_exported = export_steps(&imported).unwrap();
    let re_imported = import_steps(re_exported.as_bytes()).unwrap();
    assert_eq!(re_imported, imported);
}
