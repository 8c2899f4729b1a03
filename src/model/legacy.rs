//! Normalization of historically-seen document shapes
//!
//! Storyboard documents have gone through several incompatible step shapes:
//! a bare `{key}` placeholder, `{key, value}` with a free-form string,
//! `{key, value: {...}}` with nested fields, and the flattened canonical
//! form. Snapshots similarly drifted: the type tag was once the numeric
//! field `"db": 0|1` before becoming `"dbType": "sql"|"nosql"`, and column
//! values were once bare strings. Everything here converts exactly once at
//! the document boundary; mixed shapes never travel further in.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::db::{ColumnEntry, ColumnMap, ColumnType, DbSnapshot, TableType};
use super::step::{LineRange, StateMap, Step};

/// Column value as found on disk: canonical typed object or legacy bare string
#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumn {
    Typed {
        value: String,
        #[serde(rename = "type")]
        column_type: ColumnType,
    },
    Bare(String),
}

impl From<RawColumn> for ColumnEntry {
    fn from(raw: RawColumn) -> Self {
        match raw {
            RawColumn::Typed { value, column_type } => ColumnEntry::new(value, column_type),
            // Bare strings predate typed columns and were always varchar
            RawColumn::Bare(value) => ColumnEntry::varchar(value),
        }
    }
}

/// Snapshot as found on disk, tolerating the legacy numeric type tag
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(rename = "dbType")]
    db_type: Option<TableType>,
    /// Legacy tag written by the old create-database form: 0 = SQL, 1 = NoSQL
    db: Option<u8>,
    #[serde(default)]
    table_name: String,
    #[serde(default)]
    data: IndexMap<String, RawColumn>,
}

impl From<RawSnapshot> for DbSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let db_type = raw.db_type.unwrap_or(match raw.db {
            Some(1) => TableType::Nosql,
            _ => TableType::Sql,
        });
        let data: ColumnMap = raw
            .data
            .into_iter()
            .map(|(name, value)| (name, value.into()))
            .collect();
        DbSnapshot {
            db_type,
            table_name: raw.table_name,
            data,
        }
    }
}

impl<'de> Deserialize<'de> for DbSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawSnapshot::deserialize(deserializer).map(Into::into)
    }
}

/// Decode one raw snapshot value, dropping entries that are not snapshots
/// at all (logged, never fatal)
pub fn normalize_snapshot(raw: &Value) -> Option<DbSnapshot> {
    match serde_json::from_value::<DbSnapshot>(raw.clone()) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "Dropping undecodable db snapshot entry");
            None
        }
    }
}

/// Convert one raw step entry (any historical shape) into a canonical
/// [`Step`] with import defaults filled in.
///
/// `position` is the zero-based index in the document, used to synthesize
/// a `Step-<n>` key when the entry has none. Missing optional fields
/// default to the same values export writes: empty strings, empty state,
/// empty db. `line_number` is the exception and stays absent when absent.
pub fn normalize_step(raw: &Value, position: usize) -> Step {
    let synthesized_key = || format!("Step-{}", position + 1);

    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            warn!(position, "Step entry is not an object; importing as placeholder");
            return filled_defaults(Step::with_key(synthesized_key()));
        }
    };

    let key = obj
        .get("key")
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(synthesized_key);

    // Shape detection keys on the presence and type of `value`
    let fields = match obj.get("value") {
        // {key, value: "free text"}: the free-form value becomes the description
        Some(Value::String(text)) => {
            let mut step = Step::with_key(key);
            step.description = Some(text.clone());
            return filled_defaults(step);
        }
        // {key, value: {...}}: fields live one level down
        Some(Value::Object(nested)) => nested,
        // Flattened canonical shape (or bare {key} placeholder)
        _ => obj,
    };

    let mut step = Step::with_key(key);
    step.description = string_field(fields, "description");
    step.code = string_field(fields, "code");
    step.location = string_field(fields, "location");
    step.line_number = fields
        .get("line_number")
        .and_then(|v| serde_json::from_value::<LineRange>(v.clone()).ok());
    step.state = fields.get("state").and_then(Value::as_object).cloned();
    step.db = fields.get("db").and_then(Value::as_array).map(|entries| {
        entries.iter().filter_map(normalize_snapshot).collect()
    });

    filled_defaults(step)
}

fn string_field(obj: &StateMap, name: &str) -> Option<String> {
    obj.get(name).and_then(Value::as_str).map(str::to_owned)
}

/// Fill import defaults: absent strings become empty, absent state/db
/// become empty collections. `line_number` is left alone.
fn filled_defaults(mut step: Step) -> Step {
    step.description.get_or_insert_with(String::new);
    step.code.get_or_insert_with(String::new);
    step.location.get_or_insert_with(String::new);
    step.state.get_or_insert_with(StateMap::new);
    step.db.get_or_insert_with(Vec::new);
    step
}
