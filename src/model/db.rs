//! Database capture types shared by steps and the template library

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of database a snapshot was captured from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    Sql,
    Nosql,
}

impl TableType {
    pub fn label(&self) -> &'static str {
        match self {
            TableType::Sql => "SQL",
            TableType::Nosql => "NoSQL",
        }
    }
}

/// Column type tag, shared between serialization and display.
///
/// This is the single closed set; UI labels derive from `as_str` rather
/// than duplicating the literals anywhere else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Varchar,
    Boolean,
    Date,
    Time,
    Datetime,
    Timestamp,
    Decimal,
    Float,
    Double,
}

impl ColumnType {
    /// All column types, in display order
    pub const ALL: &'static [ColumnType] = &[
        ColumnType::Integer,
        ColumnType::Varchar,
        ColumnType::Boolean,
        ColumnType::Date,
        ColumnType::Time,
        ColumnType::Datetime,
        ColumnType::Timestamp,
        ColumnType::Decimal,
        ColumnType::Float,
        ColumnType::Double,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Varchar => "varchar",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Datetime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
        }
    }
}

/// One typed column value inside a snapshot.
///
/// Older documents stored column values as bare strings; those decode as
/// varchar (see [`crate::model::legacy`]). Serialization is always the
/// canonical `{"value": ..., "type": ...}` object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnEntry {
    pub value: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnEntry {
    pub fn new(value: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            value: value.into(),
            column_type,
        }
    }

    /// A bare-string legacy value, normalized to varchar
    pub fn varchar(value: impl Into<String>) -> Self {
        Self::new(value, ColumnType::Varchar)
    }
}

/// Column name to typed value, insertion order preserved for display
pub type ColumnMap = IndexMap<String, ColumnEntry>;

/// One table capture attached to a step.
///
/// `Deserialize` is implemented in [`crate::model::legacy`] so that
/// historical shapes (numeric type tag, bare-string columns) decode into
/// the canonical form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DbSnapshot {
    #[serde(rename = "dbType")]
    pub db_type: TableType,
    pub table_name: String,
    pub data: ColumnMap,
}

impl DbSnapshot {
    pub fn new(db_type: TableType, table_name: impl Into<String>) -> Self {
        Self {
            db_type,
            table_name: table_name.into(),
            data: ColumnMap::new(),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, entry: ColumnEntry) -> Self {
        self.data.insert(name.into(), entry);
        self
    }
}

/// Reusable table definition stored independently of any step.
///
/// Same shape as [`DbSnapshot`]; templates live in their own collection
/// and are always cloned when imported into a step, so later edits to a
/// template never reach steps that imported it earlier.
pub type DbTemplate = DbSnapshot;
