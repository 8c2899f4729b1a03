//! Canonical data model for storyboard steps and database captures

pub mod db;
pub mod legacy;
pub mod step;

pub use db::{ColumnEntry, ColumnMap, ColumnType, DbSnapshot, DbTemplate, TableType};
pub use legacy::{normalize_snapshot, normalize_step};
pub use step::{LineRange, StateMap, Step, StepPatch};
