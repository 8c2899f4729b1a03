pub mod cli;
pub mod config;
pub mod document;
pub mod io;
pub mod model;
pub mod session;
pub mod store;
pub mod util;

pub use config::Config;
pub use document::{
    export_steps, import_steps, parse_templates, suggested_filename, DocumentError,
    TemplateImportError,
};
pub use io::{DiskFileAccess, FileAccess, MockFileAccess, PickOutcome, SaveOutcome};
pub use model::{
    ColumnEntry, ColumnMap, ColumnType, DbSnapshot, DbTemplate, LineRange, StateMap, Step,
    StepPatch, TableType,
};
pub use session::{
    EditingStep, ExportOutcome, ImportOutcome, Session, SessionError, SnapshotMode, StepMode,
};
pub use store::{StepStore, StoreError, SyncOutcome, TemplateStore};
