//! Portable JSON document handling: export, import, template bridge

pub mod export;
pub mod import;
pub mod template;

use thiserror::Error;

pub use export::{export_document, export_steps, export_steps_compact, suggested_filename};
pub use import::import_steps;
pub use template::{import_templates_into, parse_templates, TemplateImportError};

#[derive(Debug, Error)]
pub enum DocumentError {
    /// The payload is not valid JSON at all
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Valid JSON, but the top-level "steps" field is missing or not an array
    #[error("malformed import document: missing or invalid \"steps\" array")]
    MalformedImport,
    /// Valid JSON, but the top-level "dbTemplates" field is missing or not an array
    #[error("invalid template document: missing or invalid \"dbTemplates\" array")]
    InvalidTemplateDocument,
}
