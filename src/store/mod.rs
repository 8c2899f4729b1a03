//! Pure copy-on-write stores for steps and templates

pub mod steps;
pub mod templates;

pub use steps::{StepStore, StoreError, SyncOutcome};
pub use templates::TemplateStore;
