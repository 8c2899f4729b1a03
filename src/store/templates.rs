//! Reusable table template collection
//!
//! Templates live independently of any step and act purely as a copy
//! source; the import bridge clones them into a step's snapshot list, so
//! later template edits never reach steps that imported earlier.

use crate::model::DbTemplate;

/// Append-only collection of table templates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateStore {
    templates: Vec<DbTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template, returning the new collection value
    pub fn add(&self, template: DbTemplate) -> Self {
        let mut templates = self.templates.clone();
        templates.push(template);
        Self { templates }
    }

    pub fn templates(&self) -> &[DbTemplate] {
        &self.templates
    }

    pub fn get(&self, index: usize) -> Option<&DbTemplate> {
        self.templates.get(index)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
