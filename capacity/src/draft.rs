use std::collections::HashMap;

use crate::{Category, Project};

/// Pending display values for a row whose project selection changed but has
/// not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftDisplay {
    pub category: Category,
    pub folio: Option<String>,
}

/// Short-lived overrides keyed by row identity.
///
/// Owned by whichever session is editing; the reconciler never reads it.
#[derive(Debug, Clone, Default)]
pub struct DraftOverrides {
    rows: HashMap<String, DraftDisplay>,
}

impl DraftOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the display values of the newly selected project.
    pub fn select(&mut self, row_id: impl Into<String>, project: &Project) {
        self.rows.insert(
            row_id.into(),
            DraftDisplay {
                category: project.category,
                folio: project.folio.clone(),
            },
        );
    }

    pub fn get(&self, row_id: &str) -> Option<&DraftDisplay> {
        self.rows.get(row_id)
    }

    /// Category to show: the pending override, else the saved value.
    pub fn category_or(&self, row_id: &str, saved: Option<Category>) -> Option<Category> {
        self.get(row_id).map(|d| d.category).or(saved)
    }

    pub fn folio_or<'a>(&'a self, row_id: &str, saved: Option<&'a str>) -> Option<&'a str> {
        match self.get(row_id) {
            Some(draft) => draft.folio.as_deref(),
            None => saved,
        }
    }

    /// Drops the override once the row is saved or the edit is cancelled.
    pub fn clear(&mut self, row_id: &str) -> Option<DraftDisplay> {
        self.rows.remove(row_id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
