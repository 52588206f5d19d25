use std::collections::HashMap;

use capacity::{normalize_entry, Category, Project, ProjectId, RawHourEntry, Window};
use itertools::Itertools;

/// One project's hours for a resource across the window, one cell per month.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub project_id: ProjectId,
    pub project_name: String,
    pub category: Option<Category>,
    pub folio: Option<String>,
    /// `None` where nothing is logged for that window month.
    pub hours: Vec<Option<f64>>,
}

impl AssignmentRow {
    pub fn new(project: &Project, hours: Vec<Option<f64>>) -> Self {
        Self {
            project_id: project.id,
            project_name: project.name.clone(),
            category: Some(project.category),
            folio: project.folio.clone(),
            hours,
        }
    }

    /// Groups raw entries by project, sorted by project name.
    ///
    /// Rows without a project id are skipped; rows that fail normalization
    /// keep their project visible but leave the month cell empty.
    pub fn from_entries(raw_entries: &[RawHourEntry], window: &Window) -> Vec<AssignmentRow> {
        let mut rows: HashMap<ProjectId, AssignmentRow> = HashMap::new();

        for raw in raw_entries {
            let Some(project_id) = raw.project_id.map(ProjectId::new) else {
                continue;
            };

            let row = rows.entry(project_id).or_insert_with(|| {
                let project = raw.project.clone().unwrap_or_default();
                AssignmentRow {
                    project_id,
                    project_name: project.name.unwrap_or_default(),
                    category: project.category.and_then(|c| c.parse().ok()),
                    folio: project.folio,
                    hours: vec![None; window.len()],
                }
            });

            let Some(entry) = normalize_entry(raw) else {
                continue;
            };
            if let Some(index) = window.position(&entry.period) {
                row.hours[index] = Some(entry.hours);
            }
        }

        rows.into_values()
            .sorted_by(|a, b| {
                a.project_name
                    .cmp(&b.project_name)
                    .then(a.project_id.cmp(&b.project_id))
            })
            .collect()
    }
}

/// Input for saving one assignment row.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveAssignmentRequest {
    pub project_id: ProjectId,
    /// Project the row showed before editing; differs from `project_id`
    /// when the resource is being moved to another project.
    pub previous_project_id: Option<ProjectId>,
    pub hours: Vec<Option<f64>>,
}

/// Result of a save, for updating the caller's table without a refetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedAssignment {
    pub row: AssignmentRow,
    pub written: u64,
    pub removed: u64,
}
