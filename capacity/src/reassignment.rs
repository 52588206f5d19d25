use crate::{HourEntryKey, HourEntryWrite, MonthYear, ProjectId, ResourceId, ValidationError, Window};

/// Two-phase plan for saving one assignment row.
///
/// The upsert phase always runs first. The cleanup phase removes the
/// previous project's hours for the window and only runs after the upsert
/// phase wrote at least one row, so a failure in between leaves the old
/// hours in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ReassignmentPlan {
    pub upserts: Vec<HourEntryWrite>,
    pub cleanup: Option<Cleanup>,
}

/// Hours of `project_id` to delete for `resource_id` in `months`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleanup {
    pub resource_id: ResourceId,
    pub project_id: ProjectId,
    pub months: Vec<MonthYear>,
}

impl ReassignmentPlan {
    /// `hours` holds one cell per window month; `None` leaves that month
    /// untouched.
    pub fn build(
        resource_id: ResourceId,
        project_id: ProjectId,
        previous_project_id: Option<ProjectId>,
        window: &Window,
        hours: &[Option<f64>],
    ) -> Result<Self, ValidationError> {
        if hours.len() != window.len() {
            return Err(ValidationError::WindowMismatch {
                expected: window.len(),
                actual: hours.len(),
            });
        }

        let upserts = window
            .iter()
            .zip(hours)
            .filter_map(|(period, cell)| cell.map(|h| (*period, h)))
            .map(|(period, h)| {
                let key = HourEntryKey {
                    resource_id,
                    project_id,
                    period,
                };
                HourEntryWrite::new(key, h)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cleanup = previous_project_id
            .filter(|previous| *previous != project_id)
            .map(|previous| Cleanup {
                resource_id,
                project_id: previous,
                months: window.months().to_vec(),
            });

        Ok(Self { upserts, cleanup })
    }

    /// The cleanup to run once the upsert phase reported `written` rows.
    pub fn cleanup_after(&self, written: u64) -> Option<&Cleanup> {
        if written == 0 {
            return None;
        }
        self.cleanup.as_ref()
    }

    pub fn is_reassignment(&self) -> bool {
        self.cleanup.is_some()
    }
}
