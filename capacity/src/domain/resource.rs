use serde::Serialize;

use super::ResourceId;
use crate::{clamp_percent, ValidationError};

/// A person or capacity unit with an hours budget split across categories.
///
/// The two percentages are independent; they are not required to add up
/// to 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub project_percent: f64,
    pub maintenance_percent: f64,
    pub total_hours: f64,
}

/// Hour budgets derived from a resource's percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub project: f64,
    pub maintenance: f64,
    pub total: f64,
}

impl Resource {
    /// Derives capacities from the current percentages. Never cached.
    pub fn capacity(&self) -> Capacity {
        Capacity {
            project: derive_capacity(self.total_hours, self.project_percent),
            maintenance: derive_capacity(self.total_hours, self.maintenance_percent),
            total: self.total_hours,
        }
    }
}

/// `round(total_hours * percent / 100)`, rounding half away from zero.
pub fn derive_capacity(total_hours: f64, percent: f64) -> f64 {
    (total_hours * percent / 100.0).round()
}

/// Validated input for creating or updating a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub project_percent: f64,
    pub maintenance_percent: f64,
    pub total_hours: f64,
}

impl NewResource {
    /// Trims the name and clamps percentages to [0, 100].
    pub fn new(
        name: &str,
        project_percent: f64,
        maintenance_percent: f64,
        total_hours: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !total_hours.is_finite() || total_hours < 0.0 {
            return Err(ValidationError::InvalidTotalHours);
        }

        Ok(Self {
            name: name.to_string(),
            project_percent: clamp_percent(project_percent),
            maintenance_percent: clamp_percent(maintenance_percent),
            total_hours,
        })
    }

    pub fn into_resource(self, id: ResourceId) -> Resource {
        Resource {
            id,
            name: self.name,
            project_percent: self.project_percent,
            maintenance_percent: self.maintenance_percent,
            total_hours: self.total_hours,
        }
    }
}
