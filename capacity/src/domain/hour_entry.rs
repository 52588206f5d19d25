use serde::Serialize;

use super::{Category, MonthYear, ProjectId, ResourceId};
use crate::ValidationError;

/// A normalized hour entry for one resource.
///
/// `project_id` is absent when the source row did not carry one; such
/// entries still count toward their category but take no part in
/// duplicate-key detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourEntry {
    pub project_id: Option<ProjectId>,
    pub period: MonthYear,
    pub category: Category,
    pub hours: f64,
}

/// Composite key of a stored hour entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourEntryKey {
    pub resource_id: ResourceId,
    pub project_id: ProjectId,
    pub period: MonthYear,
}

/// A validated write for the hour-entry store.
///
/// Replaying the same write is safe: storage upserts on [`HourEntryKey`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourEntryWrite {
    pub key: HourEntryKey,
    pub hours: f64,
}

impl HourEntryWrite {
    pub fn new(key: HourEntryKey, hours: f64) -> Result<Self, ValidationError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(ValidationError::InvalidHours);
        }

        Ok(Self { key, hours })
    }

    /// Builds a write from loosely-typed input, rejecting any absent field.
    pub fn from_parts(
        resource_id: Option<i32>,
        project_id: Option<i32>,
        month: Option<i64>,
        year: Option<i32>,
        hours: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let resource_id = resource_id.ok_or(ValidationError::MissingField("resourceId"))?;
        let project_id = project_id.ok_or(ValidationError::MissingField("projectId"))?;
        let month = month.ok_or(ValidationError::MissingField("month"))?;
        let year = year.ok_or(ValidationError::MissingField("year"))?;
        let hours = hours.ok_or(ValidationError::MissingField("hours"))?;

        let month = u8::try_from(month).map_err(|_| ValidationError::InvalidMonth(month))?;
        let key = HourEntryKey {
            resource_id: ResourceId::new(resource_id),
            project_id: ProjectId::new(project_id),
            period: MonthYear::new(month, year)?,
        };

        Self::new(key, hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_reports_first_missing_field() {
        let err = HourEntryWrite::from_parts(Some(1), None, Some(3), Some(2025), Some(8.0))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("projectId"));

        let err = HourEntryWrite::from_parts(Some(1), Some(2), Some(3), Some(2025), None)
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("hours"));
    }

    #[test]
    fn from_parts_validates_month_and_hours() {
        assert_eq!(
            HourEntryWrite::from_parts(Some(1), Some(2), Some(300), Some(2025), Some(1.0))
                .unwrap_err(),
            ValidationError::InvalidMonth(300)
        );
        assert_eq!(
            HourEntryWrite::from_parts(Some(1), Some(2), Some(3), Some(2025), Some(-1.0))
                .unwrap_err(),
            ValidationError::InvalidHours
        );
    }

    #[test]
    fn zero_hours_is_a_valid_write() {
        let write =
            HourEntryWrite::from_parts(Some(1), Some(2), Some(12), Some(2025), Some(0.0)).unwrap();
        assert_eq!(write.key.period.month, 12);
        assert_eq!(write.hours, 0.0);
    }
}
