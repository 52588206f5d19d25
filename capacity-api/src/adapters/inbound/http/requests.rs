//! HTTP request bodies and query strings for allocation endpoints.
//!
//! Bodies accept the legacy Spanish field names as aliases so older
//! clients keep working.

use capacity::{
    coerce_percent, Category, HourEntryWrite, MonthYear, NewProject, NewResource, ProjectId,
    ValidationError, Window,
};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::models::SaveAssignmentRequest;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    #[serde(default, alias = "recurso")]
    pub name: String,
    /// Number or string such as `"55%"`.
    #[serde(default, alias = "porcProyecto")]
    pub project_percent: Value,
    #[serde(default, alias = "porcMtto")]
    pub maintenance_percent: Value,
    #[serde(default, alias = "totalHoras")]
    pub total_hours: Value,
}

impl TryFrom<ResourceRequest> for NewResource {
    type Error = ValidationError;

    fn try_from(req: ResourceRequest) -> Result<Self, Self::Error> {
        let total_hours = match &req.total_hours {
            Value::Null => 0.0,
            Value::Number(n) => n.as_f64().ok_or(ValidationError::InvalidTotalHours)?,
            Value::String(s) if s.trim().is_empty() => 0.0,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidTotalHours)?,
            _ => return Err(ValidationError::InvalidTotalHours),
        };

        NewResource::new(
            &req.name,
            coerce_percent(&req.project_percent),
            coerce_percent(&req.maintenance_percent),
            total_hours,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default, alias = "nombre")]
    pub name: String,
    #[serde(alias = "tipo")]
    pub category: String,
    #[serde(default)]
    pub folio: Option<String>,
}

impl TryFrom<ProjectRequest> for NewProject {
    type Error = ValidationError;

    fn try_from(req: ProjectRequest) -> Result<Self, Self::Error> {
        let category: Category = req.category.parse()?;
        NewProject::new(&req.name, category, req.folio.as_deref())
    }
}

/// One assignment row as edited in the table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssignmentBody {
    pub project_id: i32,
    #[serde(default)]
    pub previous_project_id: Option<i32>,
    /// One cell per window month; `null` leaves the month untouched.
    pub hours: Vec<Option<f64>>,
}

impl From<SaveAssignmentBody> for SaveAssignmentRequest {
    fn from(body: SaveAssignmentBody) -> Self {
        Self {
            project_id: ProjectId::new(body.project_id),
            previous_project_id: body.previous_project_id.map(ProjectId::new),
            hours: body.hours,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourEntryBody {
    #[serde(default, alias = "recurso_id")]
    pub resource_id: Option<i32>,
    #[serde(default, alias = "proyecto_id")]
    pub project_id: Option<i32>,
    #[serde(default, alias = "mes")]
    pub month: Option<i64>,
    #[serde(default, alias = "anio")]
    pub year: Option<i32>,
    #[serde(default, alias = "horas")]
    pub hours: Option<f64>,
}

impl TryFrom<HourEntryBody> for HourEntryWrite {
    type Error = ValidationError;

    fn try_from(body: HourEntryBody) -> Result<Self, Self::Error> {
        HourEntryWrite::from_parts(
            body.resource_id,
            body.project_id,
            body.month,
            body.year,
            body.hours,
        )
    }
}

/// Optional start of the rolling window; defaults to the current month.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowQuery {
    pub start_month: Option<u8>,
    pub start_year: Option<i32>,
}

impl WindowQuery {
    pub fn window(&self, len: usize) -> Result<Window, ValidationError> {
        let start = month_or_current(self.start_month, self.start_year)?;
        Window::rolling(start, len)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<u8>,
    pub year: Option<i32>,
}

impl MonthQuery {
    pub fn month_year(&self) -> Result<MonthYear, ValidationError> {
        month_or_current(self.month, self.year)
    }
}

fn month_or_current(month: Option<u8>, year: Option<i32>) -> Result<MonthYear, ValidationError> {
    let current = MonthYear::current();
    MonthYear::new(
        month.unwrap_or(current.month),
        year.unwrap_or(current.year),
    )
}
