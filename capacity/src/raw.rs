//! Rows as they come out of storage, before normalization.
//!
//! Numeric fields are kept as [`serde_json::Value`] because rows may be
//! incomplete or carry strings where numbers are expected. Field aliases
//! cover the column names used by older exports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHourEntry {
    #[serde(default, alias = "resource_id", alias = "recurso_id")]
    pub resource_id: Option<i32>,
    #[serde(default, alias = "project_id", alias = "proyecto_id")]
    pub project_id: Option<i32>,
    #[serde(default, alias = "mes")]
    pub month: Value,
    #[serde(default, alias = "anio")]
    pub year: Value,
    #[serde(default, alias = "horas")]
    pub hours: Value,
    /// Explicit category tag; wins over the joined project's category.
    #[serde(default, alias = "tipo")]
    pub category: Option<String>,
    #[serde(default, alias = "proyectos")]
    pub project: Option<RawProjectRef>,
}

/// Project columns joined onto an hour-entry row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProjectRef {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "tipo")]
    pub category: Option<String>,
    #[serde(default)]
    pub folio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResource {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default, alias = "recurso")]
    pub name: Option<String>,
    #[serde(default, alias = "porcProyecto")]
    pub project_percent: Value,
    #[serde(default, alias = "porcMtto")]
    pub maintenance_percent: Value,
    #[serde(default, alias = "totalHoras")]
    pub total_hours: Value,
}
