use capacity::{
    Category, HourEntryWrite, MonthYear, NewProject, NewResource, Project, ProjectId,
    RawHourEntry, RawProjectRef, RawResource,
};
use serde_json::json;

use crate::domain::AllocationError;
use crate::repositories::{
    DatabaseHourEntry, DatabasePeriod, DatabaseProject, DatabaseResource, NewDatabaseHourEntry,
    NewDatabaseProject, NewDatabaseResource,
};

/// Convert a resource row to the raw shape the normalizer consumes.
pub fn to_raw_resource(row: DatabaseResource) -> RawResource {
    RawResource {
        id: Some(row.id),
        name: Some(row.name),
        project_percent: json!(row.project_percent),
        maintenance_percent: json!(row.maintenance_percent),
        total_hours: json!(row.total_hours),
    }
}

pub fn to_db_resource(resource: &NewResource) -> NewDatabaseResource {
    NewDatabaseResource {
        name: resource.name.clone(),
        project_percent: resource.project_percent,
        maintenance_percent: resource.maintenance_percent,
        total_hours: resource.total_hours,
    }
}

/// Convert a project row, failing on a category label nothing recognizes.
pub fn to_domain_project(row: DatabaseProject) -> Result<Project, AllocationError> {
    let category: Category = row.category.parse().map_err(|_| {
        AllocationError::storage(format!(
            "project {} has unknown category '{}'",
            row.id, row.category
        ))
    })?;

    Ok(Project {
        id: ProjectId::new(row.id),
        name: row.name,
        category,
        folio: row.folio,
    })
}

pub fn to_db_project(project: &NewProject) -> NewDatabaseProject {
    NewDatabaseProject {
        name: project.name.clone(),
        category: project.category.as_str().to_string(),
        folio: project.folio.clone(),
    }
}

pub fn to_raw_hour_entry(row: DatabaseHourEntry) -> RawHourEntry {
    RawHourEntry {
        resource_id: Some(row.resource_id),
        project_id: Some(row.project_id),
        month: json!(row.month),
        year: json!(row.year),
        hours: json!(row.hours),
        category: None,
        project: Some(RawProjectRef {
            name: row.project_name,
            category: row.project_category,
            folio: row.project_folio,
        }),
    }
}

pub fn to_db_period(period: &MonthYear) -> DatabasePeriod {
    DatabasePeriod {
        year: period.year,
        month: i16::from(period.month),
    }
}

pub fn to_db_hour_entry(write: &HourEntryWrite) -> NewDatabaseHourEntry {
    NewDatabaseHourEntry {
        resource_id: write.key.resource_id.as_i32(),
        project_id: write.key.project_id.as_i32(),
        year: write.key.period.year,
        month: i16::from(write.key.period.month),
        hours: write.hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capacity::{normalize_entry, normalize_resource};

    #[test]
    fn legacy_category_labels_are_accepted() {
        let project = to_domain_project(DatabaseProject {
            id: 3,
            name: "Soporte".to_string(),
            category: "Mtto".to_string(),
            folio: None,
        })
        .unwrap();

        assert_eq!(project.category, Category::Maintenance);
    }

    #[test]
    fn unknown_category_is_a_storage_error() {
        let err = to_domain_project(DatabaseProject {
            id: 3,
            name: "Soporte".to_string(),
            category: "Vacaciones".to_string(),
            folio: None,
        })
        .unwrap_err();

        assert!(matches!(err, AllocationError::Storage(_)));
    }

    #[test]
    fn hour_entry_rows_normalize_with_joined_category() {
        let raw = to_raw_hour_entry(DatabaseHourEntry {
            resource_id: 1,
            project_id: 2,
            month: 4,
            year: 2025,
            hours: 12.5,
            project_name: Some("Portal".to_string()),
            project_category: Some("Proyecto".to_string()),
            project_folio: None,
        });

        let entry = normalize_entry(&raw).unwrap();
        assert_eq!(entry.category, Category::Project);
        assert_eq!(entry.period, MonthYear::new(4, 2025).unwrap());
        assert_eq!(entry.hours, 12.5);
    }

    #[test]
    fn resource_rows_keep_their_numbers() {
        let resource = normalize_resource(&to_raw_resource(DatabaseResource {
            id: 9,
            name: "Ana".to_string(),
            project_percent: 55.0,
            maintenance_percent: 45.0,
            total_hours: 162.0,
        }));

        assert_eq!(resource.id.as_i32(), 9);
        assert_eq!(resource.capacity().project, 89.0);
    }
}
