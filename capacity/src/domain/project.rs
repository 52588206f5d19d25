use serde::Serialize;

use super::{Category, ProjectId};
use crate::ValidationError;

/// A work item or maintenance ticket that hours are logged against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub category: Category,
    /// External reference, e.g. a ticket folio.
    pub folio: Option<String>,
}

/// Validated input for creating or updating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub category: Category,
    pub folio: Option<String>,
}

impl NewProject {
    pub fn new(
        name: &str,
        category: Category,
        folio: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let folio = folio
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        Ok(Self {
            name: name.to_string(),
            category,
            folio,
        })
    }

    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            category: self.category,
            folio: self.folio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_name_and_drops_blank_folio() {
        let project = NewProject::new(" Portal ", Category::Project, Some("  ")).unwrap();
        assert_eq!(project.name, "Portal");
        assert_eq!(project.folio, None);
    }

    #[test]
    fn keeps_trimmed_folio() {
        let project = NewProject::new("Soporte", Category::Maintenance, Some(" F-12 ")).unwrap();
        assert_eq!(project.folio.as_deref(), Some("F-12"));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            NewProject::new("\t", Category::Project, None).unwrap_err(),
            ValidationError::EmptyName
        );
    }
}
