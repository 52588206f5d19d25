use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Which capacity bucket a project's hours count toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    #[serde(alias = "Proyecto")]
    Project,
    #[serde(alias = "Mtto", alias = "Mantenimiento")]
    Maintenance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Project => "Project",
            Category::Maintenance => "Maintenance",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    /// Accepts the English tags as well as the legacy labels stored by
    /// older rows ("Proyecto", "Mtto").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "project" | "proyecto" => Ok(Category::Project),
            "maintenance" | "mtto" | "mantenimiento" => Ok(Category::Maintenance),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}
