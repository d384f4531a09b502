//! Dataset records

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "Active"),
            ProjectStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// One material specified somewhere in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsage {
    /// Catalog material name
    pub material: String,
    #[serde(default)]
    pub locations: Vec<String>,
    /// Covered area in m²
    #[serde(default)]
    pub area: Option<f64>,
    /// Unit count for materials not measured by area
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl MaterialUsage {
    /// Amount the unit price applies to: area when known, otherwise quantity
    pub fn billable_amount(&self) -> Option<f64> {
        self.area.or(self.quantity.map(f64::from))
    }
}

/// A studio project with its specified materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub client: String,
    /// Residential, Commercial, Hospitality...
    pub project_type: String,
    pub status: ProjectStatus,
    pub started_on: NaiveDate,
    #[serde(default)]
    pub materials: Vec<MaterialUsage>,
}

/// Catalog entry for a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: u32,
    pub name: String,
    /// Material type (Flooring, Paint, Stone...)
    pub category: String,
    pub manufacturer: String,
    /// Price per m² or per unit
    #[serde(default)]
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub discontinued: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u32,
    pub name: String,
    pub reliability: String,
    pub lead_time: String,
}

/// Everything a report can draw on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub manufacturers: Vec<Manufacturer>,
}

impl Dataset {
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Projects that specify the named material, in dataset order
    pub fn projects_using<'a>(&'a self, material: &'a str) -> impl Iterator<Item = &'a Project> {
        self.projects
            .iter()
            .filter(move |p| p.materials.iter().any(|u| u.material == material))
    }

    /// Check referential integrity of the records
    pub fn validate(&self) -> Result<()> {
        let mut materials = HashSet::new();
        for material in &self.materials {
            if !materials.insert(material.name.as_str()) {
                return Err(Error::DataSource(format!(
                    "duplicate material name '{}'",
                    material.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.name.as_str()) {
                return Err(Error::DataSource(format!(
                    "duplicate project name '{}'",
                    project.name
                )));
            }
            for usage in &project.materials {
                if self.material(&usage.material).is_none() {
                    return Err(Error::DataSource(format!(
                        "project '{}' references unknown material '{}'",
                        project.name, usage.material
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn usage(material: &str) -> MaterialUsage {
        MaterialUsage {
            material: material.to_string(),
            locations: Vec::new(),
            area: None,
            quantity: None,
        }
    }

    fn project(name: &str, materials: Vec<MaterialUsage>) -> Project {
        Project {
            id: 1,
            name: name.to_string(),
            client: "Client".to_string(),
            project_type: "Residential".to_string(),
            status: ProjectStatus::Active,
            started_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            materials,
        }
    }

    fn material(name: &str) -> Material {
        Material {
            id: 1,
            name: name.to_string(),
            category: "Stone".to_string(),
            manufacturer: "StoneWorks".to_string(),
            price_per_unit: None,
            discontinued: false,
        }
    }

    #[test]
    fn test_billable_amount_prefers_area() {
        let mut u = usage("Marble");
        assert_eq!(u.billable_amount(), None);
        u.quantity = Some(4);
        assert_eq!(u.billable_amount(), Some(4.0));
        u.area = Some(12.5);
        assert_eq!(u.billable_amount(), Some(12.5));
    }

    #[test]
    fn test_validate_rejects_unknown_material() {
        let dataset = Dataset {
            projects: vec![project("Villa", vec![usage("Granite")])],
            materials: vec![material("Marble")],
            manufacturers: Vec::new(),
        };
        let err = dataset.validate().unwrap_err();
        assert!(err.to_string().contains("unknown material 'Granite'"));
    }

    #[test]
    fn test_validate_rejects_duplicate_projects() {
        let dataset = Dataset {
            projects: vec![project("Villa", Vec::new()), project("Villa", Vec::new())],
            materials: Vec::new(),
            manufacturers: Vec::new(),
        };
        assert!(matches!(dataset.validate(), Err(Error::DataSource(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_materials() {
        let dataset = Dataset {
            projects: vec![project("Villa", vec![usage("Marble")])],
            materials: vec![material("Marble"), material("Marble")],
            manufacturers: Vec::new(),
        };
        let err = dataset.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate material name 'Marble'"));
    }

    #[test]
    fn test_projects_using() {
        let dataset = Dataset {
            projects: vec![
                project("Villa", vec![usage("Marble")]),
                project("Lodge", Vec::new()),
                project("Tower", vec![usage("Marble")]),
            ],
            materials: vec![material("Marble")],
            manufacturers: Vec::new(),
        };
        let names: Vec<_> = dataset.projects_using("Marble").map(|p| &p.name).collect();
        assert_eq!(names, vec!["Villa", "Tower"]);
    }
}
