//! Report data models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filters::FilterSelection;
use crate::Error;

/// Report framing; internal reports carry pricing data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Internal,
    Client,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Internal => write!(f, "internal"),
            ReportKind::Client => write!(f, "client"),
        }
    }
}

impl std::str::FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "internal" => Ok(ReportKind::Internal),
            "client" => Ok(ReportKind::Client),
            _ => Err(Error::InvalidFilter(format!("Unknown report kind: {}", s))),
        }
    }
}

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Pdf => write!(f, "PDF"),
            ReportFormat::Excel => write!(f, "Excel"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            _ => Err(Error::InvalidFilter(format!("Unknown report format: {}", s))),
        }
    }
}

/// Renderable sections, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Overview,
    IncludedProjects,
    MostUsedMaterials,
    DiscontinuedMaterials,
    Categories,
    Pricing,
}

impl Section {
    /// Heading used by the PDF renderer
    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::IncludedProjects => "Included Projects",
            Section::MostUsedMaterials => "Most Used Materials",
            Section::DiscontinuedMaterials => "Potentially Discontinued Materials",
            Section::Categories => "Material Categories (by Type)",
            Section::Pricing => "Pricing Analysis",
        }
    }
}

/// Headline numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Distinct materials specified
    pub total_materials: u32,
    /// Total specified area in m²
    pub total_area: f64,
    pub avg_materials_per_project: f64,
    pub included_projects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRanking {
    pub name: String,
    pub manufacturer: String,
    /// Distinct projects specifying the material
    pub project_count: u32,
    pub total_area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscontinuedMaterial {
    pub name: String,
    pub used_in_count: u32,
    /// e.g. "2019-2021"
    pub active_date_range: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMaterials {
    pub most_specified: Vec<MaterialRanking>,
    pub discontinued: Vec<DiscontinuedMaterial>,
}

/// Percentage breakdowns. The two maps are computed independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Categories {
    pub by_type: BTreeMap<String, f64>,
    pub by_project_type: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerShare {
    pub name: String,
    pub percentage_share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manufacturers {
    pub top5: Vec<ManufacturerShare>,
}

/// Cost figures, only present on internal reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Average price per m² over area-priced usages
    pub avg_price_per_unit_area: f64,
    pub most_expensive_material: Option<String>,
    pub total_cost: f64,
}

/// Normalized, renderer-agnostic report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub filters: FilterSelection,
    pub generated_on: NaiveDate,
    pub overview: Overview,
    pub top_materials: TopMaterials,
    pub categories: Categories,
    pub manufacturers: Manufacturers,
    pub pricing: Option<Pricing>,
    /// Sections that have content, in rendering order
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn has_section(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }
}
