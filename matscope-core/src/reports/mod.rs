//! Report generation module

pub mod artifact;
pub mod builder;
pub mod models;
pub mod pdf;
pub mod xlsx;

use std::path::Path;

pub use artifact::GeneratedReportArtifact;
pub use builder::{build_report_document, build_report_document_as_of};
pub use models::{
    Categories, DiscontinuedMaterial, ManufacturerShare, Manufacturers, MaterialRanking, Overview,
    Pricing, ReportDocument, ReportFormat, ReportKind, Section, TopMaterials,
};
pub use pdf::render_pdf;
pub use xlsx::render_spreadsheet;

use crate::Result;

/// Render a document in the requested format
pub fn render(doc: &ReportDocument, format: ReportFormat) -> Result<GeneratedReportArtifact> {
    match format {
        ReportFormat::Pdf => render_pdf(doc),
        ReportFormat::Excel => render_spreadsheet(doc),
    }
}

/// Export a report document to a JSON file
pub fn export_json(doc: &ReportDocument, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    Ok(())
}
