//! Spreadsheet renderer: one sheet per report area, plain cell values only

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use super::artifact::GeneratedReportArtifact;
use super::models::{ReportDocument, ReportFormat, Section};
use crate::{Error, Result};

pub const WORKBOOK_TITLE: &str = "Material Analysis";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Number(f64::from(value))
    }
}

/// A sheet as rows of cells, header rows first
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    fn row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

/// Sheets in workbook order: Overview, Materials Analysis, Categories and,
/// for internal reports, Pricing
pub fn workbook_sheets(doc: &ReportDocument) -> Vec<Sheet> {
    let overview = &doc.overview;
    let mut sheets = vec![
        Sheet::new("Overview")
            .row(["Material Usage Overview"])
            .row([
                Cell::from("Total Materials"),
                Cell::from(overview.total_materials),
            ])
            .row([
                Cell::from("Total Square Meters"),
                Cell::from(overview.total_area),
            ])
            .row([
                Cell::from("Average Materials per Project"),
                Cell::from(overview.avg_materials_per_project),
            ])
            .row([
                Cell::from("Included Projects"),
                Cell::from(overview.included_projects.join(", ")),
            ]),
    ];

    let mut materials = Sheet::new("Materials Analysis").row([
        "Material",
        "Manufacturer",
        "Projects Where Specified",
        "Total Area (m²)",
    ]);
    for m in &doc.top_materials.most_specified {
        materials = materials.row([
            Cell::from(m.name.as_str()),
            Cell::from(m.manufacturer.as_str()),
            Cell::from(m.project_count),
            Cell::from(m.total_area),
        ]);
    }
    sheets.push(materials);

    // Only the material-type breakdown goes to the workbook
    let mut categories = Sheet::new("Categories").row(["Category", "Percentage"]);
    for (label, share) in &doc.categories.by_type {
        categories = categories.row([Cell::from(label.as_str()), Cell::from(*share)]);
    }
    sheets.push(categories);

    if let (true, Some(pricing)) = (doc.has_section(Section::Pricing), &doc.pricing) {
        sheets.push(
            Sheet::new("Pricing")
                .row(["Pricing Analysis"])
                .row([
                    Cell::from("Average Price per m²"),
                    Cell::from(pricing.avg_price_per_unit_area),
                ])
                .row([
                    Cell::from("Most Expensive Material"),
                    Cell::from(pricing.most_expensive_material.clone().unwrap_or_default()),
                ])
                .row([
                    Cell::from("Total Material Cost"),
                    Cell::from(pricing.total_cost),
                ]),
        );
    }

    sheets
}

/// Render a report document into an XLSX artifact
pub fn render_spreadsheet(doc: &ReportDocument) -> Result<GeneratedReportArtifact> {
    let sheets = workbook_sheets(doc);
    let bytes = encode_workbook(&sheets)?;
    tracing::debug!("Rendered workbook with {} sheets ({} bytes)", sheets.len(), bytes.len());

    Ok(GeneratedReportArtifact::new(
        format!("{} - {}", WORKBOOK_TITLE, doc.generated_on.format("%Y-%m-%d")),
        ReportFormat::Excel,
        bytes,
    ))
}

fn encode_workbook(sheets: &[Sheet]) -> Result<Vec<u8>> {
    write_workbook(sheets).map_err(|e| Error::Render(format!("failed to write workbook: {}", e)))
}

fn write_workbook(sheets: &[Sheet]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sheet.name.as_str())?;
        for (row, cells) in sheet.rows.iter().enumerate() {
            let row = row as u32;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text.as_str())?;
                    }
                    Cell::Number(number) => {
                        worksheet.write_number(row, col, *number)?;
                    }
                }
            }
        }
        workbook.push_worksheet(worksheet);
    }

    workbook.save_to_buffer()
}
