//! PDF renderer: lays a report out into pages, then writes them with printpdf

pub mod layout;

use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rect};

use self::layout::{DrawOp, Page, PdfLayout, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use super::artifact::GeneratedReportArtifact;
use super::models::{ReportDocument, ReportFormat, Section};
use crate::{Error, Result};

pub const PDF_TITLE: &str = "Material Usage Report";

/// Render a report document into a PDF artifact
pub fn render_pdf(doc: &ReportDocument) -> Result<GeneratedReportArtifact> {
    let layout = layout_document(doc);
    let page_count = layout.pages().len();
    let bytes = write_pdf(PDF_TITLE, &layout.into_pages())?;
    tracing::debug!("Rendered PDF with {} pages ({} bytes)", page_count, bytes.len());

    Ok(GeneratedReportArtifact::new(
        format!("{} - {}", PDF_TITLE, doc.generated_on.format("%Y-%m-%d")),
        ReportFormat::Pdf,
        bytes,
    ))
}

/// Lay out every section the document marks as present, in order
pub fn layout_document(doc: &ReportDocument) -> PdfLayout {
    let mut layout = PdfLayout::new();
    layout.title(
        PDF_TITLE,
        &format!("Generated on {}", doc.generated_on.format("%Y-%m-%d")),
    );

    for section in &doc.sections {
        match section {
            Section::Overview => {
                let overview = &doc.overview;
                layout.heading(section.title());
                layout.metric_row("Total Materials", &overview.total_materials.to_string());
                layout.metric_row(
                    "Total Square Meters",
                    &format!("{} m2", format_number(overview.total_area)),
                );
                layout.metric_row(
                    "Average Materials per Project",
                    &format_number(overview.avg_materials_per_project),
                );
            }
            Section::IncludedProjects => {
                layout.paragraph(
                    "Included Projects:",
                    &doc.overview.included_projects.join(", "),
                );
            }
            Section::MostUsedMaterials => {
                layout.heading(section.title());
                for material in &doc.top_materials.most_specified {
                    layout.metric_row(
                        &format!("{} ({})", material.name, material.manufacturer),
                        &format!(
                            "{} projects ({} m2)",
                            material.project_count,
                            format_number(material.total_area)
                        ),
                    );
                }
            }
            Section::DiscontinuedMaterials => {
                layout.heading(section.title());
                for material in &doc.top_materials.discontinued {
                    layout.metric_row(
                        &material.name,
                        &format!(
                            "Used in {} projects (Range: {})",
                            material.used_in_count, material.active_date_range
                        ),
                    );
                }
            }
            Section::Categories => {
                layout.heading(section.title());
                for (category, share) in &doc.categories.by_type {
                    layout.metric_row(
                        category,
                        &format!("{}% of total specified", format_number(*share)),
                    );
                }
            }
            Section::Pricing => {
                let Some(pricing) = &doc.pricing else {
                    continue;
                };
                layout.heading(section.title());
                layout.metric_row(
                    "Average Price per m2",
                    &format!("EUR {:.2}", pricing.avg_price_per_unit_area),
                );
                layout.metric_row(
                    "Most Expensive Material",
                    pricing.most_expensive_material.as_deref().unwrap_or("n/a"),
                );
                layout.metric_row(
                    "Total Material Cost",
                    &format!("EUR {}", format_money(pricing.total_cost)),
                );
            }
        }
    }

    layout
}

/// Whole numbers without a fractional part, others as-is
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Two decimals with thousands separators, e.g. 125,000.00
fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

fn pdf_color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f32::from(rgb.0) / 255.0,
        f32::from(rgb.1) / 255.0,
        f32::from(rgb.2) / 255.0,
        None,
    ))
}

fn render_error(context: &str, e: impl std::fmt::Debug) -> Error {
    Error::Render(format!("{}: {:?}", context, e))
}

/// Serialize laid-out pages with the built-in Helvetica fonts
fn write_pdf(title: &str, pages: &[Page]) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| render_error("failed to load Helvetica", e))?;
    let bold: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| render_error("failed to load Helvetica-Bold", e))?;

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        // Layout y grows downwards from the top edge; PDF y grows upwards
        for op in &page.ops {
            match op {
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    layer.set_fill_color(pdf_color(*color));
                    let rect = Rect::new(
                        Mm(*x),
                        Mm(PAGE_HEIGHT - y - height),
                        Mm(x + width),
                        Mm(PAGE_HEIGHT - y),
                    )
                    .with_mode(PaintMode::Fill);
                    layer.add_rect(rect);
                }
                DrawOp::Text {
                    x,
                    y,
                    text,
                    size,
                    bold: is_bold,
                    color,
                } => {
                    layer.set_fill_color(pdf_color(*color));
                    let font = if *is_bold { &bold } else { &regular };
                    layer.use_text(text.as_str(), *size, Mm(*x), Mm(PAGE_HEIGHT - y), font);
                }
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| render_error("failed to write PDF", e))
}
