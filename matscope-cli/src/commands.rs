//! Command implementations

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use matscope_core::assistant;
use matscope_core::config::MatscopeConfig;
use matscope_core::data::{DataSource, FixtureSource, JsonFileSource};
use matscope_core::filters::{parse_date, FilterDimension, FilterSelection};
use matscope_core::reports::{export_json, ReportFormat, ReportKind};
use matscope_core::service::ReportService;

use crate::args::FilterArgs;

impl FilterArgs {
    /// Turn command line flags into a filter selection
    pub fn to_selection(&self) -> Result<FilterSelection> {
        let mut filters = FilterSelection::all()
            .with(FilterDimension::Projects, self.project.iter().cloned())
            .with(FilterDimension::Clients, self.client.iter().cloned())
            .with(
                FilterDimension::MaterialTypes,
                self.material_type.iter().cloned(),
            )
            .with(
                FilterDimension::Manufacturers,
                self.manufacturer.iter().cloned(),
            );
        if let Some(from) = &self.from {
            filters.set_date_start(Some(parse_date(from)?));
        }
        if let Some(to) = &self.to {
            filters.set_date_end(Some(parse_date(to)?));
        }
        Ok(filters)
    }
}

/// Pick the data source: `--data` wins over the config file
pub fn data_source(config: &MatscopeConfig, data: Option<PathBuf>) -> Arc<dyn DataSource> {
    let source: Arc<dyn DataSource> = match data.or_else(|| config.data.source.clone()) {
        Some(path) => Arc::new(JsonFileSource::new(path)),
        None => Arc::new(FixtureSource),
    };
    tracing::debug!("Using data source '{}'", source.name());
    source
}

fn resolve_kind(config: &MatscopeConfig, kind: Option<&str>) -> Result<ReportKind> {
    match kind {
        Some(kind) => Ok(kind.parse()?),
        None => Ok(config.report.kind),
    }
}

pub async fn generate(
    config: &MatscopeConfig,
    source: Arc<dyn DataSource>,
    filters: &FilterArgs,
    kind: Option<&str>,
    formats: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let filters = filters.to_selection()?;
    let kind = resolve_kind(config, kind)?;
    let formats: Vec<ReportFormat> = if formats.is_empty() {
        config.report.formats.clone()
    } else {
        formats
            .iter()
            .map(|f| f.parse())
            .collect::<Result<_, _>>()?
    };
    let output = output.unwrap_or_else(|| config.output.reports_dir.clone());

    let service = ReportService::new(source);
    for format in formats {
        let artifact = service
            .generate(kind, &filters, format)
            .await
            .with_context(|| format!("failed to generate {} report", format))?;
        let path = artifact
            .write_to(&output)
            .with_context(|| format!("failed to write report to {}", output.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nGenerated reports (newest first):");
    for report in service.reports().await {
        println!(
            "  {:<40} {:<6} {:>8}  {}",
            report.display_name,
            report.format.to_string(),
            report.size_label,
            report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}

pub async fn preview(
    config: &MatscopeConfig,
    source: Arc<dyn DataSource>,
    filters: &FilterArgs,
    kind: Option<&str>,
    out: Option<PathBuf>,
) -> Result<()> {
    let filters = filters.to_selection()?;
    let kind = resolve_kind(config, kind)?;
    let doc = ReportService::new(source).document(kind, &filters).await?;

    match out {
        Some(path) => {
            export_json(&doc, &path)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}

pub async fn ask(source: Arc<dyn DataSource>, query: &[String]) -> Result<()> {
    let dataset = source.load().await?;
    println!("{}", assistant::answer(&query.join(" "), &dataset));
    Ok(())
}
