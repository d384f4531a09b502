//! Report service: load data, build the document, render, retain

use std::sync::Arc;

use crate::data::DataSource;
use crate::filters::FilterSelection;
use crate::reports::{
    build_report_document, render, GeneratedReportArtifact, ReportDocument, ReportFormat,
    ReportKind,
};
use crate::store::ReportStore;
use crate::{Error, Result};

/// Owns the report store and the data source reports are built from
#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn DataSource>,
    store: Arc<ReportStore>,
}

impl ReportService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_store(source, Arc::new(ReportStore::new()))
    }

    /// Share an existing store between services
    pub fn with_store(source: Arc<dyn DataSource>, store: Arc<ReportStore>) -> Self {
        Self { source, store }
    }

    pub fn store(&self) -> &Arc<ReportStore> {
        &self.store
    }

    /// Load the data source and build the normalized document
    pub async fn document(
        &self,
        kind: ReportKind,
        filters: &FilterSelection,
    ) -> Result<ReportDocument> {
        let dataset = self.source.load().await?;
        build_report_document(kind, filters, &dataset)
    }

    /// Build and render a report, then retain it.
    ///
    /// Rendering runs on the blocking pool. The store is only touched once
    /// the artifact is complete, so a failure leaves it unchanged.
    pub async fn generate(
        &self,
        kind: ReportKind,
        filters: &FilterSelection,
        format: ReportFormat,
    ) -> Result<Arc<GeneratedReportArtifact>> {
        let result = match self.document(kind, filters).await {
            Ok(doc) => render_blocking(move || render(&doc, format)).await,
            Err(e) => Err(e),
        };
        self.retain(kind, format, result).await
    }

    async fn retain(
        &self,
        kind: ReportKind,
        format: ReportFormat,
        result: Result<GeneratedReportArtifact>,
    ) -> Result<Arc<GeneratedReportArtifact>> {
        let artifact = match result {
            Ok(artifact) => Arc::new(artifact),
            Err(e) => {
                tracing::warn!(
                    "{} {} report from '{}' failed: {}",
                    kind,
                    format,
                    self.source.name(),
                    e
                );
                return Err(e);
            }
        };

        self.store.add(artifact.clone()).await;
        tracing::info!(
            "Generated {} ({}, {})",
            artifact.display_name,
            artifact.format,
            artifact.size_label
        );
        Ok(artifact)
    }

    /// Stored artifacts, newest first
    pub async fn reports(&self) -> Vec<Arc<GeneratedReportArtifact>> {
        self.store.list().await
    }
}

async fn render_blocking<F>(job: F) -> Result<GeneratedReportArtifact>
where
    F: FnOnce() -> Result<GeneratedReportArtifact> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| Error::Render(format!("render task failed: {}", e)))?
}
