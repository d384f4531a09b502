//! Data sources that produce a [`Dataset`]

use std::path::PathBuf;

use async_trait::async_trait;

use super::fixture::demo_dataset;
use super::models::Dataset;
use crate::{Error, Result};

/// Read-only access to project, material and manufacturer records
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// Load a validated snapshot of all records
    async fn load(&self) -> Result<Dataset>;
}

/// The built-in demo studio
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

#[async_trait]
impl DataSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn load(&self) -> Result<Dataset> {
        Ok(demo_dataset())
    }
}

/// A caller-provided dataset
#[derive(Debug, Clone)]
pub struct InMemorySource {
    dataset: Dataset,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl DataSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> Result<Dataset> {
        self.dataset.validate()?;
        Ok(self.dataset.clone())
    }
}

/// A JSON file holding a serialized [`Dataset`]
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    label: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl DataSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn load(&self) -> Result<Dataset> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::DataSource(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let dataset: Dataset = serde_json::from_str(&content).map_err(|e| {
            Error::DataSource(format!("malformed dataset {}: {}", self.path.display(), e))
        })?;
        dataset.validate()?;
        tracing::debug!(
            "Loaded {} projects and {} materials from {}",
            dataset.projects.len(),
            dataset.materials.len(),
            self.label
        );
        Ok(dataset)
    }
}
