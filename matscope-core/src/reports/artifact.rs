//! Rendered report files and their metadata

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::models::ReportFormat;
use crate::Result;

/// A rendered report, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedReportArtifact {
    pub id: Uuid,
    pub display_name: String,
    pub format: ReportFormat,
    pub created_at: DateTime<Utc>,
    /// Rounded size, e.g. "12 KB"
    pub size_label: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Human readable size in whole kilobytes
pub fn size_label(len: usize) -> String {
    format!("{} KB", (len as f64 / 1024.0).round() as u64)
}

impl GeneratedReportArtifact {
    pub fn new(display_name: impl Into<String>, format: ReportFormat, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            format,
            created_at: Utc::now(),
            size_label: size_label(bytes.len()),
            bytes,
        }
    }

    /// Filesystem-safe name: slugged display name, short id, extension
    pub fn file_name(&self) -> String {
        let mut slug = String::with_capacity(self.display_name.len());
        for ch in self.display_name.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_matches('-');
        let short_id: String = self.id.simple().to_string().chars().take(8).collect();
        format!("{}-{}.{}", slug, short_id, self.format.extension())
    }

    /// Write the blob into `dir`, returning the created path
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
