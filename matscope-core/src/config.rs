//! Configuration types for matscope

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::reports::{ReportFormat, ReportKind};

/// Where report data comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON dataset file; the built-in demo fixture is used when unset
    #[serde(default)]
    pub source: Option<PathBuf>,
}

/// Defaults applied when the command line does not say otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDefaults {
    #[serde(default)]
    pub kind: ReportKind,
    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Pdf]
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            kind: ReportKind::default(),
            formats: default_formats(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

fn default_reports_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".matscope")
        .join("reports")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
        }
    }
}

/// Complete matscope configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatscopeConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub report: ReportDefaults,
    #[serde(default)]
    pub output: OutputConfig,
}

impl MatscopeConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.report.formats.is_empty() {
            return Err(crate::Error::Config(
                "report.formats must name at least one format".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load configuration from default locations with cascade:
    /// 1. ./matscope.toml (local override)
    /// 2. ~/.matscope/config.toml (global defaults)
    /// 3. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(config) = Self::from_file("matscope.toml") {
            return config;
        }

        if let Some(global_path) = Self::global_config_path() {
            if let Ok(config) = Self::from_file(&global_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".matscope").join("config.toml"))
    }

    /// Expand `${VAR}` references in the data source path
    pub fn expand_env_vars(&mut self) {
        let Some(source) = self.data.source.as_ref().and_then(|p| p.to_str()) else {
            return;
        };
        if source.starts_with("${") && source.ends_with('}') {
            let var_name = &source[2..source.len() - 1];
            if let Ok(value) = std::env::var(var_name) {
                self.data.source = Some(PathBuf::from(value));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = MatscopeConfig::parse("").unwrap();
        assert!(config.data.source.is_none());
        assert_eq!(config.report.kind, ReportKind::Internal);
        assert_eq!(config.report.formats, vec![ReportFormat::Pdf]);
        assert!(config.output.reports_dir.ends_with(".matscope/reports"));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[data]
source = "/srv/studio/dataset.json"

[report]
kind = "client"
formats = ["pdf", "excel"]

[output]
reports_dir = "/tmp/reports"
"#;
        let config = MatscopeConfig::parse(toml).unwrap();
        assert_eq!(
            config.data.source,
            Some(PathBuf::from("/srv/studio/dataset.json"))
        );
        assert_eq!(config.report.kind, ReportKind::Client);
        assert_eq!(
            config.report.formats,
            vec![ReportFormat::Pdf, ReportFormat::Excel]
        );
        assert_eq!(config.output.reports_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_empty_format_list_rejected() {
        let toml = r#"
[report]
formats = []
"#;
        let err = MatscopeConfig::parse(toml).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let toml = r#"
[report]
kind = "partner"
"#;
        assert!(matches!(
            MatscopeConfig::parse(toml),
            Err(crate::Error::Toml(_))
        ));
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("MATSCOPE_TEST_DATASET", "/data/expanded.json");
        let toml = r#"
[data]
source = "${MATSCOPE_TEST_DATASET}"
"#;
        let mut config = MatscopeConfig::parse(toml).unwrap();
        config.expand_env_vars();
        assert_eq!(
            config.data.source,
            Some(PathBuf::from("/data/expanded.json"))
        );
        std::env::remove_var("MATSCOPE_TEST_DATASET");
    }

    #[test]
    fn test_global_config_path() {
        let path = MatscopeConfig::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with(".matscope/config.toml"));
    }
}
