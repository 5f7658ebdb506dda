//! @ai:module:intent Configuration structs for the analytics pipeline
//! @ai:module:layer infrastructure
//! @ai:module:public_api AppConfig, ApiConfig, ReportConfig, RangeConfig, ExportFormat
//! @ai:module:stateless true

use crate::series::PeriodRange;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the analytics pipeline
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub range: RangeConfig,
}

/// @ai:intent Remote data endpoint configuration
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Zero disables throttling.
    #[serde(default = "default_rate_limit")]
    pub requests_per_minute: u32,
}

/// @ai:intent Branding and output settings for exported reports
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_brand_title")]
    pub brand_title: String,
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub format: ExportFormat,
}

/// @ai:intent Concrete document format written by the exporter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

/// @ai:intent Period range every store starts with
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeConfig {
    #[serde(default = "default_start_year")]
    pub start: i32,
    #[serde(default = "default_end_year")]
    pub end: i32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            requests_per_minute: default_rate_limit(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            brand_title: default_brand_title(),
            copyright_holder: default_copyright_holder(),
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start: default_start_year(),
            end: default_end_year(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_rate_limit() -> u32 {
    120
}

fn default_brand_title() -> String {
    "Renewable Energy Operations".to_string()
}

fn default_copyright_holder() -> String {
    "Renewable Energy Operations".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_start_year() -> i32 {
    2020
}

fn default_end_year() -> i32 {
    2030
}

impl AppConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl RangeConfig {
    /// @ai:intent Validate into a period range
    /// @ai:effects pure
    pub fn to_range(&self) -> crate::Result<PeriodRange> {
        PeriodRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.report.format, ExportFormat::Markdown);
        assert_eq!(config.range.to_range().unwrap().period_count(), 11);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://energy.example.org"

            [report]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://energy.example.org");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.report.format, ExportFormat::Json);
        assert_eq!(config.report.brand_title, "Renewable Energy Operations");
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("analytics.toml");

        let mut config = AppConfig::default();
        config.range.start = 2024;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.range.start, 2024);
        assert_eq!(loaded.range.end, 2030);
    }

    #[test]
    fn test_inverted_range_config_is_rejected() {
        let range = RangeConfig { start: 2030, end: 2025 };
        assert!(range.to_range().is_err());
    }
}
