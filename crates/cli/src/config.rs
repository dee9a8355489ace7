use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use extract::ExtractorConfig;
use network::{PageRank, RenderConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub extract: ExtractorConfig,
    pub pagerank: PageRank,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid with the TOML file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::{EntityLabel, TaggingScope};

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();

        assert_eq!(config.extract.labels, EntityLabel::defaults());
        assert_eq!(config.extract.scope, TaggingScope::Sentence);
        assert_eq!(config.render.width, 700);
        assert_eq!(config.fetch.timeout_secs, None);
        assert_eq!(config.output.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_partial_sections_override() {
        let config = AppConfig::from_toml(
            r#"
            [fetch]
            timeout_secs = 30

            [extract]
            labels = ["PERSON"]
            scope = "document"

            [render]
            show_names = true
            node_size = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.fetch.timeout_secs, Some(30));
        assert_eq!(config.extract.labels, vec![EntityLabel::Person]);
        assert_eq!(config.extract.scope, TaggingScope::Document);
        assert!(config.render.show_names);
        assert_eq!(config.render.node_size, 5);
        assert_eq!(config.render.font_size, 10);
        assert!((config.pagerank.damping - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_without_path() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.render.height, 500);
    }

    #[test]
    fn test_bad_scope_is_rejected() {
        assert!(AppConfig::from_toml("[extract]\nscope = \"paragraph\"").is_err());
    }
}
