use crate::error::IoError;
use crate::segmenter::SegmenterParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What the CLI prints to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
    pub format: OutputFormat,
    /// Overlay pixels per page unit.
    pub overlay_scale: Option<f32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: SegmenterParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, IoError> {
    let contents = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::StrategyMode;

    #[test]
    fn minimal_config_fills_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str(r#"{ "input_path": "page.json" }"#).unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("page.json"));
        assert_eq!(cfg.output.format, OutputFormat::Text);
        assert!(cfg.output.json_out.is_none());
        assert_eq!(cfg.params.strategy, StrategyMode::Auto);
    }

    #[test]
    fn nested_params_override() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{
                "input_path": "p.json",
                "output": { "format": "both", "debug_dir": "out" },
                "params": { "strategy": "path-clusters", "padding": 4.0 }
            }"#,
        )
        .unwrap();
        assert!(cfg.output.format.includes_text());
        assert!(cfg.output.format.includes_json());
        assert_eq!(cfg.params.strategy, StrategyMode::PathClusters);
        assert_eq!(cfg.params.padding, 4.0);
    }
}
