use crate::color::{Color, DEFAULT_TOLERANCE};
use crate::regions::{Connectivity, SegmentConfig, DEFAULT_MIN_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings, read from a camelCase JSON file. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub tolerance: u8,
    pub min_size: usize,
    pub connectivity: Connectivity,
    pub paint_color: String,
    pub recolored_path: PathBuf,
    pub painting_path: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_size: DEFAULT_MIN_SIZE,
            connectivity: Connectivity::Eight,
            paint_color: Color::BLUE.to_hex(),
            recolored_path: PathBuf::from("pictures/recolored.png"),
            painting_path: PathBuf::from("pictures/painting.png"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|err| format!("Could not read config {}: {err}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str::<AppConfig>(raw).map_err(|err| format!("Invalid config: {err}"))
    }

    pub fn segment_config(&self) -> SegmentConfig {
        SegmentConfig::new(self.tolerance, self.min_size).with_connectivity(self.connectivity)
    }

    pub fn paint_color(&self) -> Result<Color, String> {
        Color::from_hex(&self.paint_color)
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            recolored: self.recolored_path.clone(),
            painting: self.painting_path.clone(),
        }
    }
}

/// Where the save commands write their images.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub recolored: PathBuf,
    pub painting: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        AppConfig::default().output_paths()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.segment_config(), SegmentConfig::default());
        assert_eq!(config.paint_color().unwrap(), Color::BLUE);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = AppConfig::from_json(
            r##"{ "tolerance": 35, "minSize": 10, "connectivity": "diagonal", "paintColor": "#FF00FF" }"##,
        )
        .unwrap();
        let segment = config.segment_config();
        assert_eq!(segment.tolerance, 35);
        assert_eq!(segment.min_size, 10);
        assert_eq!(segment.connectivity, Connectivity::Diagonal);
        assert_eq!(config.paint_color().unwrap(), Color::new(255, 0, 255));
        assert_eq!(config.painting_path, PathBuf::from("pictures/painting.png"));
    }

    #[test]
    fn load_reads_file_and_reports_missing_ones() {
        let path =
            std::env::temp_dir().join(format!("campaint-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "minSize": 7, "logLevel": "debug" }"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.min_size, 7);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        fs::remove_file(&path).ok();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.contains("Could not read config"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{ tolerance: }").is_err());
        assert!(AppConfig::from_json(r#"{ "tolerance": 300 }"#).is_err());
    }
}
