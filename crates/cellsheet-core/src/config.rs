use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::range::{col_to_label, CellCoord};

pub const DEFAULT_WIDTH: u32 = 26;
pub const DEFAULT_HEIGHT: u32 = 100;

/// Errors raised while loading a grid configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Grid bounds handed to the spreadsheet by its host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl GridConfig {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        Self { width, height }.validated()
    }

    /// Load configuration from a JSON object; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Check if a coordinate lies on the grid
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.is_valid(self.height, self.width)
    }

    /// Header labels for every column
    pub fn column_labels(&self) -> Vec<String> {
        (0..self.width).map(col_to_label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(GridConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_from_json() {
        let config = GridConfig::from_json(r#"{"width": 5, "height": 8}"#).unwrap();
        assert_eq!(config, GridConfig { width: 5, height: 8 });
        assert_eq!(config.column_labels(), vec!["A", "B", "C", "D", "E"]);
        assert!(config.contains(CellCoord::new(7, 4)));
        assert!(!config.contains(CellCoord::new(8, 4)));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            GridConfig::from_json(r#"{"width": 0}"#),
            Err(ConfigError::InvalidDimensions { width: 0, .. })
        ));
        assert!(matches!(GridConfig::from_json("not json"), Err(ConfigError::Json(_))));
        assert!(GridConfig::new(1, 1).is_ok());
    }
}
