//! Application configuration.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// One widget to mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetConfig {
    Slider {
        canvas: String,
        /// Client position of the canvas. Asked from the surface when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Point>,
        min: f64,
        max: f64,
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Palette {
        canvas: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Point>,
        /// `#rrggbb` / `#rrggbbaa` strings; empty means the Tailwind palette.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        colors: Vec<String>,
        #[serde(default = "default_columns")]
        columns: usize,
    },
}

fn default_columns() -> usize {
    10
}

impl WidgetConfig {
    pub fn canvas(&self) -> &str {
        match self {
            Self::Slider { canvas, .. } | Self::Palette { canvas, .. } => canvas,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Slider { position, .. } | Self::Palette { position, .. } => *position,
        }
    }

    /// Canvas size used when the app creates surfaces itself (replay).
    pub fn surface_size(&self) -> Size {
        match self {
            Self::Slider { .. } => Size::new(200.0, 24.0),
            Self::Palette { columns, colors, .. } => {
                let count = if colors.is_empty() { 20 } else { colors.len() };
                let columns = (*columns).max(1);
                let rows = count.div_ceil(columns);
                Size::new(4.0 + 24.0 * columns as f64, 4.0 + 24.0 * rows as f64)
            }
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub widgets: Vec<WidgetConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            widgets: vec![
                WidgetConfig::Slider {
                    canvas: "line_width".to_string(),
                    position: None,
                    min: 1.0,
                    max: 20.0,
                    value: 2.0,
                    step: Some(1.0),
                },
                WidgetConfig::Palette {
                    canvas: "color".to_string(),
                    position: None,
                    colors: Vec::new(),
                    columns: default_columns(),
                },
            ],
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parsed log level, `Info` if unrecognized.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
