//! Headless replay of recorded pointer gestures.
//!
//! A recording is JSON: an optional app config plus a list of pointer
//! events, each tagged with the canvas it was delivered to. The widgets are
//! mounted on in-memory surfaces and the events dispatched in order.

use crate::app::{App, AppError};
use crate::config::AppConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use widgit_core::{MemorySurfaceHost, PointerEvent};

/// A pointer event delivered to one canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub canvas: String,
    #[serde(flatten)]
    pub event: PointerEvent,
}

/// Events to replay against a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub config: AppConfig,
    pub events: Vec<RecordedEvent>,
}

impl Recording {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for Recording {
    /// Drag the line width slider to the middle, then pick the second color.
    fn default() -> Self {
        let on = |canvas: &str, event| RecordedEvent {
            canvas: canvas.to_string(),
            event,
        };
        Self {
            config: AppConfig::default(),
            events: vec![
                on("line_width", PointerEvent::down(7.0, 12.0)),
                on("line_width", PointerEvent::moved(50.0, 12.0)),
                on("line_width", PointerEvent::moved(100.0, 12.0)),
                on("line_width", PointerEvent::up(100.0, 12.0)),
                on("line_width", PointerEvent::moved(190.0, 12.0)),
                on("color", PointerEvent::down(30.0, 10.0)),
                on("color", PointerEvent::leave(30.0, 60.0)),
            ],
        }
    }
}

/// Replay `recording` and return the final `(canvas, value)` pairs.
pub fn replay(recording: &Recording) -> Result<Vec<(String, String)>, AppError> {
    let host = MemorySurfaceHost::new();
    for widget in &recording.config.widgets {
        host.add_canvas(widget.canvas(), widget.surface_size());
    }

    let mut app = App::mount(host, &recording.config)?;
    for recorded in &recording.events {
        app.host().dispatch(&recorded.canvas, recorded.event)?;
    }

    let values = app.values();
    app.dispose();
    Ok(values)
}

/// Replay the recording at `path`, or the built-in one.
pub fn run(path: Option<&Path>) -> Result<Vec<(String, String)>, AppError> {
    let recording = match path {
        Some(path) => {
            log::info!("Replaying {}", path.display());
            Recording::load(path)?
        }
        None => {
            log::info!("Replaying built-in recording");
            Recording::default()
        }
    };
    let values = replay(&recording)?;
    for (canvas, value) in &values {
        log::info!("Final {}: {}", canvas, value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use widgit_core::SurfaceError;

    #[test]
    fn test_builtin_recording() {
        let values = replay(&Recording::default()).unwrap();
        assert_eq!(
            values,
            vec![
                ("line_width".to_string(), "11".to_string()),
                ("color".to_string(), "#f97316".to_string()),
            ]
        );
    }

    #[test]
    fn test_recording_json() {
        let json = r#"{
            "config": {
                "widgets": [
                    {"type": "slider", "canvas": "alpha", "min": 0.0, "max": 100.0, "value": 0.0}
                ]
            },
            "events": [
                {"canvas": "alpha", "kind": "down", "client_position": {"x": 53.5, "y": 5.0}},
                {"canvas": "alpha", "kind": "move", "client_position": {"x": 100.0, "y": 5.0}},
                {"canvas": "alpha", "kind": "leave", "client_position": {"x": 100.0, "y": 30.0}},
                {"canvas": "alpha", "kind": "move", "client_position": {"x": 193.0, "y": 5.0}}
            ]
        }"#;
        let recording = Recording::from_json(json).unwrap();
        assert_eq!(recording.events.len(), 4);
        assert_eq!(replay(&recording).unwrap(), vec![("alpha".to_string(), "50".to_string())]);
    }

    #[test]
    fn test_event_for_unknown_canvas() {
        let mut recording = Recording::default();
        recording.events.push(RecordedEvent {
            canvas: "missing".to_string(),
            event: PointerEvent::down(0.0, 0.0),
        });
        assert!(matches!(
            replay(&recording),
            Err(AppError::Surface(SurfaceError::NotFound(id))) if id == "missing"
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            run(Some(Path::new("/nonexistent/recording.json"))),
            Err(AppError::Io(_))
        ));
    }
}
