//! Widgit Application
//!
//! Mounts configured widgets on a surface host: browser canvases when built
//! for WebAssembly, in-memory surfaces for headless replay.

mod app;
pub mod config;

pub use app::{App, AppError, MountedControl};
pub use config::{AppConfig, WidgetConfig};

#[cfg(not(target_arch = "wasm32"))]
pub mod replay;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{dispose_widgets, run_wasm, widget_values};
