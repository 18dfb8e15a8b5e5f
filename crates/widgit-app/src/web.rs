//! WebAssembly entry point and platform-specific code.

use crate::app::{App, AppError};
use crate::config::AppConfig;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use widgit_core::WebSurfaceHost;

/// Element whose text holds the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "widgit-config";

thread_local! {
    static APP: RefCell<Option<App<WebSurfaceHost>>> = const { RefCell::new(None) };
}

/// Parse the `log` parameter from a query string or hash.
/// Supports formats like `?log=debug` and `#log=trace`.
fn parse_log_param(s: &str) -> Option<log::Level> {
    // Remove leading ? or #
    let s = s.trim_start_matches(|c| c == '?' || c == '#');

    s.split('&').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some("log"), Some(value)) => value.parse().ok(),
            _ => None,
        }
    })
}

/// Log level requested in the page URL, if any.
pub fn get_log_level_from_url() -> Option<log::Level> {
    let location = web_sys::window()?.location();
    location
        .search()
        .ok()
        .and_then(|search| parse_log_param(&search))
        .or_else(|| location.hash().ok().and_then(|hash| parse_log_param(&hash)))
}

/// Read the page's configuration element, if present.
fn read_config() -> Result<AppConfig, AppError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Environment("No document available".to_string()))?;
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|e| e.text_content())
    {
        Some(json) => Ok(AppConfig::from_json(&json)?),
        None => Ok(AppConfig::default()),
    }
}

/// Current widget values as a JSON object keyed by canvas id.
#[wasm_bindgen]
pub fn widget_values() -> String {
    APP.with(|slot| {
        let values: serde_json::Map<String, serde_json::Value> = slot
            .borrow()
            .as_ref()
            .map(|app| {
                app.values()
                    .into_iter()
                    .map(|(canvas, value)| (canvas, serde_json::Value::String(value)))
                    .collect()
            })
            .unwrap_or_default();
        serde_json::Value::Object(values).to_string()
    })
}

/// Detach every widget from the page.
#[wasm_bindgen]
pub fn dispose_widgets() {
    APP.with(|slot| {
        if let Some(mut app) = slot.borrow_mut().take() {
            app.dispose();
        }
    });
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = read_config();
    let level = get_log_level_from_url().unwrap_or_else(|| {
        config
            .as_ref()
            .map(|c| c.log_level())
            .unwrap_or(log::Level::Info)
    });
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Starting Widgit (WASM)");

    let config = config.unwrap_or_else(|e| {
        log::error!("Falling back to default config: {}", e);
        AppConfig::default()
    });

    let app = WebSurfaceHost::new()
        .map_err(AppError::from)
        .and_then(|host| App::mount(host, &config));
    match app {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(e) => log::error!("Failed to mount widgets: {}", e),
    }
}
