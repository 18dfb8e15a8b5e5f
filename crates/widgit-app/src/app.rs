//! Mounts configured widgets on a surface host.

use crate::config::{AppConfig, WidgetConfig};
use kurbo::Point;
use thiserror::Error;
use widgit_core::{CanvasWidget, MountedWidget, Surface, SurfaceError, SurfaceHost};
use widgit_widgets::{ColorPalette, Slider, TAILWIND_500, parse_hex_color, to_hex_color};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid color {color:?} for canvas {canvas}")]
    InvalidColor { canvas: String, color: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Environment error: {0}")]
    Environment(String),
}

/// A mounted widget of any supported kind.
pub enum MountedControl<S: Surface> {
    Slider(MountedWidget<Slider, S>),
    Palette(MountedWidget<ColorPalette, S>),
}

impl<S: Surface + 'static> MountedControl<S> {
    pub fn canvas(&self) -> String {
        match self {
            Self::Slider(w) => w.borrow().surface().id().to_string(),
            Self::Palette(w) => w.borrow().surface().id().to_string(),
        }
    }

    /// Current value as display text: the slider value or the selected color.
    pub fn value_text(&self) -> String {
        match self {
            Self::Slider(w) => w.borrow().widget().value().to_string(),
            Self::Palette(w) => w
                .borrow()
                .widget()
                .selected_color()
                .map(to_hex_color)
                .unwrap_or_default(),
        }
    }

    pub fn dispose(&mut self) {
        match self {
            Self::Slider(w) => w.dispose(),
            Self::Palette(w) => w.dispose(),
        }
    }
}

/// The configured set of widgets on one host.
pub struct App<H: SurfaceHost> {
    host: H,
    controls: Vec<MountedControl<H::Surface>>,
}

impl<H> App<H>
where
    H: SurfaceHost,
    H::Surface: 'static,
{
    /// Mount every widget in `config`. Fails on the first widget that cannot
    /// be mounted.
    pub fn mount(host: H, config: &AppConfig) -> Result<Self, AppError> {
        let mut controls = Vec::with_capacity(config.widgets.len());
        for widget in &config.widgets {
            controls.push(mount_widget(&host, widget)?);
        }
        log::info!("Mounted {} widgets", controls.len());
        Ok(Self { host, controls })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn controls(&self) -> &[MountedControl<H::Surface>] {
        &self.controls
    }

    /// Control mounted on `canvas`.
    pub fn control(&self, canvas: &str) -> Option<&MountedControl<H::Surface>> {
        self.controls.iter().find(|c| c.canvas() == canvas)
    }

    /// `(canvas, value)` for every control, in config order.
    pub fn values(&self) -> Vec<(String, String)> {
        self.controls
            .iter()
            .map(|c| (c.canvas(), c.value_text()))
            .collect()
    }

    /// Detach every control.
    pub fn dispose(&mut self) {
        for control in &mut self.controls {
            control.dispose();
        }
        log::info!("Disposed {} widgets", self.controls.len());
    }
}

/// Configured position, else the surface's client origin, else the page origin.
fn position_for<H: SurfaceHost>(host: &H, config: &WidgetConfig) -> Point {
    config
        .position()
        .or_else(|| host.surface(config.canvas()).and_then(|s| s.client_origin()))
        .unwrap_or(Point::ZERO)
}

fn mount_widget<H>(host: &H, config: &WidgetConfig) -> Result<MountedControl<H::Surface>, AppError>
where
    H: SurfaceHost,
    H::Surface: 'static,
{
    let position = position_for(host, config);
    match config {
        WidgetConfig::Slider { canvas, min, max, value, step, .. } => {
            let mut slider = Slider::new(*min, *max, *value);
            if let Some(step) = step {
                slider = slider.with_step(*step);
            }
            let mounted = CanvasWidget::attach(host, canvas, position, slider)?;
            let name = canvas.clone();
            mounted.add_listener(move |s: &Slider| log::info!("{} = {}", name, s.value()));
            Ok(MountedControl::Slider(mounted))
        }
        WidgetConfig::Palette { canvas, colors, columns, .. } => {
            let colors = if colors.is_empty() {
                TAILWIND_500.to_vec()
            } else {
                colors
                    .iter()
                    .map(|c| {
                        parse_hex_color(c).ok_or_else(|| AppError::InvalidColor {
                            canvas: canvas.clone(),
                            color: c.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            };
            let palette = ColorPalette::new(colors, *columns);
            let mounted = CanvasWidget::attach(host, canvas, position, palette)?;
            let name = canvas.clone();
            mounted.add_listener(move |p: &ColorPalette| {
                if let Some(color) = p.selected_color() {
                    log::info!("{} = {}", name, to_hex_color(color));
                }
            });
            Ok(MountedControl::Palette(mounted))
        }
    }
}
