//! Concrete canvas widgets.
//!
//! - **Slider**: drag along a track to pick a value in a range
//! - **Palette**: grid of color swatches, Tailwind 500 shades by default

pub mod palette;
pub mod slider;

pub use palette::{ColorPalette, TAILWIND_500, parse_hex_color, to_hex_color};
pub use slider::{Slider, SliderStyle};

/// Colors shared across widgets.
pub mod theme {
    use peniko::Color;

    /// Track and outline color (light gray)
    pub const TRACK: Color = Color::from_rgb8(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color = Color::from_rgb8(59, 130, 246);
    /// Text color (dark gray)
    pub const TEXT: Color = Color::from_rgb8(60, 60, 60);
    /// Thumb fill
    pub const THUMB: Color = Color::from_rgb8(255, 255, 255);
}
