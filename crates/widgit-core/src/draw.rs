//! Drawing context abstraction.
//!
//! Widgets draw through [`DrawingContext`] so the same widget runs against a
//! browser canvas or the in-memory surface used by tests.

use kurbo::{Circle, Line, Point, Rect, Size};
use peniko::Color;

/// 2D drawing operations a widget may issue against its surface.
pub trait DrawingContext {
    /// Size of the surface in pixels.
    fn size(&self) -> Size;

    /// Clear `rect` to transparent.
    fn clear(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    fn fill_circle(&mut self, circle: Circle, color: Color);

    fn stroke_line(&mut self, line: Line, color: Color, width: f64);

    /// Draw `text` with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, color: Color);

    /// Clear the whole surface.
    fn clear_all(&mut self) {
        let size = self.size();
        self.clear(size.to_rect());
    }
}

/// A recorded drawing operation. Colors are stored as RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillRect { rect: Rect, color: [u8; 4] },
    StrokeRect { rect: Rect, color: [u8; 4], width: f64 },
    FillCircle { circle: Circle, color: [u8; 4] },
    StrokeLine { line: Line, color: [u8; 4], width: f64 },
    FillText { text: String, origin: Point, color: [u8; 4] },
}

/// RGBA8 components of `color`.
pub fn rgba8(color: Color) -> [u8; 4] {
    let c = color.to_rgba8();
    [c.r, c.g, c.b, c.a]
}

/// CSS `rgba()` string for `color`.
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = rgba8(color);
    format!("rgba({}, {}, {}, {})", r, g, b, f64::from(a) / 255.0)
}
