//! Color palette widget.

use crate::theme;
use kurbo::{Point, Rect};
use peniko::Color;
use widgit_core::{Drawable, DrawingContext, EventCx, EventInterpreter, PointerEvent};

// Tailwind CSS colors - https://tailwindcss.com/docs/colors
pub const TAILWIND_500: [Color; 20] = [
    Color::from_rgb8(239, 68, 68),   // Red
    Color::from_rgb8(249, 115, 22),  // Orange
    Color::from_rgb8(245, 158, 11),  // Amber
    Color::from_rgb8(234, 179, 8),   // Yellow
    Color::from_rgb8(132, 204, 22),  // Lime
    Color::from_rgb8(34, 197, 94),   // Green
    Color::from_rgb8(16, 185, 129),  // Emerald
    Color::from_rgb8(20, 184, 166),  // Teal
    Color::from_rgb8(6, 182, 212),   // Cyan
    Color::from_rgb8(14, 165, 233),  // Sky
    Color::from_rgb8(59, 130, 246),  // Blue
    Color::from_rgb8(99, 102, 241),  // Indigo
    Color::from_rgb8(139, 92, 246),  // Violet
    Color::from_rgb8(168, 85, 247),  // Purple
    Color::from_rgb8(217, 70, 239),  // Fuchsia
    Color::from_rgb8(236, 72, 153),  // Pink
    Color::from_rgb8(244, 63, 94),   // Rose
    Color::from_rgb8(100, 116, 139), // Slate
    Color::from_rgb8(107, 114, 128), // Gray
    Color::from_rgb8(113, 113, 122), // Zinc
];

/// Parse `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

/// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn to_hex_color(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

/// Grid of color swatches; the pointer selects the swatch under it.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<Color>,
    columns: usize,
    swatch: f64,
    gap: f64,
    selected: usize,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(TAILWIND_500.to_vec(), 10)
    }
}

impl ColorPalette {
    pub fn new(colors: Vec<Color>, columns: usize) -> Self {
        Self {
            colors,
            columns: columns.max(1),
            swatch: 20.0,
            gap: 4.0,
            selected: 0,
        }
    }

    /// Swatch edge length and the gap around swatches, in pixels.
    pub fn with_swatch_size(mut self, swatch: f64, gap: f64) -> Self {
        self.swatch = swatch.max(1.0);
        self.gap = gap.max(0.0);
        self
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_color(&self) -> Option<Color> {
        self.colors.get(self.selected).copied()
    }

    /// Select swatch `index`. Returns whether the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.colors.len() || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    pub fn rows(&self) -> usize {
        self.colors.len().div_ceil(self.columns)
    }

    /// Rectangle of swatch `index` in local coordinates.
    pub fn swatch_rect(&self, index: usize) -> Rect {
        let pitch = self.swatch + self.gap;
        let col = (index % self.columns) as f64;
        let row = (index / self.columns) as f64;
        let origin = Point::new(self.gap + col * pitch, self.gap + row * pitch);
        Rect::from_origin_size(origin, (self.swatch, self.swatch))
    }

    /// Swatch under local point `p`. The gap to the right of and below a
    /// swatch counts as part of it.
    pub fn index_at(&self, p: Point) -> Option<usize> {
        let pitch = self.swatch + self.gap;
        let x = p.x - self.gap;
        let y = p.y - self.gap;
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let col = (x / pitch) as usize;
        let row = (y / pitch) as usize;
        if col >= self.columns || row >= self.rows() {
            return None;
        }
        let index = row * self.columns + col;
        (index < self.colors.len()).then_some(index)
    }
}

impl EventInterpreter for ColorPalette {
    fn interpret(&mut self, event: &PointerEvent, cx: &mut EventCx) {
        let Some(index) = self.index_at(cx.local_position(event)) else {
            return;
        };
        if self.select(index) {
            log::trace!("Palette selected {}", index);
            cx.request_redraw();
            cx.notify_listeners();
        }
    }
}

impl Drawable for ColorPalette {
    fn draw(&self, ctx: &mut dyn DrawingContext) {
        ctx.clear_all();
        for (i, color) in self.colors.iter().enumerate() {
            ctx.fill_rect(self.swatch_rect(i), *color);
        }
        if self.selected < self.colors.len() {
            let outline = self.swatch_rect(self.selected).inflate(1.0, 1.0);
            ctx.stroke_rect(outline, theme::ACCENT, 2.0);
        }
    }
}
