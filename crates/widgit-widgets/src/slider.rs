//! Horizontal value slider.

use crate::theme;
use kurbo::{Circle, Rect};
use peniko::Color;
use widgit_core::{Drawable, DrawingContext, EventCx, EventInterpreter, PointerEvent};

/// Visual parameters for a [`Slider`].
#[derive(Debug, Clone, Copy)]
pub struct SliderStyle {
    pub track: Color,
    pub fill: Color,
    pub thumb: Color,
    pub track_height: f64,
    /// Also the horizontal padding at both ends of the track.
    pub thumb_radius: f64,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            track: theme::TRACK,
            fill: theme::ACCENT,
            thumb: theme::THUMB,
            track_height: 4.0,
            thumb_radius: 7.0,
        }
    }
}

/// Picks a value in `[min, max]` from the pointer's horizontal position.
#[derive(Debug, Clone)]
pub struct Slider {
    min: f64,
    max: f64,
    value: f64,
    step: Option<f64>,
    style: SliderStyle,
}

impl Slider {
    /// Slider over `[min, max]` starting at `value` (clamped). The bounds are
    /// swapped if given in the wrong order. A non-finite `min` becomes `0.0`
    /// and a non-finite `max` or `value` collapses onto `min`.
    pub fn new(min: f64, max: f64, value: f64) -> Self {
        let min = if min.is_finite() { min } else { 0.0 };
        let max = if max.is_finite() { max } else { min };
        let value = if value.is_finite() { value } else { min };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: value.clamp(min, max),
            step: None,
            style: SliderStyle::default(),
        }
    }

    /// Snap values to multiples of `step` from `min`. Ignored unless positive
    /// and finite.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = (step > 0.0 && step.is_finite()).then_some(step);
        self.value = self.snap(self.value);
        self
    }

    pub fn with_style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Position of the value in the range, `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }

    /// Set the value (clamped and snapped). Returns whether it changed.
    pub fn set_value(&mut self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let value = self.snap(value.clamp(self.min, self.max));
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }

    /// Value under local x coordinate `x` on a surface `width` wide.
    pub fn value_at(&self, x: f64, width: f64) -> f64 {
        let pad = self.style.thumb_radius;
        let usable = width - 2.0 * pad;
        if !(usable > 0.0) {
            return self.min;
        }
        if x.is_nan() {
            return self.value;
        }
        let fraction = ((x - pad) / usable).clamp(0.0, 1.0);
        self.snap(self.min + fraction * (self.max - self.min))
    }

    fn snap(&self, value: f64) -> f64 {
        match self.step {
            Some(step) => {
                let snapped = self.min + ((value - self.min) / step).round() * step;
                snapped.clamp(self.min, self.max)
            }
            None => value,
        }
    }
}

impl EventInterpreter for Slider {
    fn interpret(&mut self, event: &PointerEvent, cx: &mut EventCx) {
        let local = cx.local_position(event);
        let value = self.value_at(local.x, cx.size().width);
        if self.set_value(value) {
            log::trace!("Slider value {}", self.value);
            cx.request_redraw();
            cx.notify_listeners();
        }
    }
}

impl Drawable for Slider {
    fn draw(&self, ctx: &mut dyn DrawingContext) {
        let size = ctx.size();
        let style = &self.style;
        let pad = style.thumb_radius;
        let mid = size.height / 2.0;
        let left = pad;
        let right = (size.width - pad).max(left);
        let thumb_x = left + self.fraction() * (right - left);

        ctx.clear_all();
        let half = style.track_height / 2.0;
        ctx.fill_rect(Rect::new(left, mid - half, right, mid + half), style.track);
        ctx.fill_rect(Rect::new(left, mid - half, thumb_x, mid + half), style.fill);
        ctx.fill_circle(Circle::new((thumb_x, mid), style.thumb_radius), style.fill);
        ctx.fill_circle(Circle::new((thumb_x, mid), style.thumb_radius - 2.0), style.thumb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};
    use std::cell::RefCell;
    use std::rc::Rc;
    use widgit_core::{CanvasWidget, DrawCommand, MemorySurfaceHost, SurfaceHost};

    fn host() -> MemorySurfaceHost {
        let host = MemorySurfaceHost::new();
        // 100 usable pixels between the paddings
        host.add_canvas("width", Size::new(114.0, 20.0));
        host
    }

    #[test]
    fn test_new_clamps_and_orders() {
        let slider = Slider::new(10.0, 0.0, 42.0);
        assert_eq!(slider.min(), 0.0);
        assert_eq!(slider.max(), 10.0);
        assert_eq!(slider.value(), 10.0);
        assert_eq!(slider.fraction(), 1.0);
    }

    #[test]
    fn test_value_at() {
        let slider = Slider::new(0.0, 100.0, 0.0);
        assert_eq!(slider.value_at(7.0, 114.0), 0.0);
        assert_eq!(slider.value_at(57.0, 114.0), 50.0);
        assert_eq!(slider.value_at(107.0, 114.0), 100.0);
        assert_eq!(slider.value_at(-20.0, 114.0), 0.0);
        assert_eq!(slider.value_at(500.0, 114.0), 100.0);
    }

    #[test]
    fn test_value_at_degenerate_width() {
        let slider = Slider::new(1.0, 2.0, 1.5);
        assert_eq!(slider.value_at(3.0, 10.0), 1.0);
    }

    #[test]
    fn test_step() {
        let mut slider = Slider::new(1.0, 11.0, 3.4).with_step(2.0);
        assert_eq!(slider.value(), 3.0);
        assert!(slider.set_value(7.9));
        assert_eq!(slider.value(), 7.0);
        assert!(!slider.set_value(7.2));
        assert_eq!(slider.value_at(57.0, 114.0), 7.0);
    }

    #[test]
    fn test_non_finite_input() {
        let slider = Slider::new(0.0, 10.0, 4.0).with_step(f64::INFINITY);
        assert_eq!(slider.value(), 4.0);

        let mut slider = Slider::new(f64::NAN, 10.0, 5.0);
        assert_eq!((slider.min(), slider.max(), slider.value()), (0.0, 10.0, 5.0));
        assert!(!slider.set_value(f64::NAN));
        assert_eq!(slider.value(), 5.0);
        assert!(slider.set_value(f64::INFINITY));
        assert_eq!(slider.value(), 10.0);

        let slider = Slider::new(2.0, f64::INFINITY, f64::NAN);
        assert_eq!((slider.min(), slider.max(), slider.value()), (2.0, 2.0, 2.0));
        assert_eq!(slider.value_at(f64::NAN, 114.0), 2.0);
    }

    #[test]
    fn test_drag_updates_value_and_notifies_on_change() {
        let host = host();
        let slider = Slider::new(0.0, 100.0, 0.0);
        let mounted = CanvasWidget::attach(&host, "width", Point::new(100.0, 0.0), slider).unwrap();
        let values = Rc::new(RefCell::new(Vec::new()));
        {
            let values = values.clone();
            mounted.add_listener(move |s: &Slider| values.borrow_mut().push(s.value()));
        }

        host.dispatch("width", PointerEvent::down(157.0, 10.0)).unwrap();
        host.dispatch("width", PointerEvent::moved(157.0, 12.0)).unwrap();
        host.dispatch("width", PointerEvent::moved(182.0, 12.0)).unwrap();
        host.dispatch("width", PointerEvent::up(182.0, 12.0)).unwrap();
        host.dispatch("width", PointerEvent::moved(107.0, 12.0)).unwrap();

        // The second event lands on the same value and is not reported.
        assert_eq!(*values.borrow(), vec![50.0, 75.0]);
        assert_eq!(mounted.borrow().widget().value(), 75.0);
    }

    #[test]
    fn test_draw() {
        let host = host();
        let surface = host.surface("width").unwrap();
        let slider = Slider::new(0.0, 100.0, 50.0);
        let _widget = CanvasWidget::new(&host, "width", Point::ZERO, slider).unwrap();

        let commands = surface.commands();
        assert_eq!(commands[0], DrawCommand::Clear(Rect::new(0.0, 0.0, 114.0, 20.0)));
        assert_eq!(
            commands[2],
            DrawCommand::FillRect {
                rect: Rect::new(7.0, 8.0, 57.0, 12.0),
                color: [59, 130, 246, 255],
            }
        );
        assert!(matches!(
            commands[3],
            DrawCommand::FillCircle { circle, .. } if circle.center == Point::new(57.0, 10.0)
        ));
        assert_eq!(commands.len(), 5);
    }
}
