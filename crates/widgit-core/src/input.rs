//! Pointer events delivered to widgets.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// The low-level pointer notifications a surface forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// Pointer left the surface. Ends a gesture exactly like `Up`.
    Leave,
}

impl PointerEventKind {
    /// DOM event type names, in the order listeners are attached.
    pub const DOM_EVENTS: [(&'static str, PointerEventKind); 4] = [
        ("mousedown", PointerEventKind::Down),
        ("mousemove", PointerEventKind::Move),
        ("mouseup", PointerEventKind::Up),
        ("mouseleave", PointerEventKind::Leave),
    ];

    /// Whether this kind ends the current gesture.
    pub fn ends_gesture(self) -> bool {
        matches!(self, Self::Up | Self::Leave)
    }
}

/// A pointer event in page (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Absolute position in client coordinates.
    pub client_position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<MouseButton>,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, client_position: Point) -> Self {
        Self {
            kind,
            client_position,
            button: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Left-button press at `(x, y)`.
    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y)).with_button(MouseButton::Left)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    /// Left-button release at `(x, y)`.
    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y)).with_button(MouseButton::Left)
    }

    pub fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Leave, Point::new(x, y))
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Position relative to `origin`, i.e. the client position minus the
    /// origin of the surface in client coordinates.
    pub fn local_to(&self, origin: Point) -> Point {
        (self.client_position - origin).to_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_to_subtracts_origin() {
        let event = PointerEvent::moved(15.0, 25.0);
        assert_eq!(event.local_to(Point::new(10.0, 20.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_local_to_can_go_negative() {
        let event = PointerEvent::moved(5.0, 5.0);
        assert_eq!(event.local_to(Point::new(10.0, 20.0)), Point::new(-5.0, -15.0));
    }

    #[test]
    fn test_ends_gesture() {
        assert!(PointerEventKind::Up.ends_gesture());
        assert!(PointerEventKind::Leave.ends_gesture());
        assert!(!PointerEventKind::Down.ends_gesture());
        assert!(!PointerEventKind::Move.ends_gesture());
    }

    #[test]
    fn test_dom_button_codes() {
        assert_eq!(MouseButton::from_dom(0), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_dom(1), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_dom(2), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_dom(3), None);
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"kind":"down","client_position":{"x":5.0,"y":6.0},"button":"Left"}"#;
        let event: PointerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, PointerEvent::down(5.0, 6.0));
        assert_eq!(event.modifiers, Modifiers::default());
    }
}
