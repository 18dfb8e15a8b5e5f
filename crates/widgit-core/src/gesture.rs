//! Drag gesture state machine.

use crate::input::PointerEventKind;

/// Whether a widget is inside a pointer gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureState {
    /// No button held over the surface. Moves are ignored.
    #[default]
    Idle,
    /// Between a pointer-down and the matching up/leave.
    Dragging,
}

/// What the widget should do with the event that caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    /// Forward the event to the interpretation hook.
    Interpret,
    /// Drop the event.
    Ignore,
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging)
    }

    /// Advance on `kind` and report what to do with the event.
    pub fn advance(&mut self, kind: PointerEventKind) -> GestureAction {
        let (next, action) = match (*self, kind) {
            (_, PointerEventKind::Down) => (Self::Dragging, GestureAction::Interpret),
            (Self::Dragging, PointerEventKind::Move) => (Self::Dragging, GestureAction::Interpret),
            (Self::Idle, PointerEventKind::Move) => (Self::Idle, GestureAction::Ignore),
            (_, PointerEventKind::Up | PointerEventKind::Leave) => {
                (Self::Idle, GestureAction::Ignore)
            }
        };
        *self = next;
        action
    }

    /// Back to `Idle` without an event.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
