//! Canvas widget base.
//!
//! Concrete widgets implement [`EventInterpreter`] and [`Drawable`];
//! [`CanvasWidget`] owns the surface and its drawing context and provides
//! the rest:
//! - Initial draw on construction
//! - Pointer routing through the drag gesture state machine
//! - Change listeners
//! - Client to local coordinate translation

mod mounted;

pub use mounted::MountedWidget;

use crate::draw::DrawingContext;
use crate::gesture::{GestureAction, GestureState};
use crate::input::{PointerEvent, PointerEventKind};
use crate::listeners::ListenerList;
use crate::surface::{Surface, SurfaceError, SurfaceHost, SurfaceResult};
use kurbo::{Point, Size};

/// Whether a raw pointer hook consumed the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Run the gesture state machine as usual.
    Continue,
    /// Skip the gesture state machine for this event.
    Handled,
}

/// Passed to widget hooks; collects redraw and notification requests that
/// the base carries out once the hook returns.
#[derive(Debug, Clone)]
pub struct EventCx {
    origin: Point,
    size: Size,
    redraw: bool,
    notify: bool,
}

impl EventCx {
    fn new(origin: Point, size: Size) -> Self {
        Self {
            origin,
            size,
            redraw: false,
            notify: false,
        }
    }

    /// Widget position in client coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Size of the widget's surface.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Event position relative to the widget.
    pub fn local_position(&self, event: &PointerEvent) -> Point {
        event.local_to(self.origin)
    }

    /// Draw the widget again after the hook returns.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Run the change listeners after the hook returns (after any redraw).
    pub fn notify_listeners(&mut self) {
        self.notify = true;
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }

    pub fn notify_requested(&self) -> bool {
        self.notify
    }
}

/// Turns pointer events into widget state changes.
pub trait EventInterpreter {
    /// Called for the pointer-down that starts a gesture and for every move
    /// while it lasts.
    fn interpret(&mut self, event: &PointerEvent, cx: &mut EventCx) {
        let _ = (event, cx);
    }

    /// Sees every pointer event before the gesture state machine does.
    fn raw_pointer(&mut self, event: &PointerEvent, cx: &mut EventCx) -> Propagation {
        let _ = (event, cx);
        Propagation::Continue
    }
}

/// Renders widget state.
pub trait Drawable {
    fn draw(&self, ctx: &mut dyn DrawingContext) {
        let _ = ctx;
    }
}

/// A concrete widget.
pub trait Widget: EventInterpreter + Drawable {}

impl<T: EventInterpreter + Drawable> Widget for T {}

/// A widget bound to a drawing surface.
pub struct CanvasWidget<W, S: Surface> {
    surface: S,
    context: S::Context,
    /// Surface origin in client coordinates. Fixed at construction.
    position: Point,
    gesture: GestureState,
    listeners: ListenerList<W>,
    widget: W,
}

impl<W: Widget, S: Surface> CanvasWidget<W, S> {
    /// Look up surface `id` on `host`, acquire its 2D context and draw
    /// `widget` once.
    pub fn new<H>(host: &H, id: &str, position: Point, widget: W) -> SurfaceResult<Self>
    where
        H: SurfaceHost<Surface = S>,
    {
        let surface = host
            .surface(id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))?;
        let context = surface
            .context_2d()?
            .ok_or_else(|| SurfaceError::NoDrawingContext(id.to_string()))?;

        let mut this = Self {
            surface,
            context,
            position,
            gesture: GestureState::Idle,
            listeners: ListenerList::new(),
            widget,
        };
        this.redraw();
        log::debug!("Created widget on surface {} at {:?}", id, position);
        Ok(this)
    }

    /// Construct and start receiving pointer events from the surface.
    pub fn attach<H>(
        host: &H,
        id: &str,
        position: Point,
        widget: W,
    ) -> SurfaceResult<MountedWidget<W, S>>
    where
        H: SurfaceHost<Surface = S>,
        W: 'static,
        S: 'static,
    {
        Self::new(host, id, position, widget)?.mount()
    }

    /// Start receiving pointer events from the surface.
    pub fn mount(self) -> SurfaceResult<MountedWidget<W, S>>
    where
        W: 'static,
        S: 'static,
    {
        MountedWidget::mount(self)
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Mutate the widget, then redraw and notify listeners.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut W) -> R) -> R {
        let result = f(&mut self.widget);
        self.redraw();
        self.notify_listeners();
        result
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn context(&self) -> &S::Context {
        &self.context
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Event position relative to this widget.
    pub fn local_position(&self, event: &PointerEvent) -> Point {
        event.local_to(self.position)
    }

    /// Register a listener run on every state change.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&W) + 'static,
    {
        self.listeners.add(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Run every listener in registration order. Returns how many ran.
    pub fn notify_listeners(&mut self) -> usize {
        self.listeners.notify(&self.widget)
    }

    /// Draw the widget onto its context.
    pub fn redraw(&mut self) {
        self.widget.draw(&mut self.context);
    }

    /// Route a pointer event from the surface.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        log::trace!("{} {:?} at {:?}", self.surface.id(), event.kind, event.client_position);

        let mut cx = EventCx::new(self.position, self.context.size());
        let propagation = self.widget.raw_pointer(event, &mut cx);
        self.apply(cx);
        if propagation == Propagation::Handled {
            return;
        }

        match event.kind {
            PointerEventKind::Down => self.pointer_down(event),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up | PointerEventKind::Leave => self.pointer_up_or_leave(event),
        }
    }

    /// Start a gesture and interpret its first event.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        if self.gesture.advance(PointerEventKind::Down) == GestureAction::Interpret {
            self.interpret(event);
        }
    }

    /// Interpret `event` if a gesture is in progress.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        if self.gesture.advance(PointerEventKind::Move) == GestureAction::Interpret {
            self.interpret(event);
        }
    }

    /// End the current gesture.
    pub fn pointer_up_or_leave(&mut self, _event: &PointerEvent) {
        self.gesture.reset();
    }

    /// Drop all listeners and end any gesture.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        self.gesture.reset();
        log::debug!("Disposed widget on surface {}", self.surface.id());
    }

    fn interpret(&mut self, event: &PointerEvent) {
        let mut cx = EventCx::new(self.position, self.context.size());
        self.widget.interpret(event, &mut cx);
        self.apply(cx);
    }

    fn apply(&mut self, cx: EventCx) {
        if cx.redraw_requested() {
            self.redraw();
        }
        if cx.notify_requested() {
            self.notify_listeners();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawCommand;
    use crate::surface::{MemorySurface, MemorySurfaceHost};
    use kurbo::{Rect, Size};
    use peniko::Color;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Records every interpreted local position.
    #[derive(Default)]
    struct Recorder {
        hits: Vec<Point>,
        draws: Cell<usize>,
    }

    impl EventInterpreter for Recorder {
        fn interpret(&mut self, event: &PointerEvent, cx: &mut EventCx) {
            self.hits.push(cx.local_position(event));
            cx.request_redraw();
            cx.notify_listeners();
        }
    }

    impl Drawable for Recorder {
        fn draw(&self, ctx: &mut dyn DrawingContext) {
            self.draws.set(self.draws.get() + 1);
            ctx.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::from_rgba8(0, 0, 0, 255));
        }
    }

    /// Uses the default no-op hooks.
    struct Inert;

    impl EventInterpreter for Inert {}
    impl Drawable for Inert {}

    fn stage() -> (MemorySurfaceHost, MemorySurface) {
        let host = MemorySurfaceHost::new();
        let surface = host.add_canvas("stage", Size::new(100.0, 100.0));
        (host, surface)
    }

    #[test]
    fn test_construct_draws_once() {
        let (host, surface) = stage();
        let widget = CanvasWidget::new(&host, "stage", Point::ZERO, Recorder::default()).unwrap();

        assert_eq!(widget.widget().draws.get(), 1);
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(widget.gesture(), GestureState::Idle);
        assert_eq!(widget.listener_count(), 0);
        assert_eq!(widget.surface().id(), "stage");
    }

    #[test]
    fn test_construct_missing_surface() {
        let host = MemorySurfaceHost::new();
        let result = CanvasWidget::new(&host, "stage", Point::ZERO, Inert);
        assert!(matches!(result, Err(SurfaceError::NotFound(id)) if id == "stage"));
    }

    #[test]
    fn test_construct_without_context() {
        let host = MemorySurfaceHost::new();
        host.add_element("stage");
        let result = CanvasWidget::new(&host, "stage", Point::ZERO, Inert);
        assert!(matches!(result, Err(SurfaceError::NoDrawingContext(_))));
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let (host, surface) = stage();
        let mut widget = CanvasWidget::new(&host, "stage", Point::ZERO, Inert).unwrap();
        widget.handle_pointer_event(&PointerEvent::down(1.0, 1.0));
        widget.handle_pointer_event(&PointerEvent::moved(2.0, 2.0));
        widget.handle_pointer_event(&PointerEvent::up(2.0, 2.0));
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_down_moves_up_interpret_n_plus_one() {
        let (host, _surface) = stage();
        let mut widget =
            CanvasWidget::new(&host, "stage", Point::ZERO, Recorder::default()).unwrap();

        widget.handle_pointer_event(&PointerEvent::down(0.0, 0.0));
        for i in 1..=3 {
            widget.handle_pointer_event(&PointerEvent::moved(f64::from(i), 0.0));
        }
        widget.handle_pointer_event(&PointerEvent::up(3.0, 0.0));

        assert_eq!(
            widget.widget().hits,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(3.0, 0.0),
            ]
        );
        assert_eq!(widget.gesture(), GestureState::Idle);
    }

    #[test]
    fn test_moves_after_up_or_leave_are_ignored() {
        let (host, _surface) = stage();
        let mut widget =
            CanvasWidget::new(&host, "stage", Point::ZERO, Recorder::default()).unwrap();

        widget.handle_pointer_event(&PointerEvent::moved(1.0, 1.0));
        assert!(widget.widget().hits.is_empty());

        widget.handle_pointer_event(&PointerEvent::down(1.0, 1.0));
        widget.handle_pointer_event(&PointerEvent::up(1.0, 1.0));
        widget.handle_pointer_event(&PointerEvent::moved(2.0, 2.0));
        assert_eq!(widget.widget().hits.len(), 1);

        widget.handle_pointer_event(&PointerEvent::down(1.0, 1.0));
        widget.handle_pointer_event(&PointerEvent::leave(9.0, 9.0));
        widget.handle_pointer_event(&PointerEvent::moved(2.0, 2.0));
        assert_eq!(widget.widget().hits.len(), 2);
    }

    #[test]
    fn test_local_position() {
        let (host, _surface) = stage();
        let widget = CanvasWidget::new(&host, "stage", Point::new(10.0, 20.0), Inert).unwrap();
        assert_eq!(
            widget.local_position(&PointerEvent::moved(15.0, 25.0)),
            Point::new(5.0, 5.0)
        );
    }

    #[test]
    fn test_interpret_redraws_then_notifies() {
        let (host, _surface) = stage();
        let mut widget =
            CanvasWidget::new(&host, "stage", Point::ZERO, Recorder::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            widget.add_listener(move |w: &Recorder| {
                seen.borrow_mut().push((w.hits.len(), w.draws.get()))
            });
        }

        widget.handle_pointer_event(&PointerEvent::down(4.0, 4.0));
        widget.handle_pointer_event(&PointerEvent::moved(5.0, 4.0));

        // One initial draw, then one per interpreted event before listeners run.
        assert_eq!(*seen.borrow(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_listeners_in_registration_order() {
        let (host, _surface) = stage();
        let mut widget = CanvasWidget::new(&host, "stage", Point::ZERO, Inert).unwrap();
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            widget.add_listener(move |_| order.borrow_mut().push(i));
        }

        assert_eq!(widget.notify_listeners(), 3);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_notify_without_listeners() {
        let (host, _surface) = stage();
        let mut widget = CanvasWidget::new(&host, "stage", Point::ZERO, Inert).unwrap();
        assert_eq!(widget.notify_listeners(), 0);
    }

    /// Takes over pointer-down entirely.
    #[derive(Default)]
    struct Clicker {
        clicks: usize,
        interpreted: usize,
    }

    impl EventInterpreter for Clicker {
        fn interpret(&mut self, _event: &PointerEvent, _cx: &mut EventCx) {
            self.interpreted += 1;
        }

        fn raw_pointer(&mut self, event: &PointerEvent, cx: &mut EventCx) -> Propagation {
            if event.kind == PointerEventKind::Down {
                self.clicks += 1;
                cx.notify_listeners();
                return Propagation::Handled;
            }
            Propagation::Continue
        }
    }

    impl Drawable for Clicker {}

    #[test]
    fn test_raw_pointer_bypasses_gesture() {
        let (host, _surface) = stage();
        let mut widget =
            CanvasWidget::new(&host, "stage", Point::ZERO, Clicker::default()).unwrap();
        let notified = Rc::new(Cell::new(0));
        {
            let notified = notified.clone();
            widget.add_listener(move |_| notified.set(notified.get() + 1));
        }

        widget.handle_pointer_event(&PointerEvent::down(1.0, 1.0));
        widget.handle_pointer_event(&PointerEvent::moved(2.0, 2.0));

        assert_eq!(widget.widget().clicks, 1);
        assert_eq!(widget.widget().interpreted, 0);
        assert_eq!(widget.gesture(), GestureState::Idle);
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_update_redraws_and_notifies() {
        let (host, surface) = stage();
        let mut widget =
            CanvasWidget::new(&host, "stage", Point::ZERO, Recorder::default()).unwrap();
        let notified = Rc::new(Cell::new(false));
        {
            let notified = notified.clone();
            widget.add_listener(move |_| notified.set(true));
        }

        let len = widget.update(|w| {
            w.hits.push(Point::new(1.0, 1.0));
            w.hits.len()
        });

        assert_eq!(len, 1);
        assert!(notified.get());
        assert_eq!(
            surface.commands().last(),
            Some(&DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                color: [0, 0, 0, 255],
            })
        );
        assert_eq!(widget.widget().draws.get(), 2);
    }

    #[test]
    fn test_dispose_clears_listeners_and_gesture() {
        let (host, _surface) = stage();
        let mut widget =
            CanvasWidget::new(&host, "stage", Point::ZERO, Recorder::default()).unwrap();
        widget.add_listener(|_| {});
        widget.handle_pointer_event(&PointerEvent::down(1.0, 1.0));
        assert!(widget.gesture().is_dragging());

        widget.dispose();
        assert_eq!(widget.listener_count(), 0);
        assert_eq!(widget.gesture(), GestureState::Idle);
    }
}
