//! In-memory surfaces for testing and headless use.

use super::{PointerSink, Surface, SurfaceError, SurfaceHost, SurfaceResult};
use crate::draw::{DrawCommand, DrawingContext, rgba8};
use crate::input::PointerEvent;
use kurbo::{Circle, Line, Point, Rect, Size};
use peniko::Color;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// In-memory element registry standing in for a DOM document.
#[derive(Clone, Default)]
pub struct MemorySurfaceHost {
    surfaces: Rc<RefCell<HashMap<String, MemorySurface>>>,
}

impl MemorySurfaceHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canvas-like element of `size` with its origin at `(0, 0)`.
    pub fn add_canvas(&self, id: &str, size: Size) -> MemorySurface {
        self.insert(id, Some(size), Point::ZERO)
    }

    /// Register a canvas-like element whose top-left corner sits at `origin`
    /// in client coordinates.
    pub fn add_canvas_at(&self, id: &str, size: Size, origin: Point) -> MemorySurface {
        self.insert(id, Some(size), origin)
    }

    /// Register an element that cannot produce a 2D context.
    pub fn add_element(&self, id: &str) -> MemorySurface {
        self.insert(id, None, Point::ZERO)
    }

    fn insert(&self, id: &str, size: Option<Size>, origin: Point) -> MemorySurface {
        let surface = MemorySurface {
            inner: Rc::new(SurfaceEntry {
                id: id.to_string(),
                size,
                origin,
                commands: Rc::new(RefCell::new(Vec::new())),
                sinks: RefCell::new(Vec::new()),
                next_key: Cell::new(0),
            }),
        };
        self.surfaces.borrow_mut().insert(id.to_string(), surface.clone());
        surface
    }

    /// Deliver `event` to the listeners attached to surface `id`.
    /// Returns how many listeners received it.
    pub fn dispatch(&self, id: &str, event: PointerEvent) -> SurfaceResult<usize> {
        let surface = self
            .surface(id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))?;
        Ok(surface.dispatch(event))
    }

    /// Identifiers of all registered elements.
    pub fn ids(&self) -> Vec<String> {
        self.surfaces.borrow().keys().cloned().collect()
    }
}

impl SurfaceHost for MemorySurfaceHost {
    type Surface = MemorySurface;

    fn surface(&self, id: &str) -> Option<MemorySurface> {
        self.surfaces.borrow().get(id).cloned()
    }
}

struct SurfaceEntry {
    id: String,
    /// `None` for elements without a 2D context.
    size: Option<Size>,
    origin: Point,
    commands: Rc<RefCell<Vec<DrawCommand>>>,
    sinks: RefCell<Vec<(u64, PointerSink)>>,
    next_key: Cell<u64>,
}

/// Handle to an in-memory element. Clones share the same element.
#[derive(Clone)]
pub struct MemorySurface {
    inner: Rc<SurfaceEntry>,
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySurface")
            .field("id", &self.inner.id)
            .field("size", &self.inner.size)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl MemorySurface {
    /// Snapshot of every command drawn so far.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.inner.commands.borrow().clone()
    }

    /// Take the recorded commands, leaving the log empty.
    pub fn take_commands(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.inner.commands.borrow_mut())
    }

    /// Number of attached pointer sinks.
    pub fn listener_count(&self) -> usize {
        self.inner.sinks.borrow().len()
    }

    /// Deliver `event` to every attached sink.
    pub fn dispatch(&self, event: PointerEvent) -> usize {
        // Sinks may detach while running, so iterate over a snapshot.
        let sinks: Vec<PointerSink> = self
            .inner
            .sinks
            .borrow()
            .iter()
            .map(|(_, sink)| sink.clone())
            .collect();
        for sink in &sinks {
            sink(event);
        }
        sinks.len()
    }
}

impl Surface for MemorySurface {
    type Context = MemoryContext;
    type Listeners = MemoryListeners;

    fn id(&self) -> &str {
        &self.inner.id
    }

    fn context_2d(&self) -> SurfaceResult<Option<MemoryContext>> {
        Ok(self.inner.size.map(|size| MemoryContext {
            size,
            commands: self.inner.commands.clone(),
        }))
    }

    fn attach_pointer_listeners(&self, sink: PointerSink) -> SurfaceResult<MemoryListeners> {
        let key = self.inner.next_key.get();
        self.inner.next_key.set(key + 1);
        self.inner.sinks.borrow_mut().push((key, sink));
        Ok(MemoryListeners {
            surface: Rc::downgrade(&self.inner),
            key,
        })
    }

    fn client_origin(&self) -> Option<Point> {
        Some(self.inner.origin)
    }
}

/// Detaches its sink from the surface when dropped.
pub struct MemoryListeners {
    surface: Weak<SurfaceEntry>,
    key: u64,
}

impl Drop for MemoryListeners {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.upgrade() {
            surface.sinks.borrow_mut().retain(|(key, _)| *key != self.key);
        }
    }
}

/// Drawing context that records commands into its surface's log.
#[derive(Debug, Clone)]
pub struct MemoryContext {
    size: Size,
    commands: Rc<RefCell<Vec<DrawCommand>>>,
}

impl MemoryContext {
    fn record(&mut self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl DrawingContext for MemoryContext {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, rect: Rect) {
        self.record(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::FillRect { rect, color: rgba8(color) });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.record(DrawCommand::StrokeRect { rect, color: rgba8(color), width });
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.record(DrawCommand::FillCircle { circle, color: rgba8(color) });
    }

    fn stroke_line(&mut self, line: Line, color: Color, width: f64) {
        self.record(DrawCommand::StrokeLine { line, color: rgba8(color), width });
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Color) {
        self.record(DrawCommand::FillText {
            text: text.to_string(),
            origin,
            color: rgba8(color),
        });
    }
}
