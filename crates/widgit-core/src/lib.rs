//! Widgit Core Library
//!
//! Base abstraction for interactive canvas-drawn widgets: pointer event
//! routing, the drag gesture state machine, change listeners and the
//! drawing surface plumbing that concrete widgets build on.

pub mod draw;
pub mod gesture;
pub mod input;
pub mod listeners;
pub mod surface;
pub mod widget;

pub use draw::{DrawCommand, DrawingContext};
pub use gesture::{GestureAction, GestureState};
pub use input::{Modifiers, MouseButton, PointerEvent, PointerEventKind};
pub use listeners::ListenerList;
pub use surface::{
    MemoryContext, MemorySurface, MemorySurfaceHost, PointerSink, Surface, SurfaceError,
    SurfaceHost, SurfaceResult, surface_has_drawing_context,
};
pub use widget::{
    CanvasWidget, Drawable, EventCx, EventInterpreter, MountedWidget, Propagation, Widget,
};

#[cfg(target_arch = "wasm32")]
pub use surface::{WebContext, WebSurface, WebSurfaceHost};

pub use kurbo;
pub use peniko;
