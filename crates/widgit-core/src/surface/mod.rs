//! Drawing surface abstraction.
//!
//! A [`SurfaceHost`] looks surfaces up by identifier (the DOM document on the
//! web, a map in memory). A [`Surface`] hands out its 2D drawing context and
//! forwards pointer events to an attached [`PointerSink`].

mod memory;

#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::{MemoryContext, MemoryListeners, MemorySurface, MemorySurfaceHost};

#[cfg(target_arch = "wasm32")]
pub use web::{WebContext, WebListeners, WebSurface, WebSurfaceHost};

use crate::draw::DrawingContext;
use crate::input::PointerEvent;
use kurbo::Point;
use std::rc::Rc;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface not found: {0}")]
    NotFound(String),
    #[error("Surface has no 2D drawing context: {0}")]
    NoDrawingContext(String),
    #[error("Failed to attach pointer listeners: {0}")]
    Listener(String),
    #[error("Surface error: {0}")]
    Other(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Callback receiving every pointer event a surface observes.
pub type PointerSink = Rc<dyn Fn(PointerEvent)>;

/// A drawable element.
pub trait Surface {
    type Context: DrawingContext;
    /// Keeps pointer listeners attached for as long as it lives.
    type Listeners;

    /// Identifier the surface was looked up by.
    fn id(&self) -> &str;

    /// Acquire the 2D drawing context. `Ok(None)` means the element exists
    /// but cannot produce one.
    fn context_2d(&self) -> SurfaceResult<Option<Self::Context>>;

    /// Forward down/move/up/leave events to `sink` until the returned guard
    /// is dropped.
    fn attach_pointer_listeners(&self, sink: PointerSink) -> SurfaceResult<Self::Listeners>;

    /// Top-left corner of the surface in client coordinates, when the host
    /// can tell.
    fn client_origin(&self) -> Option<Point> {
        None
    }
}

/// Looks surfaces up by identifier.
pub trait SurfaceHost {
    type Surface: Surface;

    fn surface(&self, id: &str) -> Option<Self::Surface>;
}

/// Whether the element `id` can produce a 2D drawing context.
///
/// Only context capability is reported as a boolean: an identifier with no
/// element at all is an error, not `false`.
pub fn surface_has_drawing_context<H: SurfaceHost>(host: &H, id: &str) -> SurfaceResult<bool> {
    let surface = host
        .surface(id)
        .ok_or_else(|| SurfaceError::NotFound(id.to_string()))?;
    Ok(surface.context_2d()?.is_some())
}
