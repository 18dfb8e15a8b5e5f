//! Widgets wired to their surface's pointer events.

use super::{CanvasWidget, Widget};
use crate::input::PointerEvent;
use crate::surface::{PointerSink, Surface, SurfaceResult};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// A [`CanvasWidget`] receiving pointer events from its surface.
///
/// Pointer listeners stay attached until [`MountedWidget::dispose`] is
/// called or the value is dropped. The surface only holds a weak reference
/// to the widget.
pub struct MountedWidget<W, S: Surface> {
    inner: Rc<RefCell<CanvasWidget<W, S>>>,
    listeners: Option<S::Listeners>,
}

impl<W: Widget + 'static, S: Surface + 'static> MountedWidget<W, S> {
    pub(crate) fn mount(widget: CanvasWidget<W, S>) -> SurfaceResult<Self> {
        let inner = Rc::new(RefCell::new(widget));

        let weak = Rc::downgrade(&inner);
        let sink: PointerSink = Rc::new(move |event: PointerEvent| {
            let Some(widget) = weak.upgrade() else {
                return;
            };
            // A listener dispatching into its own widget would re-enter here.
            match widget.try_borrow_mut() {
                Ok(mut widget) => widget.handle_pointer_event(&event),
                Err(_) => log::warn!("Dropped re-entrant {:?} pointer event", event.kind),
            }
        });

        let listeners = inner.borrow().surface().attach_pointer_listeners(sink)?;
        log::debug!("Attached pointer listeners to {}", inner.borrow().surface().id());

        Ok(Self {
            inner,
            listeners: Some(listeners),
        })
    }

    pub fn borrow(&self) -> Ref<'_, CanvasWidget<W, S>> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, CanvasWidget<W, S>> {
        self.inner.borrow_mut()
    }

    /// Register a listener run on every state change.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: FnMut(&W) + 'static,
    {
        self.inner.borrow_mut().add_listener(listener);
    }

    /// Whether pointer listeners are still attached.
    pub fn is_attached(&self) -> bool {
        self.listeners.is_some()
    }

    /// Detach pointer listeners, drop change listeners and end any gesture.
    pub fn dispose(&mut self) {
        self.listeners = None;
        self.inner.borrow_mut().dispose();
    }
}
