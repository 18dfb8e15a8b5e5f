//! Change listeners attached to a widget.

use std::fmt;

type Listener<W> = Box<dyn FnMut(&W)>;

/// Append-only list of callbacks run when a widget's state changes.
///
/// Listeners run in registration order. There is no removal and no
/// deduplication; the list is emptied only by [`ListenerList::clear`] or
/// when it is dropped. A panicking listener stops the remaining ones from
/// running and the panic propagates to the caller of
/// [`ListenerList::notify`].
pub struct ListenerList<W> {
    listeners: Vec<Listener<W>>,
}

impl<W> Default for ListenerList<W> {
    fn default() -> Self {
        Self { listeners: Vec::new() }
    }
}

impl<W> fmt::Debug for ListenerList<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.listeners.len())
            .finish()
    }
}

impl<W> ListenerList<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener.
    pub fn add<F>(&mut self, listener: F)
    where
        F: FnMut(&W) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Run every listener against `widget`. Returns how many ran.
    pub fn notify(&mut self, widget: &W) -> usize {
        for listener in self.listeners.iter_mut() {
            listener(widget);
        }
        self.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop all listeners.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
