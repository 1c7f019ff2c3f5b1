#![forbid(unsafe_code)]

//! The ambient viewport and its listener registry.
//!
//! [`Window`] stands in for the environment-wide window object: it knows the
//! current inner size and dispatches [`Event::Resize`] to registered handlers.
//! Everything runs on the UI thread, so the handle is `Rc`-based and cheap to
//! clone; clones share the same size and listeners.
//!
//! # Lifecycle
//!
//! 1. [`Window::on`] registers a handler under a namespaced name; registering
//!    the same full name again replaces the previous handler.
//! 2. [`Window::resize`] records the new size, then calls every resize
//!    handler in registration order.
//! 3. [`Window::off`] removes exactly the registrations the name addresses.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::event::{Event, EventType, ListenerError, ListenerName};
use crate::geometry::Size;

type Handler = Rc<RefCell<dyn FnMut(&Event)>>;

struct Registration {
    name: ListenerName,
    handler: Handler,
}

struct WindowInner {
    size: Cell<Size>,
    listeners: RefCell<Vec<Registration>>,
}

/// Shared handle to the viewport.
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("size", &self.inner.size.get())
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

impl Window {
    /// Create a window with the given inner size and no listeners.
    pub fn new(size: Size) -> Self {
        Self {
            inner: Rc::new(WindowInner {
                size: Cell::new(size),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Current inner size. Always read fresh; never cache it across calls.
    #[inline]
    pub fn inner_size(&self) -> Size {
        self.inner.size.get()
    }

    /// Register `handler` under `name` (e.g. `"resize.curtain-1"`).
    ///
    /// A registration with the same full name is replaced.
    pub fn on<F>(&self, name: &str, handler: F) -> Result<(), ListenerError>
    where
        F: FnMut(&Event) + 'static,
    {
        let name: ListenerName = name.parse()?;
        if name.event().is_none() {
            return Err(ListenerError::Empty);
        }
        let handler: Handler = Rc::new(RefCell::new(handler));
        let mut listeners = self.inner.listeners.borrow_mut();
        match listeners.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.handler = handler,
            None => listeners.push(Registration { name, handler }),
        }
        Ok(())
    }

    /// Remove every registration addressed by `name`.
    ///
    /// `"resize.ns"` removes one listener, `".ns"` removes the whole
    /// namespace. Returns the number of registrations removed.
    pub fn off(&self, name: &str) -> Result<usize, ListenerError> {
        let name: ListenerName = name.parse()?;
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|r| !name.matches(&r.name));
        Ok(before - listeners.len())
    }

    /// Number of registered listeners across all event types.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Whether a registration exists under exactly `name`.
    pub fn has_listener(&self, name: &str) -> bool {
        let Ok(name) = name.parse::<ListenerName>() else {
            return false;
        };
        self.inner.listeners.borrow().iter().any(|r| r.name == name)
    }

    /// Record a new inner size and notify resize listeners.
    pub fn resize(&self, size: Size) {
        self.inner.size.set(size);
        self.dispatch(&Event::Resize(size));
    }

    /// Deliver `event` to every listener of its type.
    ///
    /// The handler list is snapshotted first so handlers may call
    /// [`Window::on`] / [`Window::off`]. A handler that is already running
    /// (re-entrant dispatch) is skipped.
    pub fn dispatch(&self, event: &Event) {
        let event_type: EventType = event.event_type();
        let handlers: Vec<Handler> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|r| r.name.event() == Some(event_type))
            .map(|r| Rc::clone(&r.handler))
            .collect();

        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => (*handler)(event),
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    crate::logging::debug!(event = %event_type, "skipping re-entrant listener");
                }
            }
        }
    }
}
