//! DOM event subscriptions owned by a mounted board.
//!
//! Each [`Listeners`] keeps the closures it registered alive and removes them
//! from the target when dropped, so tearing down an engine leaves no handlers
//! behind on the element.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use crate::error::DrawError;

/// Event listeners registered on one target.
pub struct Listeners {
    target: EventTarget,
    entries: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    #[must_use]
    pub fn new(target: EventTarget) -> Self {
        Self { target, entries: Vec::new() }
    }

    /// Register `handler` for `event_name` on the target.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Dom`] if the browser rejects the registration.
    pub fn listen<F>(&mut self, event_name: &'static str, handler: F) -> Result<(), DrawError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        self.target
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
        self.entries.push((event_name, closure));
        Ok(())
    }

    /// Event names in registration order.
    pub fn events(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (event_name, closure) in self.entries.drain(..) {
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {event_name} listener: {err:?}");
            }
        }
    }
}
