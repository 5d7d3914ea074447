//! Window-level pointer tracking for desktop hover reveal.

use std::cell::Cell;
use std::rc::Rc;

use lumina_live_core::{PlayerError, Point};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{PointerEvent, Window};

/// Listens for `pointermove` on the window while alive.
///
/// Dropping the tracker removes the listener.
pub struct PointerTracker {
    window: Window,
    position: Rc<Cell<Option<Point>>>,
    callback: Closure<dyn FnMut(PointerEvent)>,
}

impl PointerTracker {
    pub fn new() -> Result<Self, PlayerError> {
        let window =
            web_sys::window().ok_or_else(|| PlayerError::Sink("No window available".to_string()))?;

        let position = Rc::new(Cell::new(None));
        let latest = Rc::clone(&position);
        let callback = Closure::new(move |event: PointerEvent| {
            latest.set(Some(Point::new(
                event.client_x() as f32,
                event.client_y() as f32,
            )));
        });

        window
            .add_event_listener_with_callback("pointermove", callback.as_ref().unchecked_ref())
            .map_err(|e| PlayerError::Sink(format!("Failed to track pointer: {:?}", e)))?;

        tracing::debug!("Pointer tracking started");
        Ok(Self {
            window,
            position,
            callback,
        })
    }

    /// Takes the latest pointer position (viewport coordinates) if the
    /// pointer moved since the last call.
    pub fn take_moved(&self) -> Option<Point> {
        self.position.take()
    }
}

impl Drop for PointerTracker {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "pointermove",
            self.callback.as_ref().unchecked_ref(),
        );
        tracing::debug!("Pointer tracking stopped");
    }
}
