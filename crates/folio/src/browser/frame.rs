//! `requestAnimationFrame` scheduler.

use folio_core::{FrameCallback, FrameHandle, FrameScheduler};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Window};

type PendingFrames = Rc<RefCell<HashMap<i32, Closure<dyn FnMut(f64)>>>>;

/// Frame scheduler backed by the browser's animation frames.
///
/// Each request owns its closure until the frame fires or is cancelled.
/// Dropping the scheduler cancels every outstanding frame.
pub struct RafScheduler {
    window: Window,
    pending: PendingFrames,
}

impl RafScheduler {
    /// Create a scheduler for the current window.
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            window: window().ok_or("No window")?,
            pending: Rc::new(RefCell::new(HashMap::new())),
        })
    }

    /// Number of frames requested and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let id = Rc::new(Cell::new(0));
        let own_id = Rc::clone(&id);
        let pending = Rc::downgrade(&self.pending);
        let mut callback = Some(callback);

        let closure = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            // Keep our own closure alive until the callback returns.
            let _spent = pending
                .upgrade()
                .and_then(|pending| pending.borrow_mut().remove(&own_id.get()));
            if let Some(callback) = callback.take() {
                callback(now);
            }
        });

        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                id.set(handle);
                self.pending.borrow_mut().insert(handle, closure);
                FrameHandle(handle as u32)
            }
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let id = handle.0 as i32;
        if self.pending.borrow_mut().remove(&id).is_some() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                tracing::warn!(?err, "cancelAnimationFrame failed");
            }
        }
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        let ids: Vec<i32> = self.pending.borrow_mut().drain().map(|(id, _)| id).collect();
        for id in ids {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                tracing::warn!(?err, frame = id, "cancelAnimationFrame failed");
            }
        }
    }
}

impl fmt::Debug for RafScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RafScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
