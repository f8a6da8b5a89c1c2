//! Frame scheduling abstraction.
//!
//! Mirrors the browser's `requestAnimationFrame` contract: a callback is
//! queued for the next paint and receives the frame timestamp in
//! milliseconds. [`ManualFrameScheduler`] drives frames from an explicit
//! clock for headless hosts and tests.

use std::cell::{Cell, RefCell};
use std::fmt;

/// Callback invoked with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Handle to a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Schedules callbacks on the next paint cycle.
pub trait FrameScheduler {
    /// Queue `callback` for the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// In-memory frame scheduler driven by [`ManualFrameScheduler::run_frame`].
#[derive(Default)]
pub struct ManualFrameScheduler {
    next_id: Cell<u32>,
    now: Cell<f64>,
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl ManualFrameScheduler {
    /// Create a scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for a frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Timestamp of the last frame run.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    /// Run one frame at `now`.
    ///
    /// Only callbacks queued before the call run; callbacks they schedule
    /// wait for the next frame. A callback cancelled by an earlier callback of
    /// the same frame does not run. Returns the number of callbacks invoked.
    pub fn run_frame(&self, now: f64) -> usize {
        self.now.set(now);
        let due: Vec<FrameHandle> = self.queue.borrow().iter().map(|(h, _)| *h).collect();

        let mut ran = 0;
        for handle in due {
            let callback = {
                let mut queue = self.queue.borrow_mut();
                queue
                    .iter()
                    .position(|(h, _)| *h == handle)
                    .map(|index| queue.remove(index).1)
            };
            if let Some(callback) = callback {
                callback(now);
                ran += 1;
            }
        }
        ran
    }

    /// Advance the clock by `delta_ms` and run one frame.
    pub fn advance(&self, delta_ms: f64) -> usize {
        self.run_frame(self.now.get() + delta_ms)
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.queue.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

impl fmt::Debug for ManualFrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualFrameScheduler")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}
