//! Viewport-triggered counting animation.
//!
//! A [`CountingNumber`] counts from zero to its target once its bound element
//! first enters the viewport. Progression is a chain of frame callbacks, each
//! scheduling at most one successor, over the pure state machine in
//! [`AnimationRun`]:
//!
//! ```text
//! Idle --enter--> Running --progress == 1--> Complete
//!   \               |
//!    +--unmount-----+-----> Destroyed
//! ```
//!
//! # Examples
//!
//! ```
//! use folio_core::{CounterConfig, CountingNumber, ManualFrameScheduler, ManualVisibility};
//! use std::rc::Rc;
//!
//! let scheduler = Rc::new(ManualFrameScheduler::new());
//! let visibility = Rc::new(ManualVisibility::new());
//!
//! let mut counter = CountingNumber::new(
//!     CounterConfig::new(10).duration_ms(2000).suffix("+"),
//!     scheduler.clone(),
//!     visibility.clone(),
//! );
//! counter.bind("projects");
//! visibility.enter(&"projects");
//!
//! scheduler.run_frame(0.0);
//! scheduler.run_frame(1000.0);
//! assert_eq!(counter.display(), "5+");
//!
//! scheduler.run_frame(2000.0);
//! assert_eq!(counter.display(), "10+");
//! assert!(counter.is_complete());
//! ```

use crate::error::FolioError;
use crate::progress::{counted_value, linear_progress, DEFAULT_DURATION_MS};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::subscription::Subscription;
use crate::visibility::VisibilityDetector;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

const fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

/// Configuration of a counting animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Final displayed value
    pub target: u64,
    /// Time to reach the target, in milliseconds (0 = immediately)
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Text appended to the displayed value
    #[serde(default)]
    pub suffix: String,
}

impl CounterConfig {
    /// Count to `target` over the default duration with no suffix.
    #[must_use]
    pub const fn new(target: u64) -> Self {
        Self {
            target,
            duration_ms: DEFAULT_DURATION_MS,
            suffix: String::new(),
        }
    }

    /// Build from a signed target, rejecting negative values.
    pub fn try_from_signed(target: i64) -> Result<Self, FolioError> {
        u64::try_from(target)
            .map(Self::new)
            .map_err(|_| FolioError::NegativeTarget(target))
    }

    /// Build from a host number (e.g. a JavaScript `number`).
    ///
    /// Fractions are floored; NaN, infinities and negatives are rejected.
    pub fn try_from_number(target: f64) -> Result<Self, FolioError> {
        if !target.is_finite() {
            return Err(FolioError::NonFiniteTarget(target));
        }
        Self::try_from_signed(target.floor() as i64)
    }

    /// Set the duration. Zero or negative values complete on the first frame.
    #[must_use]
    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = u64::try_from(duration_ms).unwrap_or(0);
        self
    }

    /// Set the suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Lifecycle phase of a counting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CounterPhase {
    /// Waiting for the element to become visible
    #[default]
    Idle,
    /// Counting; a frame is scheduled
    Running,
    /// Target reached; nothing scheduled
    Complete,
    /// Unmounted before completing
    Destroyed,
}

/// Outcome of evaluating one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Schedule another frame
    Continue,
    /// Stop scheduling
    Stop,
}

/// State of one counting animation, independent of any scheduler.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    config: CounterConfig,
    start: Option<f64>,
    current: u64,
    phase: CounterPhase,
    triggered: bool,
}

impl AnimationRun {
    /// Create an idle run.
    #[must_use]
    pub const fn new(config: CounterConfig) -> Self {
        Self {
            config,
            start: None,
            current: 0,
            phase: CounterPhase::Idle,
            triggered: false,
        }
    }

    /// Arm the run. Returns `false` if it was already triggered or destroyed.
    pub fn arm(&mut self) -> bool {
        if self.phase != CounterPhase::Idle {
            return false;
        }
        self.phase = CounterPhase::Running;
        self.triggered = true;
        true
    }

    /// Evaluate a frame at timestamp `now` (milliseconds).
    ///
    /// The first frame fixes the start timestamp. The displayed value never
    /// decreases, even if the host clock steps backwards.
    pub fn advance(&mut self, now: f64) -> FrameStep {
        if self.phase != CounterPhase::Running {
            return FrameStep::Stop;
        }

        let start = *self.start.get_or_insert(now);
        let progress = linear_progress(now - start, self.config.duration_ms);
        self.current = self
            .current
            .max(counted_value(progress, self.config.target));

        if progress >= 1.0 || self.current == self.config.target {
            self.current = self.config.target;
            self.phase = CounterPhase::Complete;
            FrameStep::Stop
        } else {
            FrameStep::Continue
        }
    }

    /// Mark the run destroyed. Completed runs stay complete.
    pub fn destroy(&mut self) {
        if matches!(self.phase, CounterPhase::Idle | CounterPhase::Running) {
            self.phase = CounterPhase::Destroyed;
        }
    }

    /// Configuration of the run.
    #[must_use]
    pub const fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Current counted value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.current
    }

    /// Timestamp of the first evaluated frame.
    #[must_use]
    pub const fn start_timestamp(&self) -> Option<f64> {
        self.start
    }

    /// Whether the run was ever armed by a visibility signal.
    #[must_use]
    pub const fn has_triggered(&self) -> bool {
        self.triggered
    }

    /// Whether the target has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == CounterPhase::Complete
    }

    /// Value followed by the configured suffix.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.current, self.config.suffix)
    }
}

type ValueListener = Rc<dyn Fn(&str)>;

struct RunSlot {
    run: AnimationRun,
    pending: Option<FrameHandle>,
    listeners: Vec<ValueListener>,
}

type SharedRun = Rc<RefCell<RunSlot>>;

/// Counter bound to an element, counting once it becomes visible.
///
/// Dropping the counter unmounts it: the visibility observation is released
/// and any pending frame is cancelled.
pub struct CountingNumber<D: VisibilityDetector> {
    slot: SharedRun,
    scheduler: Rc<dyn FrameScheduler>,
    detector: Rc<D>,
    bound: Option<D::Element>,
    visibility: Option<Subscription>,
}

impl<D: VisibilityDetector> CountingNumber<D> {
    /// Create an unbound counter.
    pub fn new(config: CounterConfig, scheduler: Rc<dyn FrameScheduler>, detector: Rc<D>) -> Self {
        Self {
            slot: fresh_slot(config),
            scheduler,
            detector,
            bound: None,
            visibility: None,
        }
    }

    /// Observe `element`.
    ///
    /// Rebinding the same element is a no-op. Binding a different element
    /// remounts: the current run is torn down and a new idle run waits for the
    /// new element.
    pub fn bind(&mut self, element: D::Element) {
        if self.bound.as_ref() == Some(&element) {
            return;
        }

        self.teardown();
        let (config, listeners) = {
            let slot = self.slot.borrow();
            (slot.run.config().clone(), slot.listeners.clone())
        };
        self.slot = fresh_slot(config);
        self.slot.borrow_mut().listeners = listeners;

        let weak = Rc::downgrade(&self.slot);
        let scheduler = Rc::clone(&self.scheduler);
        let subscription = self.detector.observe_once(
            &element,
            Box::new(move || {
                if let Some(slot) = weak.upgrade() {
                    enter(&slot, &scheduler);
                }
            }),
        );

        self.visibility = Some(subscription);
        self.bound = Some(element);
    }

    /// Viewport entry signal. Ignored once the run has triggered.
    pub fn on_visibility_enter(&self) {
        enter(&self.slot, &self.scheduler);
    }

    /// Notify `listener` with the displayed text whenever the value changes.
    ///
    /// Listeners survive rebinding.
    pub fn on_value(&self, listener: impl Fn(&str) + 'static) {
        self.slot.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Tear the counter down, cancelling any pending frame.
    pub fn unmount(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.visibility.take();
        self.bound = None;

        let pending = {
            let mut slot = self.slot.borrow_mut();
            slot.run.destroy();
            slot.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel_frame(handle);
            tracing::debug!(frame = handle.0, "counter unmounted mid-run, frame cancelled");
        }
    }

    /// Whether an element is bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Configured target and suffix.
    #[must_use]
    pub fn config(&self) -> CounterConfig {
        self.slot.borrow().run.config().clone()
    }

    /// Current counted value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.slot.borrow().run.value()
    }

    /// Value followed by the suffix, as rendered by the host.
    #[must_use]
    pub fn display(&self) -> String {
        self.slot.borrow().run.display()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CounterPhase {
        self.slot.borrow().run.phase()
    }

    /// Whether the run was armed.
    #[must_use]
    pub fn has_triggered(&self) -> bool {
        self.slot.borrow().run.has_triggered()
    }

    /// Whether the target was reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slot.borrow().run.is_complete()
    }

    /// Timestamp of the first evaluated frame.
    #[must_use]
    pub fn start_timestamp(&self) -> Option<f64> {
        self.slot.borrow().run.start_timestamp()
    }

    /// Whether a frame callback is pending.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.slot.borrow().pending.is_some()
    }
}

impl<D: VisibilityDetector> Drop for CountingNumber<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<D: VisibilityDetector> fmt::Debug for CountingNumber<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("CountingNumber")
            .field("run", &slot.run)
            .field("pending", &slot.pending)
            .field("bound", &self.bound.is_some())
            .finish()
    }
}

fn fresh_slot(config: CounterConfig) -> SharedRun {
    Rc::new(RefCell::new(RunSlot {
        run: AnimationRun::new(config),
        pending: None,
        listeners: Vec::new(),
    }))
}

fn enter(slot: &SharedRun, scheduler: &Rc<dyn FrameScheduler>) {
    let armed = slot.borrow_mut().run.arm();
    if armed {
        tracing::debug!(target_value = slot.borrow().run.config().target, "counter armed");
        schedule_frame(slot, scheduler);
    }
}

fn schedule_frame(slot: &SharedRun, scheduler: &Rc<dyn FrameScheduler>) {
    let weak: Weak<RefCell<RunSlot>> = Rc::downgrade(slot);
    let next = Rc::clone(scheduler);
    let handle = scheduler.request_frame(Box::new(move |now| {
        // Unmounted counters drop their slot; late frames find nothing.
        if let Some(slot) = weak.upgrade() {
            on_frame(&slot, &next, now);
        }
    }));
    slot.borrow_mut().pending = Some(handle);
}

fn on_frame(slot: &SharedRun, scheduler: &Rc<dyn FrameScheduler>, now: f64) {
    let (step, update) = {
        let mut slot = slot.borrow_mut();
        slot.pending = None;
        let before = slot.run.value();
        let step = slot.run.advance(now);
        tracing::trace!(now, value = slot.run.value(), "counter frame");

        let update = (slot.run.value() != before && !slot.listeners.is_empty())
            .then(|| (slot.run.display(), slot.listeners.clone()));
        (step, update)
    };

    if let Some((text, listeners)) = update {
        for listener in listeners {
            listener(&text);
        }
    }

    match step {
        FrameStep::Continue => {
            // A value listener may have unmounted the counter.
            let running = slot.borrow().run.phase() == CounterPhase::Running;
            if running {
                schedule_frame(slot, scheduler);
            }
        }
        FrameStep::Stop => {
            let slot = slot.borrow();
            if slot.run.is_complete() {
                tracing::debug!(value = slot.run.value(), "counter complete");
            }
        }
    }
}
