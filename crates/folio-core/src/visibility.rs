//! Viewport entry detection.

use crate::subscription::Subscription;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback fired when an observed element enters the viewport.
pub type EnterCallback = Box<dyn FnOnce()>;

/// Reports the first time an element enters the viewport.
///
/// Implementations fire `on_enter` at most once per call to
/// [`VisibilityDetector::observe_once`] and never after the returned
/// subscription has been released.
pub trait VisibilityDetector {
    /// Element handle the detector observes.
    type Element: Clone + PartialEq;

    /// Observe `element` until it first enters the viewport.
    fn observe_once(&self, element: &Self::Element, on_enter: EnterCallback) -> Subscription;
}

struct Observer<E> {
    id: u64,
    element: E,
    on_enter: EnterCallback,
}

/// Visibility detector whose viewport entries are reported by the host.
///
/// Headless hosts and tests call [`ManualVisibility::enter`] when an element
/// scrolls into view.
pub struct ManualVisibility<E> {
    next_id: Cell<u64>,
    observers: Rc<RefCell<Vec<Observer<E>>>>,
}

impl<E> Default for ManualVisibility<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            observers: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E: Clone + PartialEq + 'static> ManualVisibility<E> {
    /// Create a detector with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live observations.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Report that `element` entered the viewport.
    ///
    /// Fires and removes every observation of `element`. Returns how many fired.
    pub fn enter(&self, element: &E) -> usize {
        let fired: Vec<Observer<E>> = {
            let mut observers = self.observers.borrow_mut();
            let (hit, rest): (Vec<_>, Vec<_>) =
                observers.drain(..).partition(|o| o.element == *element);
            *observers = rest;
            hit
        };

        let count = fired.len();
        for observer in fired {
            (observer.on_enter)();
        }
        count
    }
}

impl<E: Clone + PartialEq + 'static> VisibilityDetector for ManualVisibility<E> {
    type Element = E;

    fn observe_once(&self, element: &E, on_enter: EnterCallback) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.observers.borrow_mut().push(Observer {
            id,
            element: element.clone(),
            on_enter,
        });

        let observers = Rc::downgrade(&self.observers);
        Subscription::new(move || {
            if let Some(observers) = observers.upgrade() {
                observers.borrow_mut().retain(|o| o.id != id);
            }
        })
    }
}

impl<E> fmt::Debug for ManualVisibility<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualVisibility")
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}
