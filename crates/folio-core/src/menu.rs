//! Navigation menu visibility.
//!
//! [`MenuController`] owns the open/closed state of the mobile navigation
//! panel. While mounted it listens to page-wide clicks and scrolls and closes
//! the panel on a click outside the navigation root or on any scroll.
//!
//! ```text
//! Closed --toggle--> Open
//! Open --toggle | close | outside click | scroll | link--> Closed
//! ```

use crate::events::GlobalEvents;
use crate::subscription::Subscription;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Open state of the navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuState {
    /// Panel hidden
    #[default]
    Closed,
    /// Panel shown
    Open,
}

impl MenuState {
    /// Whether the panel is shown.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// The opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// What caused a menu state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTrigger {
    /// Toggle button
    Toggle,
    /// Explicit close request
    Close,
    /// Click outside the navigation root
    OutsideClick,
    /// Page scroll
    Scroll,
    /// Link inside the panel activated
    Link,
}

type Boundary<T> = Box<dyn Fn(&T) -> bool>;
type ChangeListener = Rc<dyn Fn(MenuState)>;

struct MenuShared<T> {
    state: Cell<MenuState>,
    mounted: Cell<bool>,
    contains: Boundary<T>,
    listeners: RefCell<Vec<ChangeListener>>,
}

impl<T> MenuShared<T> {
    fn set(&self, next: MenuState, trigger: MenuTrigger) {
        let previous = self.state.replace(next);
        if previous == next {
            return;
        }
        tracing::debug!(?previous, ?next, ?trigger, "menu state changed");

        let listeners: Vec<ChangeListener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(next);
        }
    }

    fn handle_click(&self, target: &T) {
        if self.mounted.get() && self.state.get().is_open() && !(self.contains)(target) {
            self.set(MenuState::Closed, MenuTrigger::OutsideClick);
        }
    }

    fn handle_scroll(&self) {
        if self.mounted.get() && self.state.get().is_open() {
            self.set(MenuState::Closed, MenuTrigger::Scroll);
        }
    }
}

/// Click and scroll registrations held while mounted.
#[derive(Debug)]
struct ListenerPair {
    _click: Subscription,
    _scroll: Subscription,
}

/// Open/closed state of the navigation panel with auto-dismissal.
///
/// `T` identifies a click's originating element; the boundary predicate
/// given at construction decides whether it lies inside the navigation root.
/// Dropping the controller detaches its global listeners.
///
/// # Examples
///
/// ```
/// use folio_core::{ManualEvents, MenuController};
///
/// let events = ManualEvents::new();
/// let mut menu = MenuController::new(|target: &&str| target.starts_with("nav"));
/// menu.mount(&events);
///
/// menu.toggle();
/// events.click(&"nav-link");
/// assert!(menu.is_open());
///
/// events.click(&"hero");
/// assert!(!menu.is_open());
/// ```
pub struct MenuController<T: 'static> {
    shared: Rc<MenuShared<T>>,
    registration: Option<ListenerPair>,
}

impl<T: 'static> MenuController<T> {
    /// Create a closed, unmounted controller.
    ///
    /// `contains` reports whether a click target lies inside the navigation
    /// root (the panel or its toggle button).
    pub fn new(contains: impl Fn(&T) -> bool + 'static) -> Self {
        Self {
            shared: Rc::new(MenuShared {
                state: Cell::new(MenuState::Closed),
                mounted: Cell::new(false),
                contains: Box::new(contains),
                listeners: RefCell::new(Vec::new()),
            }),
            registration: None,
        }
    }

    /// Attach the outside-click and scroll listeners.
    ///
    /// Mounting again releases the previous pair first.
    pub fn mount<E>(&mut self, events: &E)
    where
        E: GlobalEvents<Target = T> + ?Sized,
    {
        self.unmount();

        let weak = Rc::downgrade(&self.shared);
        let click = events.on_click(Box::new(move |target: &T| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_click(target);
            }
        }));

        let weak = Rc::downgrade(&self.shared);
        let scroll = events.on_scroll(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.handle_scroll();
            }
        }));

        self.registration = Some(ListenerPair {
            _click: click,
            _scroll: scroll,
        });
        self.shared.mounted.set(true);
        tracing::debug!("menu listeners attached");
    }

    /// Detach both listeners, whatever the current state.
    pub fn unmount(&mut self) {
        self.shared.mounted.set(false);
        if self.registration.take().is_some() {
            tracing::debug!("menu listeners detached");
        }
    }

    /// Whether the global listeners are attached.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.registration.is_some()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.shared.state.get()
    }

    /// Whether the panel is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Flip the panel.
    pub fn toggle(&self) {
        self.shared.set(self.state().toggled(), MenuTrigger::Toggle);
    }

    /// Close the panel. Idempotent.
    pub fn close(&self) {
        self.shared.set(MenuState::Closed, MenuTrigger::Close);
    }

    /// A link inside the panel was followed; close the panel.
    pub fn activate_link(&self) {
        self.shared.set(MenuState::Closed, MenuTrigger::Link);
    }

    /// Notify `listener` of every state transition.
    pub fn on_change(&self, listener: impl Fn(MenuState) + 'static) {
        self.shared.listeners.borrow_mut().push(Rc::new(listener));
    }
}

impl<T: 'static> Drop for MenuController<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<T: 'static> fmt::Debug for MenuController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuController")
            .field("state", &self.state())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
