//! Document-wide click and scroll listeners.

use crate::subscription::Subscription;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handler for a click, given the event's originating target.
pub type ClickHandler<T> = Box<dyn FnMut(&T)>;

/// Handler for a scroll event.
pub type ScrollHandler = Box<dyn FnMut()>;

/// Global event targets shared by every component on the page.
///
/// In the browser these are `document` (click) and `window` (scroll).
pub trait GlobalEvents {
    /// Type identifying a click's originating element.
    type Target;

    /// Listen for clicks anywhere on the page.
    fn on_click(&self, handler: ClickHandler<Self::Target>) -> Subscription;

    /// Listen for page scrolls.
    fn on_scroll(&self, handler: ScrollHandler) -> Subscription;
}

type Shared<H> = Rc<RefCell<Vec<(u64, Rc<RefCell<H>>)>>>;

/// In-memory global event targets.
///
/// Dispatch follows DOM rules: a listener removed by an earlier listener of
/// the same dispatch is not called.
pub struct ManualEvents<T> {
    next_id: Cell<u64>,
    click: Shared<ClickHandler<T>>,
    scroll: Shared<ScrollHandler>,
}

impl<T> Default for ManualEvents<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            click: Rc::new(RefCell::new(Vec::new())),
            scroll: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: 'static> ManualEvents<T> {
    /// Create event targets with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached click listeners.
    #[must_use]
    pub fn click_listeners(&self) -> usize {
        self.click.borrow().len()
    }

    /// Number of attached scroll listeners.
    #[must_use]
    pub fn scroll_listeners(&self) -> usize {
        self.scroll.borrow().len()
    }

    /// Total attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.click_listeners() + self.scroll_listeners()
    }

    /// Dispatch a click originating at `target`. Returns handlers invoked.
    pub fn click(&self, target: &T) -> usize {
        dispatch(&self.click, |handler| handler(target))
    }

    /// Dispatch a scroll event. Returns handlers invoked.
    pub fn scroll(&self) -> usize {
        dispatch(&self.scroll, |handler| handler())
    }

    fn attach<H: 'static>(&self, list: &Shared<H>, handler: H) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        list.borrow_mut().push((id, Rc::new(RefCell::new(handler))));

        let list = Rc::downgrade(list);
        Subscription::new(move || {
            if let Some(list) = list.upgrade() {
                list.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }
}

fn dispatch<H>(list: &Shared<H>, mut call: impl FnMut(&mut H)) -> usize {
    let ids: Vec<u64> = list.borrow().iter().map(|(id, _)| *id).collect();
    let mut invoked = 0;
    for id in ids {
        let handler = list
            .borrow()
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, h)| Rc::clone(h));
        if let Some(handler) = handler {
            call(&mut handler.borrow_mut());
            invoked += 1;
        }
    }
    invoked
}

impl<T: 'static> GlobalEvents for ManualEvents<T> {
    type Target = T;

    fn on_click(&self, handler: ClickHandler<T>) -> Subscription {
        self.attach(&self.click, handler)
    }

    fn on_scroll(&self, handler: ScrollHandler) -> Subscription {
        self.attach(&self.scroll, handler)
    }
}

impl<T> fmt::Debug for ManualEvents<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualEvents")
            .field("click", &self.click.borrow().len())
            .field("scroll", &self.scroll.borrow().len())
            .finish()
    }
}
