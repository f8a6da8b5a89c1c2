//! Profile page runtime.
//!
//! Wires a [`Manifest`] to live page state: one [`CountingNumber`] per stat,
//! the mobile [`MenuController`] and the active [`SectionNav`] link. The
//! page is generic over its collaborators so the same code drives the
//! browser bindings and the simulated ones used in tests.
//!
//! # Example
//!
//! ```
//! use folio::page::{LinkOrigin, ProfilePage};
//! use folio::manifest::Manifest;
//! use folio::{ManualEvents, ManualFrameScheduler, ManualVisibility, Section};
//! use std::rc::Rc;
//!
//! let manifest = Manifest::load(
//!     "folio: \"0.1\"\nprofile:\n  name: Ada\nstats:\n  - label: Years\n    target: 2\n",
//! )
//! .unwrap();
//! let scheduler = Rc::new(ManualFrameScheduler::new());
//! let visibility = Rc::new(ManualVisibility::new());
//! let events = ManualEvents::new();
//!
//! let mut page = ProfilePage::new(manifest, scheduler.clone(), visibility.clone(), |_: &()| false)
//!     .unwrap();
//! page.mount(["years"], &events);
//!
//! visibility.enter(&"years");
//! scheduler.run_frame(0.0);
//! scheduler.run_frame(2000.0);
//! assert_eq!(page.stats()[0].counter.display(), "2");
//!
//! page.follow_link("#skills", LinkOrigin::Desktop);
//! assert_eq!(page.nav().active(), Section::Skills);
//! ```

use folio_core::{
    CounterPhase, CountingNumber, FrameScheduler, GlobalEvents, MenuController, MenuState,
    Section, SectionNav, VisibilityDetector,
};
use folio_manifest::{Manifest, ManifestError};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Where a navigation link was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOrigin {
    /// Desktop navigation bar: moves the active highlight.
    Desktop,
    /// Mobile menu panel: closes the panel.
    Mobile,
}

/// A stat counter with its caption.
pub struct StatCounter<D: VisibilityDetector> {
    /// Caption under the number
    pub label: String,
    /// Live counter
    pub counter: CountingNumber<D>,
}

impl<D: VisibilityDetector> fmt::Debug for StatCounter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatCounter")
            .field("label", &self.label)
            .field("counter", &self.counter)
            .finish()
    }
}

/// Serializable view of the page state, handed to the host renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    /// Highlighted navigation link
    pub active_section: Section,
    /// Mobile menu state
    pub menu: MenuState,
    /// Stat counters in manifest order
    pub stats: Vec<StatSnapshot>,
}

/// Serializable view of one stat counter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSnapshot {
    /// Caption under the number
    pub label: String,
    /// Text to render, e.g. `7+`
    pub display: String,
    /// Lifecycle phase
    pub phase: CounterPhase,
}

type RenderListener<E> = Rc<dyn Fn(&E, &str)>;

/// Elements the stat counters currently render into.
struct RenderTargets<E> {
    elements: Vec<Option<E>>,
    listeners: Vec<RenderListener<E>>,
}

/// Live state of a profile page.
pub struct ProfilePage<D: VisibilityDetector, T: 'static> {
    manifest: Manifest,
    stats: Vec<StatCounter<D>>,
    targets: Rc<RefCell<RenderTargets<D::Element>>>,
    menu: MenuController<T>,
    nav: SectionNav,
}

impl<D, T> ProfilePage<D, T>
where
    D: VisibilityDetector,
    D::Element: 'static,
    T: 'static,
{
    /// Build the page state for `manifest`.
    ///
    /// `nav_contains` reports whether a click target lies inside the
    /// navigation bar.
    pub fn new(
        manifest: Manifest,
        scheduler: Rc<dyn FrameScheduler>,
        detector: Rc<D>,
        nav_contains: impl Fn(&T) -> bool + 'static,
    ) -> Result<Self, ManifestError> {
        manifest.validate()?;

        let stats = manifest
            .stats
            .iter()
            .map(|stat| {
                Ok(StatCounter {
                    label: stat.label.clone(),
                    counter: CountingNumber::new(
                        stat.counter_config()?,
                        Rc::clone(&scheduler),
                        Rc::clone(&detector),
                    ),
                })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?;

        let targets = Rc::new(RefCell::new(RenderTargets {
            elements: vec![None; stats.len()],
            listeners: Vec::new(),
        }));
        for (index, stat) in stats.iter().enumerate() {
            let targets = Rc::downgrade(&targets);
            stat.counter.on_value(move |text| {
                let Some(targets) = targets.upgrade() else {
                    return;
                };
                let (element, listeners) = {
                    let targets = targets.borrow();
                    (targets.elements[index].clone(), targets.listeners.clone())
                };
                if let Some(element) = element {
                    for listener in listeners {
                        listener(&element, text);
                    }
                }
            });
        }

        tracing::debug!(stats = stats.len(), "profile page created");

        Ok(Self {
            manifest,
            stats,
            targets,
            menu: MenuController::new(nav_contains),
            nav: SectionNav::new(),
        })
    }

    /// Call `listener(element, text)` whenever a stat counter bound to
    /// `element` changes its displayed text, and once per element on mount.
    ///
    /// Only the elements of the current mount are rendered into.
    pub fn on_render(&self, listener: impl Fn(&D::Element, &str) + 'static) {
        self.targets.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Attach the page to rendered elements and page-wide events.
    ///
    /// Stat elements are paired with counters in manifest order; extra
    /// elements are ignored and counters without one stay unbound. Returns
    /// the number of counters bound.
    pub fn mount<E>(&mut self, stat_elements: impl IntoIterator<Item = D::Element>, events: &E) -> usize
    where
        E: GlobalEvents<Target = T> + ?Sized,
    {
        self.clear_targets();
        let listeners = self.targets.borrow().listeners.clone();

        let mut bound = 0;
        for (index, (stat, element)) in self.stats.iter_mut().zip(stat_elements).enumerate() {
            self.targets.borrow_mut().elements[index] = Some(element.clone());
            stat.counter.bind(element.clone());

            let text = stat.counter.display();
            for listener in &listeners {
                listener(&element, &text);
            }
            bound += 1;
        }
        self.menu.mount(events);
        tracing::info!(bound, "profile page mounted");
        bound
    }

    /// Release every counter and listener.
    pub fn unmount(&mut self) {
        for stat in &mut self.stats {
            stat.counter.unmount();
        }
        self.menu.unmount();
        self.clear_targets();
        tracing::info!("profile page unmounted");
    }

    fn clear_targets(&self) {
        for element in &mut self.targets.borrow_mut().elements {
            *element = None;
        }
    }

    /// Handle a navigation link activation.
    ///
    /// Returns the section named by `href`, if any.
    pub fn follow_link(&mut self, href: &str, origin: LinkOrigin) -> Option<Section> {
        match origin {
            LinkOrigin::Desktop => self.nav.select_anchor(href),
            LinkOrigin::Mobile => {
                self.menu.activate_link();
                Section::from_anchor(href)
            }
        }
    }

    /// Loaded manifest.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Stat counters in manifest order.
    #[must_use]
    pub fn stats(&self) -> &[StatCounter<D>] {
        &self.stats
    }

    /// Mobile menu controller.
    #[must_use]
    pub fn menu(&self) -> &MenuController<T> {
        &self.menu
    }

    /// Active navigation link.
    #[must_use]
    pub fn nav(&self) -> &SectionNav {
        &self.nav
    }

    /// Current state for the host renderer.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            active_section: self.nav.active(),
            menu: self.menu.state(),
            stats: self
                .stats
                .iter()
                .map(|stat| StatSnapshot {
                    label: stat.label.clone(),
                    display: stat.counter.display(),
                    phase: stat.counter.phase(),
                })
                .collect(),
        }
    }

    /// [`Self::snapshot`] as JSON.
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }
}

impl<D, T> fmt::Debug for ProfilePage<D, T>
where
    D: VisibilityDetector,
    T: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilePage")
            .field("profile", &self.manifest.profile.name)
            .field("stats", &self.stats)
            .field("menu", &self.menu)
            .field("nav", &self.nav)
            .finish()
    }
}
