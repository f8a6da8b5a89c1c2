//! Core state machines for the Folio profile site.
//!
//! This crate holds the only parts of the site with timing and state
//! behavior, independent of any browser API:
//! - Viewport counters: [`CountingNumber`] over the pure [`AnimationRun`]
//! - Navigation menu: [`MenuController`] with outside-click and scroll dismissal
//! - Section navigation: [`Section`], [`SectionNav`]
//!
//! Host collaborators are traits ([`FrameScheduler`], [`VisibilityDetector`],
//! [`GlobalEvents`]) with in-memory implementations for headless hosts and
//! tests. Every host registration is a [`Subscription`] released on drop.

pub mod counter;
mod error;
pub mod events;
pub mod menu;
pub mod progress;
pub mod scheduler;
pub mod section;
mod subscription;
pub mod visibility;

pub use counter::{AnimationRun, CounterConfig, CounterPhase, CountingNumber, FrameStep};
pub use error::FolioError;
pub use events::{ClickHandler, GlobalEvents, ManualEvents, ScrollHandler};
pub use menu::{MenuController, MenuState, MenuTrigger};
pub use progress::{counted_value, linear_progress, DEFAULT_DURATION_MS};
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler, ManualFrameScheduler};
pub use section::{Section, SectionNav};
pub use subscription::Subscription;
pub use visibility::{EnterCallback, ManualVisibility, VisibilityDetector};
