//! Scoped registrations on shared host resources.
//!
//! Every listener, observer or callback a component attaches to the host
//! (document click listeners, intersection observers, ...) is represented by
//! a [`Subscription`]. Dropping the subscription detaches it, so release
//! happens on every exit path: explicit teardown, early return, or unwinding.

use std::fmt;

/// Guard for a registration on a shared resource.
///
/// The release function runs exactly once, either through
/// [`Subscription::release`] or when the guard is dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `release` when it ends.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Create a subscription with nothing to release.
    ///
    /// Used by collaborators that fire synchronously on registration and keep
    /// no host state afterwards.
    #[must_use]
    pub const fn detached() -> Self {
        Self { release: None }
    }

    /// Whether the release function has not run yet.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Release the registration now.
    pub fn release(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
