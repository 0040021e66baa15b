/// A subscription that is released exactly once.
///
/// Release happens either explicitly (typically when the observed event fires) or when the owner
/// drops the handle, whichever comes first. The release callback never runs twice.
pub struct OnceSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl OnceSubscription {
    /// Wrap the host's unsubscribe action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release (e.g. the host had no observer to offer).
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Release now. Returns `true` only on the call that actually released.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    /// Whether the release callback is still pending.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for OnceSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for OnceSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnceSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/subscription.rs"]
mod tests;
