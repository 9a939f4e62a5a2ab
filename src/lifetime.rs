/// Popup lifetime: closing the popup cancels whatever is still in flight
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type CloseHook = Box<dyn FnOnce()>;

#[derive(Default)]
struct Inner {
    closed: Cell<bool>,
    hooks: RefCell<Vec<Option<CloseHook>>>,
}

/// Shared, single-threaded handle on the lifetime of one popup opening
#[derive(Clone, Default)]
pub struct PopupLifetime {
    inner: Rc<Inner>,
}

impl PopupLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    /// Run `hook` when the popup closes, or right away if it already has.
    ///
    /// Dropping the returned registration removes the hook, so a finished
    /// request does not keep its abort handle around.
    pub fn on_close(&self, hook: impl FnOnce() + 'static) -> CloseRegistration {
        if self.is_closed() {
            hook();
            return CloseRegistration { inner: Weak::new(), slot: 0 };
        }

        let mut hooks = self.inner.hooks.borrow_mut();
        hooks.push(Some(Box::new(hook)));
        CloseRegistration {
            inner: Rc::downgrade(&self.inner),
            slot: hooks.len() - 1,
        }
    }

    /// Hooks still waiting for the popup to close
    pub fn pending_hooks(&self) -> usize {
        self.inner.hooks.borrow().iter().flatten().count()
    }

    #[cfg(test)]
    fn hook_slots(&self) -> usize {
        self.inner.hooks.borrow().len()
    }

    /// Mark the popup closed and run every pending hook once.
    pub fn close(&self) {
        if self.inner.closed.replace(true) {
            return;
        }
        let hooks = std::mem::take(&mut *self.inner.hooks.borrow_mut());
        log::debug!("Popup closed, running {} pending hook(s)", hooks.iter().flatten().count());
        for hook in hooks.into_iter().flatten() {
            hook();
        }
    }
}

impl fmt::Debug for PopupLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupLifetime")
            .field("closed", &self.is_closed())
            .field("pending_hooks", &self.pending_hooks())
            .finish()
    }
}

/// Keeps a close hook registered until dropped
#[must_use = "dropping the registration removes the hook"]
pub struct CloseRegistration {
    inner: Weak<Inner>,
    slot: usize,
}

impl Drop for CloseRegistration {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut hooks = inner.hooks.borrow_mut();
            if let Some(entry) = hooks.get_mut(self.slot) {
                entry.take();
            }
            // Live registrations always hold `Some`, so their slots survive
            while matches!(hooks.last(), Some(None)) {
                hooks.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let hook_count = count.clone();
        (count, move || hook_count.set(hook_count.get() + 1))
    }

    #[test]
    fn test_close_runs_hooks_once() {
        let lifetime = PopupLifetime::new();
        let (count, hook) = counter();
        let _registration = lifetime.on_close(hook);

        lifetime.close();
        lifetime.close();

        assert!(lifetime.is_closed());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dropped_registration_does_not_run() {
        let lifetime = PopupLifetime::new();
        let (count, hook) = counter();
        drop(lifetime.on_close(hook));

        lifetime.close();

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_hook_after_close_runs_immediately() {
        let lifetime = PopupLifetime::new();
        lifetime.close();

        let (count, hook) = counter();
        let _registration = lifetime.on_close(hook);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let lifetime = PopupLifetime::new();
        let handle = lifetime.clone();
        let (count, hook) = counter();
        let _registration = handle.on_close(hook);

        lifetime.close();

        assert!(handle.is_closed());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_finished_requests_do_not_accumulate() {
        let lifetime = PopupLifetime::new();
        for _ in 0..100 {
            let (_, hook) = counter();
            drop(lifetime.on_close(hook));
        }

        assert_eq!(lifetime.pending_hooks(), 0);
        assert_eq!(lifetime.hook_slots(), 0);
    }

    #[test]
    fn test_long_lived_registration_survives_trimming() {
        let lifetime = PopupLifetime::new();
        let (count, hook) = counter();
        let outer = lifetime.on_close(hook);

        let (_, inner_hook) = counter();
        let inner = lifetime.on_close(inner_hook);
        let (_, last_hook) = counter();
        let last = lifetime.on_close(last_hook);
        drop(inner);
        drop(last);

        assert_eq!(lifetime.hook_slots(), 1);
        lifetime.close();
        assert_eq!(count.get(), 1);
        drop(outer);
    }

    #[test]
    fn test_registration_dropped_after_close() {
        let lifetime = PopupLifetime::new();
        let (count, hook) = counter();
        let registration = lifetime.on_close(hook);

        lifetime.close();
        drop(registration);

        assert_eq!(count.get(), 1);
    }
}
