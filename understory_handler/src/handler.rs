// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared, identity-comparable event handlers.
//!
//! This module provides [`Handler`], a reference-counted callback whose
//! identity is its allocation, and [`WeakHandler`], its non-owning
//! counterpart.

use alloc::rc::{Rc, Weak};
use core::fmt;

/// A shared event handler taking the event payload by reference.
///
/// Cloning a `Handler` is cheap and yields the *same* handler: both clones
/// compare equal under [`Handler::ptr_eq`]. Two handlers built from
/// identical closures are still distinct.
///
/// # Example
///
/// ```rust
/// use understory_handler::Handler;
///
/// let a = Handler::new(|n: &u32| assert_eq!(*n, 7));
/// let b = a.clone();
/// let c = Handler::new(|n: &u32| assert_eq!(*n, 7));
///
/// assert!(a.ptr_eq(&b));
/// assert!(!a.ptr_eq(&c));
/// a.call(&7);
/// ```
pub struct Handler<E: ?Sized> {
    inner: Rc<dyn Fn(&E)>,
}

impl<E: ?Sized> Handler<E> {
    /// Wraps a closure into a new handler with a fresh identity.
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&E) + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Builds a handler that runs `first` and then `second` with the same
    /// event.
    ///
    /// This always allocates a new identity. Use
    /// [`HandlerCache::compose`](crate::HandlerCache::compose) to get a
    /// stable one.
    #[must_use]
    pub fn sequence(first: Self, second: Self) -> Self
    where
        E: 'static,
    {
        Self::new(move |event: &E| {
            first.call(event);
            second.call(event);
        })
    }

    /// Invokes the handler.
    #[inline]
    pub fn call(&self, event: &E) {
        (self.inner)(event);
    }

    /// Returns `true` if both handlers share the same allocation.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    /// Returns the address identifying this handler.
    ///
    /// The address is only meaningful while a strong reference is alive.
    #[must_use]
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.inner).cast::<()>() as usize
    }

    /// Returns the number of strong references to this handler.
    #[must_use]
    #[inline]
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Creates a non-owning reference to this handler.
    #[must_use]
    #[inline]
    pub fn downgrade(&self) -> WeakHandler<E> {
        WeakHandler {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<E: ?Sized> Clone for Handler<E> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: ?Sized, F> From<F> for Handler<E>
where
    F: Fn(&E) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl<E: ?Sized> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&format_args!("{:#x}", self.addr()))
            .finish()
    }
}

/// A non-owning reference to a [`Handler`].
pub struct WeakHandler<E: ?Sized> {
    inner: Weak<dyn Fn(&E)>,
}

impl<E: ?Sized> WeakHandler<E> {
    /// Upgrades to a strong handler if it is still alive.
    #[must_use]
    #[inline]
    pub fn upgrade(&self) -> Option<Handler<E>> {
        self.inner.upgrade().map(|inner| Handler { inner })
    }

    /// Returns `true` if the handler has not been dropped yet.
    #[must_use]
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<E: ?Sized> Clone for WeakHandler<E> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<E: ?Sized> fmt::Debug for WeakHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakHandler")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn clones_share_identity() {
        let a = Handler::new(|_: &()| {});
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.addr(), b.addr());
        assert_eq!(a.strong_count(), 2);
    }

    #[test]
    fn identical_closures_are_distinct() {
        let a = Handler::new(|_: &()| {});
        let b = Handler::new(|_: &()| {});
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn sequence_runs_first_then_second() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = {
            let log = Rc::clone(&log);
            Handler::new(move |n: &i32| log.borrow_mut().push(("first", *n)))
        };
        let second = {
            let log = Rc::clone(&log);
            Handler::new(move |n: &i32| log.borrow_mut().push(("second", *n)))
        };

        let both = Handler::sequence(first, second);
        both.call(&3);

        assert_eq!(*log.borrow(), [("first", 3), ("second", 3)]);
    }

    #[test]
    fn weak_handler_tracks_liveness() {
        let strong = Handler::new(|_: &str| {});
        let weak = strong.downgrade();
        assert!(weak.is_alive());
        assert!(weak.upgrade().is_some_and(|h| h.ptr_eq(&strong)));

        drop(strong);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn debug_output() {
        let handler = Handler::new(|_: &()| {});
        assert!(format!("{:?}", handler).starts_with("Handler(0x"));
        assert_eq!(
            format!("{:?}", handler.downgrade()),
            "WeakHandler { alive: true }"
        );
    }
}
