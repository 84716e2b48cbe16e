// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Handler: identity-stable event handler composition.
//!
//! When one component wraps another, both may want to react to the same
//! event. This crate builds the combined handler and, crucially, hands back
//! the *same* combined handler every time the same two handlers are
//! composed. Downstream code that memoizes on handler identity keeps
//! working across renders.
//!
//! ## Core Concepts
//!
//! - [`Handler`] - a shared `Fn(&E)` whose identity is its allocation.
//! - [`HandlerCache`] - a two-level memo table keyed by the identities of
//!   the two inputs. It holds only weak references, so it never extends the
//!   lifetime of a handler.
//! - [`compose`] / [`clear_cache`] - the same operations against a
//!   thread-local default cache (requires the `std` feature).
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_handler::{Handler, compose};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let outer = {
//!     let log = log.clone();
//!     Handler::new(move |n: &u32| log.borrow_mut().push(format!("outer {n}")))
//! };
//! let inner = {
//!     let log = log.clone();
//!     Handler::new(move |n: &u32| log.borrow_mut().push(format!("inner {n}")))
//! };
//!
//! let both = compose(&outer, &inner);
//! both.call(&1);
//! assert_eq!(*log.borrow(), ["outer 1", "inner 1"]);
//!
//! // Same inputs, same combined handler.
//! assert!(compose(&outer, &inner).ptr_eq(&both));
//! ```
//!
//! ## `no_std` Support
//!
//! [`Handler`] and [`HandlerCache`] only need `alloc`. The thread-local
//! default cache needs the `std` feature, which is on by default.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod cache;
mod handler;

pub use cache::{CacheStats, HandlerCache};
pub use handler::{Handler, WeakHandler};

#[cfg(feature = "std")]
mod default_cache {
    use alloc::boxed::Box;
    use core::any::{Any, TypeId};
    use core::cell::RefCell;

    use hashbrown::HashMap;
    use log::debug;

    use crate::{Handler, HandlerCache};

    std::thread_local! {
        /// One cache per event type, created on first use.
        static CACHES: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
    }

    /// Runs `f` with the current thread's default cache for event type `E`.
    ///
    /// Re-entrant calls from inside `f` (including [`compose`]) get a fresh,
    /// empty cache instead of the shared one, so they still work but are not
    /// memoized.
    pub fn with_default_cache<E, R>(f: impl FnOnce(&mut HandlerCache<E>) -> R) -> R
    where
        E: ?Sized + 'static,
    {
        CACHES.with(|caches| {
            let Ok(mut caches) = caches.try_borrow_mut() else {
                debug!("default handler cache busy, composing without memoization");
                return f(&mut HandlerCache::new());
            };
            let slot = caches
                .entry(TypeId::of::<E>())
                .or_insert_with(|| Box::new(HandlerCache::<E>::new()) as Box<dyn Any>);
            let Some(cache) = slot.downcast_mut::<HandlerCache<E>>() else {
                unreachable!("default handler caches are keyed by their event TypeId");
            };
            f(cache)
        })
    }

    /// Composes two handlers through the thread-local default cache.
    ///
    /// The returned handler invokes `first` and then `second`. Composing the
    /// same pair again returns the same handler while it is alive.
    pub fn compose<E>(first: &Handler<E>, second: &Handler<E>) -> Handler<E>
    where
        E: ?Sized + 'static,
    {
        with_default_cache(|cache| cache.compose(first, second))
    }

    /// Wipes every default cache on the current thread.
    ///
    /// Intended for isolating tests from each other. Called from inside
    /// [`with_default_cache`], the borrowed cache is left untouched.
    pub fn clear_cache() {
        CACHES.with(|caches| {
            let Ok(mut caches) = caches.try_borrow_mut() else {
                debug!("default handler caches busy, not cleared");
                return;
            };
            debug!("clearing {} default handler caches", caches.len());
            caches.clear();
        });
    }
}

#[cfg(feature = "std")]
pub use default_cache::{clear_cache, compose, with_default_cache};
