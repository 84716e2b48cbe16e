// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized handler composition.
//!
//! [`HandlerCache`] remembers the combined handler built for each
//! `(first, second)` identity pair, so that composing the same two handlers
//! again returns the same combined handler instead of a fresh allocation.
//!
//! # Reclamation
//!
//! The cache never owns a handler. Entries hold a [`WeakHandler`] to the
//! combined handler, and the combined handler owns `first` and `second`.
//! A live entry therefore proves that both inputs are still alive, which
//! makes their addresses safe to use as keys. Once every caller has dropped
//! the combined handler the entry is dead and is dropped by the next sweep.

use hashbrown::HashMap;
use log::{debug, trace};

use crate::handler::{Handler, WeakHandler};

/// Entry count at which the first sweep of dead entries runs.
///
/// After each sweep the threshold is reset to twice the surviving count,
/// keeping sweeps amortized O(1) per insertion.
const INITIAL_SWEEP_THRESHOLD: usize = 64;

/// Counters describing cache activity since creation or the last
/// [`HandlerCache::reset_stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Compositions answered from the cache.
    pub hits: u64,
    /// Compositions that allocated a new combined handler.
    pub misses: u64,
    /// Dead entries removed by sweeps.
    pub swept: u64,
}

/// A two-level, weakly-referencing memo table for composed handlers.
///
/// The outer level is keyed by the identity of the first handler, the inner
/// level by the identity of the second.
///
/// # Example
///
/// ```rust
/// use understory_handler::{Handler, HandlerCache};
///
/// let mut cache = HandlerCache::<u32>::new();
/// let f = Handler::new(|_: &u32| {});
/// let g = Handler::new(|_: &u32| {});
///
/// let fg = cache.compose(&f, &g);
/// assert!(cache.compose(&f, &g).ptr_eq(&fg));
/// assert!(!cache.compose(&g, &f).ptr_eq(&fg));
/// ```
pub struct HandlerCache<E: ?Sized> {
    entries: HashMap<usize, HashMap<usize, WeakHandler<E>>>,
    len: usize,
    sweep_at: usize,
    stats: CacheStats,
}

impl<E: ?Sized> Default for HandlerCache<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> HandlerCache<E> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            len: 0,
            sweep_at: INITIAL_SWEEP_THRESHOLD,
            stats: CacheStats::default(),
        }
    }

    /// Returns a handler that invokes `first` and then `second`.
    ///
    /// While a previously returned combined handler for the same identity
    /// pair is alive, that handler is returned again. Live inputs alone do
    /// not keep an entry: once every holder drops the combined handler, the
    /// next call builds a new one.
    pub fn compose(&mut self, first: &Handler<E>, second: &Handler<E>) -> Handler<E>
    where
        E: 'static,
    {
        let (a, b) = (first.addr(), second.addr());

        if let Some(existing) = self
            .entries
            .get(&a)
            .and_then(|inner| inner.get(&b))
            .and_then(WeakHandler::upgrade)
        {
            self.stats.hits += 1;
            trace!("handler cache hit for ({a:#x}, {b:#x})");
            return existing;
        }

        self.stats.misses += 1;
        trace!("handler cache miss for ({a:#x}, {b:#x})");

        let combined = Handler::sequence(first.clone(), second.clone());
        if self
            .entries
            .entry(a)
            .or_default()
            .insert(b, combined.downgrade())
            .is_none()
        {
            self.len += 1;
        }

        if self.len >= self.sweep_at {
            self.sweep();
            self.sweep_at = (self.len * 2).max(INITIAL_SWEEP_THRESHOLD);
        }

        combined
    }

    /// Number of stored entries, including dead ones not yet swept.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no entries are stored.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries whose combined handler is still alive.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.entries
            .values()
            .flat_map(HashMap::values)
            .filter(|weak| weak.is_alive())
            .count()
    }

    /// Removes entries whose combined handler has been dropped.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.len;
        self.entries.retain(|_, inner| {
            inner.retain(|_, weak| weak.is_alive());
            !inner.is_empty()
        });
        self.len = self.entries.values().map(HashMap::len).sum();

        let removed = before - self.len;
        self.stats.swept += removed as u64;
        debug!("handler cache swept {removed} dead entries, {} remain", self.len);
        removed
    }

    /// Drops every entry.
    ///
    /// Combined handlers already handed out keep working; they just stop
    /// being returned by [`compose`](Self::compose).
    pub fn clear(&mut self) {
        debug!("handler cache cleared ({} entries)", self.len);
        self.entries.clear();
        self.len = 0;
        self.sweep_at = INITIAL_SWEEP_THRESHOLD;
    }

    /// Returns the activity counters.
    #[must_use]
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Resets the activity counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }
}

impl<E: ?Sized> core::fmt::Debug for HandlerCache<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerCache")
            .field("len", &self.len)
            .field("sweep_at", &self.sweep_at)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
