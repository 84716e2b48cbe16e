// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered property sets.
//!
//! # Implementation
//!
//! Entries live in a `SmallVec` in insertion order with linear lookup. Root
//! elements rarely carry more than a handful of props, so the scan is
//! cheaper than hashing and small sets never touch the heap for the table.

use alloc::string::String;
use smallvec::SmallVec;

use understory_handler::Handler;

use crate::key::{CLASS_NAME, STYLE};
use crate::style::StyleMap;
use crate::value::PropValue;

/// Default inline capacity for property entries.
const INLINE_CAPACITY: usize = 8;

/// An insertion-ordered bag of element properties for one render pass.
///
/// `E` is the event payload type of handler values.
///
/// # Example
///
/// ```rust
/// use understory_handler::Handler;
/// use understory_props::PropertySet;
///
/// let props = PropertySet::<()>::with_class_name("button")
///     .with("data-row", "3")
///     .with("onClick", Handler::new(|_: &()| {}));
///
/// assert_eq!(props.class_name(), Some("button"));
/// assert_eq!(props.str_value("data-row"), Some("3"));
/// assert!(props.handler("onClick").is_some());
/// assert_eq!(props.keys().collect::<Vec<_>>(), ["className", "data-row", "onClick"]);
/// ```
pub struct PropertySet<E: ?Sized> {
    entries: SmallVec<[(String, PropValue<E>); INLINE_CAPACITY]>,
}

impl<E: ?Sized> PropertySet<E> {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Creates a property set holding only a class name.
    #[must_use]
    pub fn with_class_name(class_name: impl Into<String>) -> Self {
        Self::new().with(CLASS_NAME, PropValue::Str(class_name.into()))
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue<E>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a property, returning the previous value.
    ///
    /// An existing key keeps its position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropValue<E>>,
    ) -> Option<PropValue<E>> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue<E>> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    /// Returns the value for a key mutably.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropValue<E>> {
        self.position(key).map(|idx| &mut self.entries[idx].1)
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue<E>> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Number of properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no properties.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue<E>)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Returns the class name, if it is a string.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.str_value(CLASS_NAME)
    }

    /// Returns the inline style map, if present.
    #[must_use]
    pub fn style(&self) -> Option<&StyleMap> {
        self.get(STYLE).and_then(PropValue::as_style)
    }

    /// Returns the handler stored at `key`, if it is one.
    #[must_use]
    pub fn handler(&self, key: &str) -> Option<&Handler<E>> {
        self.get(key).and_then(PropValue::as_handler)
    }

    /// Returns the string stored at `key`, if it is one.
    #[must_use]
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<E: ?Sized> Default for PropertySet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> Clone for PropertySet<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<E: ?Sized> core::fmt::Debug for PropertySet<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<E: ?Sized, K: Into<String>> FromIterator<(K, PropValue<E>)> for PropertySet<E> {
    fn from_iter<I: IntoIterator<Item = (K, PropValue<E>)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<E: ?Sized, K: Into<String>> Extend<(K, PropValue<E>)> for PropertySet<E> {
    fn extend<I: IntoIterator<Item = (K, PropValue<E>)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
