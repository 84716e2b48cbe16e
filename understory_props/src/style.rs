// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline style maps.

use alloc::string::String;
use smallvec::SmallVec;

/// Inline capacity for style declarations.
const INLINE_CAPACITY: usize = 4;

/// An insertion-ordered map of inline style declarations.
///
/// Keys are style property names (`"color"`, `"marginTop"`), values are
/// their string values. Setting an existing key replaces its value and
/// keeps its position.
///
/// # Example
///
/// ```rust
/// use understory_props::StyleMap;
///
/// let mut base = StyleMap::new().with("color", "red").with("margin", "0");
/// let overrides = StyleMap::new().with("color", "blue");
///
/// base.merge_from(&overrides);
/// assert_eq!(base.get("color"), Some("blue"));
/// assert_eq!(base.get("margin"), Some("0"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: SmallVec<[(String, String); INLINE_CAPACITY]>,
}

impl StyleMap {
    /// Creates an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a declaration, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Returns the value of a declaration.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    /// Removes a declaration, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of declarations.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no declarations.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies every declaration of `other` into `self`; `other` wins on
    /// conflicts.
    pub fn merge_from(&mut self, other: &Self) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}
