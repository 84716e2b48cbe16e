// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root property merging.
//!
//! A component that renders another component's root element combines the
//! consumer's props (the *overrides*) with its own (the *base*). The base
//! class name and individual style declarations can be extended but never
//! clobbered wholesale.
//!
//! # Rules
//!
//! The result starts as a copy of the base set. Then, for each override key
//! in order:
//!
//! | Key | Effect |
//! |-----|--------|
//! | excluded by [`MergeOptions`] | skipped (data and handler keys only) |
//! | `data-automation-id` | `"base override"` if both are strings, else replaced |
//! | other `data-*` | replaced |
//! | `on[A-Z]*` | composed, override first, if both are handlers; else replaced |
//! | anything else | ignored |
//!
//! Afterwards `style` is shallow-merged (override wins per declaration) and
//! `className` becomes `"base override"`. Neither can be excluded.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::trace;

use understory_handler::{Handler, HandlerCache};

use crate::error::MergeError;
use crate::key::{CLASS_NAME, KeyKind, STYLE};
use crate::set::PropertySet;
use crate::value::PropValue;

/// Per-call merge configuration.
///
/// # Example
///
/// ```rust
/// use understory_props::MergeOptions;
///
/// let options = MergeOptions::new().exclude("onClick").exclude("data-testid");
/// assert!(options.is_excluded("onClick"));
/// assert!(!options.is_excluded("onKeyDown"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOptions {
    exclusions: Vec<String>,
}

impl MergeOptions {
    /// Options with no exclusions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options excluding every key in `keys`.
    #[must_use]
    pub fn excluding<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        keys.into_iter().fold(Self::new(), Self::exclude)
    }

    /// Adds a key to the exclusion set.
    ///
    /// Excluding `className` or `style` has no effect.
    #[must_use]
    pub fn exclude(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.is_excluded(&key) {
            self.exclusions.push(key);
        }
        self
    }

    /// Returns `true` if `key` is in the exclusion set.
    #[must_use]
    pub fn is_excluded(&self, key: &str) -> bool {
        self.exclusions.iter().any(|k| k == key)
    }

    /// Iterates the excluded keys.
    pub fn exclusions(&self) -> impl Iterator<Item = &str> + '_ {
        self.exclusions.iter().map(String::as_str)
    }
}

/// Joins two space-separated token lists, trimming both.
///
/// ```rust
/// use understory_props::join_tokens;
///
/// assert_eq!(join_tokens(" root ", "inner"), "root inner");
/// ```
#[must_use]
pub fn join_tokens(base: &str, extra: &str) -> String {
    format!("{} {}", base.trim(), extra.trim())
}

/// Merges `overrides` into a copy of `base` using the thread-local default
/// handler cache.
///
/// Neither input is modified.
///
/// # Errors
///
/// Returns [`MergeError::InvalidBaseProperties`] if `base` has no string
/// `className`.
///
/// # Example
///
/// ```rust
/// use understory_props::{MergeOptions, PropertySet, StyleMap, merge_root};
///
/// let base = PropertySet::<()>::with_class_name("card")
///     .with("style", StyleMap::new().with("color", "red").with("margin", "0"));
/// let overrides = PropertySet::<()>::with_class_name("highlighted")
///     .with("style", StyleMap::new().with("color", "blue"))
///     .with("title", "ignored");
///
/// let merged = merge_root(&overrides, &base, &MergeOptions::new()).unwrap();
/// assert_eq!(merged.class_name(), Some("card highlighted"));
/// assert_eq!(merged.style().and_then(|s| s.get("color")), Some("blue"));
/// assert_eq!(merged.style().and_then(|s| s.get("margin")), Some("0"));
/// assert!(!merged.contains_key("title"));
/// ```
#[cfg(feature = "std")]
pub fn merge_root<E>(
    overrides: &PropertySet<E>,
    base: &PropertySet<E>,
    options: &MergeOptions,
) -> Result<PropertySet<E>, MergeError>
where
    E: ?Sized + 'static,
{
    merge_impl(overrides, base, options, &mut |first, second| {
        understory_handler::compose(first, second)
    })
}

/// Like [`merge_root`], composing handlers through an explicit cache.
///
/// # Errors
///
/// Returns [`MergeError::InvalidBaseProperties`] if `base` has no string
/// `className`.
pub fn merge_root_with<E>(
    overrides: &PropertySet<E>,
    base: &PropertySet<E>,
    options: &MergeOptions,
    cache: &mut HandlerCache<E>,
) -> Result<PropertySet<E>, MergeError>
where
    E: ?Sized + 'static,
{
    merge_impl(overrides, base, options, &mut |first, second| {
        cache.compose(first, second)
    })
}

fn merge_impl<E: ?Sized>(
    overrides: &PropertySet<E>,
    base: &PropertySet<E>,
    options: &MergeOptions,
    compose: &mut dyn FnMut(&Handler<E>, &Handler<E>) -> Handler<E>,
) -> Result<PropertySet<E>, MergeError> {
    let base_class = match base.get(CLASS_NAME) {
        Some(PropValue::Str(class_name)) => class_name.as_str(),
        other => {
            return Err(MergeError::InvalidBaseProperties {
                found: other.map(PropValue::kind),
            });
        }
    };

    let mut result = base.clone();

    for (key, value) in overrides.iter() {
        let kind = KeyKind::of(key);
        if kind.is_excludable() && options.is_excluded(key) {
            trace!("merge: `{key}` excluded");
            continue;
        }

        let merged = match kind {
            KeyKind::AutomationId => match (result.get(key), value) {
                (Some(PropValue::Str(base_id)), PropValue::Str(extra)) => {
                    PropValue::Str(join_tokens(base_id, extra))
                }
                _ => value.clone(),
            },
            KeyKind::Data => value.clone(),
            KeyKind::EventHandler => match (value, result.get(key)) {
                (PropValue::Handler(outer), Some(PropValue::Handler(inner))) => {
                    trace!("merge: composing `{key}`");
                    PropValue::Handler(compose(outer, inner))
                }
                _ => value.clone(),
            },
            KeyKind::ClassName | KeyKind::Style | KeyKind::Other => continue,
        };
        result.insert(key, merged);
    }

    if let Some(PropValue::Style(extra)) = overrides.get(STYLE) {
        match result.get_mut(STYLE) {
            Some(PropValue::Style(style)) => style.merge_from(extra),
            _ => {
                result.insert(STYLE, PropValue::Style(extra.clone()));
            }
        }
    }

    if let Some(PropValue::Str(extra)) = overrides.get(CLASS_NAME) {
        result.insert(CLASS_NAME, PropValue::Str(join_tokens(base_class, extra)));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleMap;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn base() -> PropertySet<u32> {
        PropertySet::with_class_name("root")
    }

    #[test]
    fn class_name_joins_trimmed() {
        let mut cache = HandlerCache::new();
        let base = PropertySet::<u32>::with_class_name("  a ");
        let overrides = PropertySet::with_class_name(" b  ");
        let merged = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.class_name(), Some("a b"));
    }

    #[test]
    fn base_class_kept_without_override() {
        let mut cache = HandlerCache::new();
        let merged =
            merge_root_with(&PropertySet::new(), &base(), &MergeOptions::new(), &mut cache)
                .unwrap();
        assert_eq!(merged.class_name(), Some("root"));
    }

    #[test]
    fn empty_base_class_is_accepted() {
        let mut cache = HandlerCache::new();
        let base = PropertySet::<u32>::with_class_name("");

        let merged =
            merge_root_with(&PropertySet::new(), &base, &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.class_name(), Some(""));

        let overrides = PropertySet::with_class_name("extra");
        let merged = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.class_name(), Some(" extra"));
    }

    #[test]
    fn non_string_base_class_is_rejected() {
        let mut cache = HandlerCache::new();
        let base = PropertySet::<u32>::new().with("className", 3.0);
        let err = merge_root_with(&PropertySet::new(), &base, &MergeOptions::new(), &mut cache)
            .unwrap_err();
        assert_eq!(
            err,
            MergeError::InvalidBaseProperties {
                found: Some(crate::ValueKind::Number)
            }
        );
    }

    #[test]
    fn non_string_override_class_is_ignored() {
        let mut cache = HandlerCache::new();
        let overrides = PropertySet::new().with("className", false);
        let merged =
            merge_root_with(&overrides, &base(), &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.class_name(), Some("root"));
    }

    #[test]
    fn automation_id_replaces_non_string_base() {
        let mut cache = HandlerCache::new();
        let base = base().with("data-automation-id", true);
        let overrides = PropertySet::new().with("data-automation-id", "inner");
        let merged = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.str_value("data-automation-id"), Some("inner"));
    }

    #[test]
    fn handler_over_non_handler_replaces() {
        let mut cache = HandlerCache::new();
        let handler = Handler::new(|_: &u32| {});
        let base = base().with("onClick", "oops");
        let overrides = PropertySet::new().with("onClick", handler.clone());
        let merged = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();
        assert!(merged.handler("onClick").is_some_and(|h| h.ptr_eq(&handler)));
        assert!(cache.is_empty());
    }

    #[test]
    fn non_handler_over_handler_replaces() {
        let mut cache = HandlerCache::new();
        let base = base().with("onClick", Handler::new(|_: &u32| {}));
        let overrides = PropertySet::new().with("onClick", "nope");
        let merged = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.str_value("onClick"), Some("nope"));
    }

    #[test]
    fn style_assigned_when_base_has_none() {
        let mut cache = HandlerCache::new();
        let overrides = PropertySet::new().with("style", StyleMap::new().with("color", "blue"));
        let merged =
            merge_root_with(&overrides, &base(), &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.style(), Some(&StyleMap::new().with("color", "blue")));
    }

    #[test]
    fn non_map_override_style_is_ignored() {
        let mut cache = HandlerCache::new();
        let base = base().with("style", StyleMap::new().with("color", "red"));
        let overrides = PropertySet::new().with("style", "color: blue");
        let merged = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();
        assert_eq!(merged.style().and_then(|s| s.get("color")), Some("red"));
    }

    #[test]
    fn class_name_and_style_ignore_exclusions() {
        let mut cache = HandlerCache::new();
        let base = base().with("style", StyleMap::new().with("color", "red"));
        let overrides = PropertySet::with_class_name("extra")
            .with("style", StyleMap::new().with("color", "blue"));
        let options = MergeOptions::excluding(["className", "style"]);
        let merged = merge_root_with(&overrides, &base, &options, &mut cache).unwrap();
        assert_eq!(merged.class_name(), Some("root extra"));
        assert_eq!(merged.style().and_then(|s| s.get("color")), Some("blue"));
    }

    #[test]
    fn repeated_merges_reuse_composed_handler() {
        let mut cache = HandlerCache::new();
        let calls = Rc::new(Cell::new(0));
        let outer = {
            let calls = Rc::clone(&calls);
            Handler::new(move |_: &u32| calls.set(calls.get() + 1))
        };
        let base = base().with("onClick", Handler::new(|_: &u32| {}));
        let overrides = PropertySet::new().with("onClick", outer);

        let first = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();
        let second = merge_root_with(&overrides, &base, &MergeOptions::new(), &mut cache).unwrap();

        let (Some(a), Some(b)) = (first.handler("onClick"), second.handler("onClick")) else {
            panic!("onClick should be a handler");
        };
        assert!(a.ptr_eq(b));
        a.call(&0);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn options_dedup_exclusions() {
        let options = MergeOptions::excluding(["onClick", "onClick", "data-x"]);
        assert_eq!(options.exclusions().collect::<Vec<_>>(), ["onClick", "data-x"]);
    }
}
