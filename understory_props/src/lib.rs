// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Props: root property merging for wrapped components.
//!
//! When a component renders another component's root element, it has two
//! sets of props: its own (the *base*, which always carries a class name)
//! and the ones its consumer passed in (the *overrides*). This crate merges
//! them with fixed rules per key:
//!
//! - **`className`** - concatenated, base first.
//! - **`style`** - shallow-merged, override wins per declaration.
//! - **`data-*`** - override replaces; `data-automation-id` concatenates.
//! - **`on[A-Z]*`** - both handlers run, override first. The combined
//!   handler is memoized by `understory_handler`, so repeated merges hand
//!   back the same handler.
//! - **everything else** - taken from the base only.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_handler::Handler;
//! use understory_props::{MergeOptions, PropertySet, merge_root};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let inner_click = {
//!     let log = log.clone();
//!     Handler::new(move |_: &()| log.borrow_mut().push("inner"))
//! };
//! let outer_click = {
//!     let log = log.clone();
//!     Handler::new(move |_: &()| log.borrow_mut().push("outer"))
//! };
//!
//! let base = PropertySet::with_class_name("list-item")
//!     .with("data-automation-id", "item")
//!     .with("onClick", inner_click);
//! let overrides = PropertySet::with_class_name("selected")
//!     .with("data-automation-id", "row-3")
//!     .with("onClick", outer_click);
//!
//! let merged = merge_root(&overrides, &base, &MergeOptions::new())?;
//! assert_eq!(merged.class_name(), Some("list-item selected"));
//! assert_eq!(merged.str_value("data-automation-id"), Some("item row-3"));
//!
//! merged.handler("onClick").unwrap().call(&());
//! assert_eq!(*log.borrow(), ["outer", "inner"]);
//! # Ok::<(), understory_props::MergeError>(())
//! ```
//!
//! ## Exclusions
//!
//! [`MergeOptions`] can exclude data and event-handler keys, leaving the
//! base value untouched. `className` and `style` are always merged.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. [`merge_root`] relies on the
//! thread-local handler cache and needs the `std` feature (on by default);
//! [`merge_root_with`] takes an explicit [`HandlerCache`](understory_handler::HandlerCache)
//! instead.

#![no_std]

extern crate alloc;

mod error;
mod key;
mod merge;
mod set;
mod style;
mod value;

pub use error::MergeError;
pub use key::{
    AUTOMATION_ID, CLASS_NAME, DATA_PREFIX, KeyKind, STYLE, is_data_key, is_event_handler_key,
};
#[cfg(feature = "std")]
pub use merge::merge_root;
pub use merge::{MergeOptions, join_tokens, merge_root_with};
pub use set::PropertySet;
pub use style::StyleMap;
pub use value::{AnyValue, PropValue, ValueKind};
