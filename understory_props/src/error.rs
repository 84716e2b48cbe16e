// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::value::ValueKind;

/// Errors returned by [`merge_root`](crate::merge_root).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The base set has no string `className`.
    ///
    /// `found` is the kind of value that was there instead, or `None` if the
    /// key was missing.
    #[error("base properties must carry a string className, found {}", describe(.found))]
    InvalidBaseProperties {
        /// What was stored at `className`.
        found: Option<ValueKind>,
    },
}

fn describe(found: &Option<ValueKind>) -> alloc::string::String {
    match found {
        Some(kind) => alloc::format!("{kind}"),
        None => "nothing".into(),
    }
}
