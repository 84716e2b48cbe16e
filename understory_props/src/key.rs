// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property key classification.

/// The class name key.
pub const CLASS_NAME: &str = "className";
/// The inline style key.
pub const STYLE: &str = "style";
/// The automation id attribute, which concatenates instead of replacing.
pub const AUTOMATION_ID: &str = "data-automation-id";
/// Prefix of data attributes.
pub const DATA_PREFIX: &str = "data-";

/// How the merger treats a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// `className`: always concatenated, base first.
    ClassName,
    /// `style`: always shallow-merged, override wins per declaration.
    Style,
    /// `data-automation-id`: concatenated when both sides are strings.
    AutomationId,
    /// Any other `data-*` key: override replaces.
    Data,
    /// `on` followed by an uppercase letter: composed with the base handler.
    EventHandler,
    /// Everything else: never copied from the overrides.
    Other,
}

impl KeyKind {
    /// Classifies a key.
    ///
    /// ```rust
    /// use understory_props::KeyKind;
    ///
    /// assert_eq!(KeyKind::of("className"), KeyKind::ClassName);
    /// assert_eq!(KeyKind::of("data-automation-id"), KeyKind::AutomationId);
    /// assert_eq!(KeyKind::of("data-index"), KeyKind::Data);
    /// assert_eq!(KeyKind::of("onClick"), KeyKind::EventHandler);
    /// assert_eq!(KeyKind::of("one"), KeyKind::Other);
    /// ```
    #[must_use]
    pub fn of(key: &str) -> Self {
        match key {
            CLASS_NAME => Self::ClassName,
            STYLE => Self::Style,
            AUTOMATION_ID => Self::AutomationId,
            _ if is_data_key(key) => Self::Data,
            _ if is_event_handler_key(key) => Self::EventHandler,
            _ => Self::Other,
        }
    }

    /// Returns `true` if a caller exclusion can suppress this kind.
    ///
    /// `className` and `style` are always merged; exclusions only gate data
    /// attributes and event handlers.
    #[must_use]
    #[inline]
    pub fn is_excludable(self) -> bool {
        matches!(self, Self::AutomationId | Self::Data | Self::EventHandler)
    }
}

/// Returns `true` for `data-*` keys.
#[must_use]
#[inline]
pub fn is_data_key(key: &str) -> bool {
    key.starts_with(DATA_PREFIX)
}

/// Returns `true` for keys of the form `on` + ASCII uppercase letter (`onClick`).
#[must_use]
#[inline]
pub fn is_event_handler_key(key: &str) -> bool {
    key.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}
