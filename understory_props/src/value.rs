// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values.
//!
//! This module provides [`PropValue`], the value side of a
//! [`PropertySet`](crate::PropertySet), and [`AnyValue`] for pass-through
//! values of arbitrary type.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use core::fmt;

use understory_handler::Handler;

use crate::style::StyleMap;

/// A type-erased, clonable pass-through value.
///
/// The merger never inspects these. They only travel from the base set into
/// the result.
///
/// # Example
///
/// ```rust
/// use understory_props::AnyValue;
///
/// let value = AnyValue::new(42_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// assert_eq!(value.clone().downcast_ref::<i32>(), Some(&42));
/// ```
pub struct AnyValue {
    inner: Box<dyn AnyValueTrait>,
    type_id: TypeId,
    type_name: &'static str,
}

impl AnyValue {
    /// Wraps a concrete value.
    #[must_use]
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns `true` if the wrapped value is a `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the wrapped value as a `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref()
    }

    /// Returns the Rust type name of the wrapped value.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Clone for AnyValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
            type_id: self.type_id,
            type_name: self.type_name,
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

trait AnyValueTrait: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn AnyValueTrait>;
}

impl<T: Clone + 'static> AnyValueTrait for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn AnyValueTrait> {
        Box::new(self.clone())
    }
}

/// Coarse type of a [`PropValue`], used in diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`PropValue::Str`].
    Str,
    /// [`PropValue::Bool`].
    Bool,
    /// [`PropValue::Number`].
    Number,
    /// [`PropValue::Handler`].
    Handler,
    /// [`PropValue::Style`].
    Style,
    /// [`PropValue::Other`].
    Other,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "string",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Handler => "handler",
            Self::Style => "style map",
            Self::Other => "opaque value",
        })
    }
}

/// A single property value.
///
/// `E` is the event payload type of handler values.
pub enum PropValue<E: ?Sized> {
    /// A string, e.g. a class name or a `data-*` attribute.
    Str(String),
    /// A boolean attribute.
    Bool(bool),
    /// A numeric attribute.
    Number(f64),
    /// An event handler.
    Handler(Handler<E>),
    /// An inline style map.
    Style(StyleMap),
    /// Anything else, passed through untouched.
    Other(AnyValue),
}

impl<E: ?Sized> PropValue<E> {
    /// Returns the coarse type of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::Str,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::Handler(_) => ValueKind::Handler,
            Self::Style(_) => ValueKind::Style,
            Self::Other(_) => ValueKind::Other,
        }
    }

    /// Returns the string, if this is a [`PropValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the handler, if this is a [`PropValue::Handler`].
    #[must_use]
    pub fn as_handler(&self) -> Option<&Handler<E>> {
        match self {
            Self::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Returns the style map, if this is a [`PropValue::Style`].
    #[must_use]
    pub fn as_style(&self) -> Option<&StyleMap> {
        match self {
            Self::Style(s) => Some(s),
            _ => None,
        }
    }

    /// Wraps an arbitrary value as [`PropValue::Other`].
    #[must_use]
    pub fn other<T: Clone + 'static>(value: T) -> Self {
        Self::Other(AnyValue::new(value))
    }
}

// Manual impls so that `E` needs no bounds.

impl<E: ?Sized> Clone for PropValue<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Str(s) => Self::Str(s.clone()),
            Self::Bool(b) => Self::Bool(*b),
            Self::Number(n) => Self::Number(*n),
            Self::Handler(h) => Self::Handler(h.clone()),
            Self::Style(s) => Self::Style(s.clone()),
            Self::Other(v) => Self::Other(v.clone()),
        }
    }
}

impl<E: ?Sized> fmt::Debug for PropValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Handler(h) => f.debug_tuple("Handler").field(h).finish(),
            Self::Style(s) => f.debug_tuple("Style").field(s).finish(),
            Self::Other(v) => f.debug_tuple("Other").field(v).finish(),
        }
    }
}

impl<E: ?Sized> From<&str> for PropValue<E> {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl<E: ?Sized> From<String> for PropValue<E> {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<E: ?Sized> From<bool> for PropValue<E> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<E: ?Sized> From<f64> for PropValue<E> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<E: ?Sized> From<Handler<E>> for PropValue<E> {
    fn from(value: Handler<E>) -> Self {
        Self::Handler(value)
    }
}

impl<E: ?Sized> From<StyleMap> for PropValue<E> {
    fn from(value: StyleMap) -> Self {
        Self::Style(value)
    }
}
