// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use compact_str::{CompactString, format_compact};

use crate::slot::replace_with;
use crate::{Annotated, BoxError, ErrorSlot, Opaque, StackError, has_stack};

/// Adds context to the error held by `slot`, keeping the old error reachable through
/// [`source`](std::error::Error::source).
///
/// The new error renders as `"{context}: {old error}"`. An empty slot is left untouched.
/// Usually invoked through the [`wrap!`](crate::wrap!) macro.
///
/// # Examples
///
/// ```rust
/// use errwrap::BoxError;
///
/// let mut result: Result<(), BoxError> = Err("file not found".into());
/// errwrap::wrap(&mut result, format_args!("open({})", "a.txt"));
/// errwrap::wrap(&mut result, format_args!("load config"));
///
/// assert_eq!(result.unwrap_err().to_string(), "load config: open(a.txt): file not found");
/// ```
pub fn wrap<S>(slot: &mut S, context: fmt::Arguments<'_>)
where
    S: ErrorSlot + ?Sized,
{
    if let Some(error) = slot.error_mut() {
        replace_with(error, |inner| annotate(inner, context));
    }
}

/// Like [`wrap`], but first makes sure a stack snapshot exists somewhere in the chain.
///
/// When no node of the chain carries a stack, the current error is wrapped in a
/// [`StackError`] before the context is added. Calling this at every level of a propagating
/// error therefore captures exactly one stack, at the level closest to the failure, while
/// context accumulates at every level. An empty slot is left untouched and no stack walk
/// happens. Usually invoked through the [`wrap_stack!`](crate::wrap_stack!) macro.
///
/// # Examples
///
/// ```rust
/// use errwrap::BoxError;
///
/// let mut result: Result<(), BoxError> = Err("file not found".into());
/// errwrap::wrap_stack!(&mut result, "open({})", "a.txt");
/// errwrap::wrap_stack!(&mut result, "load config");
///
/// let error = result.unwrap_err();
/// assert_eq!(error.to_string(), "load config: open(a.txt): file not found");
/// assert_eq!(errwrap::stack_count(&*error), 1);
/// ```
pub fn wrap_stack<S>(slot: &mut S, context: fmt::Arguments<'_>)
where
    S: ErrorSlot + ?Sized,
{
    if let Some(error) = slot.error_mut() {
        if !has_stack(&**error) {
            replace_with(error, |inner| Box::new(StackError::new(inner)));
        }
        replace_with(error, |inner| annotate(inner, context));
    }
}

/// Adds context to the error held by `slot` without keeping the old error reachable.
///
/// Renders exactly like [`wrap`], but the result is an [`Opaque`] error whose
/// [`source`](std::error::Error::source) is `None`. Use it when the underlying error type
/// must not become part of a caller-visible contract.
///
/// # Examples
///
/// ```rust
/// use std::error::Error;
///
/// use errwrap::BoxError;
///
/// let mut error: Option<BoxError> = Some(Box::new(std::io::Error::other("eof")));
/// errwrap::add!(&mut error, "read header");
///
/// let error = error.unwrap();
/// assert_eq!(error.to_string(), "read header: eof");
/// assert!(error.source().is_none());
/// ```
pub fn add<S>(slot: &mut S, context: fmt::Arguments<'_>)
where
    S: ErrorSlot + ?Sized,
{
    if let Some(error) = slot.error_mut() {
        *error = Box::new(Opaque::new(format_compact!("{context}: {error}")));
    }
}

pub(crate) fn annotate(inner: BoxError, context: fmt::Arguments<'_>) -> BoxError {
    Box::new(Annotated::new(render(context), inner))
}

fn render(context: fmt::Arguments<'_>) -> CompactString {
    match context.as_str() {
        Some(message) => CompactString::from(message),
        None => format_compact!("{context}"),
    }
}

/// Adds formatted context to the error held by a slot. See [`wrap`](fn@crate::wrap).
///
/// # Examples
///
/// ```rust
/// use errwrap::BoxError;
///
/// fn open(path: &str) -> Result<String, BoxError> {
///     let mut result = std::fs::read_to_string(path).map_err(BoxError::from);
///     errwrap::wrap!(&mut result, "open({path})");
///     result
/// }
///
/// let error = open("/definitely/not/here").unwrap_err();
/// assert!(error.to_string().starts_with("open(/definitely/not/here): "));
/// ```
#[macro_export]
macro_rules! wrap {
    ($slot:expr, $($arg:tt)+) => {
        $crate::wrap($slot, ::core::format_args!($($arg)+))
    };
}

/// Adds formatted context and, if needed, a stack snapshot. See [`wrap_stack`](fn@crate::wrap_stack).
#[macro_export]
macro_rules! wrap_stack {
    ($slot:expr, $($arg:tt)+) => {
        $crate::wrap_stack($slot, ::core::format_args!($($arg)+))
    };
}

/// Adds formatted context, hiding the previous error. See [`add`](fn@crate::add).
#[macro_export]
macro_rules! add {
    ($slot:expr, $($arg:tt)+) => {
        $crate::add($slot, ::core::format_args!($($arg)+))
    };
}
