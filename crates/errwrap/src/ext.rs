// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Display;

use crate::BoxError;

/// Extension trait providing annotation combinators on [`Result`].
///
/// Each method converts the error into a [`BoxError`] and applies the matching slot
/// function, so they compose with `?`:
///
/// ```rust
/// use errwrap::{BoxError, ResultExt};
///
/// fn read_port(text: &str) -> Result<u16, BoxError> {
///     let port = text.parse::<u16>().wrap_stack(format_args!("parse port {text:?}"))?;
///     Ok(port)
/// }
///
/// let error = read_port("http").unwrap_err();
/// assert_eq!(error.to_string(), r#"parse port "http": invalid digit found in string"#);
/// assert!(errwrap::has_stack(&*error));
/// ```
pub trait ResultExt<T> {
    /// Adds context to the error. See [`wrap`](fn@crate::wrap).
    ///
    /// # Errors
    ///
    /// Returns the annotated error when `self` is an error.
    fn wrap(self, context: impl Display) -> Result<T, BoxError>;

    /// Adds lazily evaluated context to the error. The closure only runs on the error path.
    ///
    /// # Errors
    ///
    /// Returns the annotated error when `self` is an error.
    fn wrap_with<C, F>(self, f: F) -> Result<T, BoxError>
    where
        C: Display,
        F: FnOnce() -> C;

    /// Adds context and, if the chain has none, a stack snapshot. See [`wrap_stack`](fn@crate::wrap_stack).
    ///
    /// # Errors
    ///
    /// Returns the annotated error when `self` is an error.
    fn wrap_stack(self, context: impl Display) -> Result<T, BoxError>;

    /// Lazily evaluated version of [`wrap_stack`](ResultExt::wrap_stack).
    ///
    /// # Errors
    ///
    /// Returns the annotated error when `self` is an error.
    fn wrap_stack_with<C, F>(self, f: F) -> Result<T, BoxError>
    where
        C: Display,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn wrap(self, context: impl Display) -> Result<T, BoxError> {
        let mut result = self.map_err(Into::into);
        crate::wrap(&mut result, format_args!("{context}"));
        result
    }

    fn wrap_with<C, F>(self, f: F) -> Result<T, BoxError>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        let mut result = self.map_err(Into::into);
        if result.is_err() {
            crate::wrap(&mut result, format_args!("{}", f()));
        }
        result
    }

    fn wrap_stack(self, context: impl Display) -> Result<T, BoxError> {
        let mut result = self.map_err(Into::into);
        crate::wrap_stack(&mut result, format_args!("{context}"));
        result
    }

    fn wrap_stack_with<C, F>(self, f: F) -> Result<T, BoxError>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        let mut result = self.map_err(Into::into);
        if result.is_err() {
            crate::wrap_stack(&mut result, format_args!("{}", f()));
        }
        result
    }
}
