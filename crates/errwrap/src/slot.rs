// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use crate::BoxError;

/// A place that may hold an error, updated in place by the annotation functions.
///
/// Implemented for `Option<BoxError>`, `Result<T, BoxError>` and [`BoxError`] itself.
/// An empty slot (`None` or `Ok`) is never modified.
pub trait ErrorSlot {
    /// Returns the held error, if any.
    fn error_mut(&mut self) -> Option<&mut BoxError>;
}

impl ErrorSlot for Option<BoxError> {
    fn error_mut(&mut self) -> Option<&mut BoxError> {
        self.as_mut()
    }
}

impl<T> ErrorSlot for Result<T, BoxError> {
    fn error_mut(&mut self) -> Option<&mut BoxError> {
        self.as_mut().err()
    }
}

impl ErrorSlot for BoxError {
    fn error_mut(&mut self) -> Option<&mut BoxError> {
        Some(self)
    }
}

/// Placeholder left in a slot while its error is being moved into a new wrapper.
///
/// Zero-sized, so boxing it does not allocate.
#[derive(Debug)]
struct Vacant;

impl fmt::Display for Vacant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("vacant error slot")
    }
}

impl StdError for Vacant {}

/// Replaces `error` with the result of `f`, which receives ownership of the old value.
pub(crate) fn replace_with(error: &mut BoxError, f: impl FnOnce(BoxError) -> BoxError) {
    let old = std::mem::replace(error, Box::new(Vacant));
    *error = f(old);
}
