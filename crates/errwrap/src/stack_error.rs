// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::trace;
use crate::{BoxError, StackErrorBuilder};

/// Capability of an error to carry a stack snapshot.
///
/// The chain scan performed by [`wrap_stack`](crate::wrap_stack) asks each node for this
/// capability rather than matching a single concrete type.
pub trait StackTrace {
    /// Returns the captured trace bytes. May be empty.
    fn stack(&self) -> &[u8];
}

/// An error that carries a stack snapshot alongside the error it wraps.
///
/// The snapshot is taken when the `StackError` is constructed and is limited to
/// [`TRACE_LIMIT`](crate::TRACE_LIMIT) bytes. It is metadata only: the
/// [`Display`](fmt::Display) output is exactly that of the inner error, so generic error
/// formatting never prints the trace twice. Consumers that want the trace read it with
/// [`trace`](Self::trace).
///
/// # Examples
///
/// ```rust
/// use std::error::Error;
///
/// use errwrap::StackError;
///
/// let error = StackError::new("connection reset");
///
/// assert_eq!(error.to_string(), "connection reset");
/// assert_eq!(error.source().unwrap().to_string(), "connection reset");
/// ```
pub struct StackError {
    trace: Box<[u8]>,
    inner: BoxError,
}

impl StackError {
    /// Wraps `error`, capturing the calling thread's stack.
    ///
    /// Capture is forced, independent of `RUST_BACKTRACE`. Use [`builder`](Self::builder) to
    /// change the policy or lower the size limit.
    #[must_use]
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::builder().build(error)
    }

    /// Creates a new [`StackErrorBuilder`] for configuring stack capture.
    #[must_use]
    pub fn builder() -> StackErrorBuilder {
        StackErrorBuilder::new()
    }

    pub(crate) fn from_builder(builder: StackErrorBuilder, inner: BoxError) -> Self {
        Self {
            trace: trace::capture(builder.capture_policy, builder.trace_limit),
            inner,
        }
    }

    /// Returns the captured trace bytes.
    #[must_use]
    pub fn trace(&self) -> &[u8] {
        &self.trace
    }

    /// Returns the captured trace as text.
    #[must_use]
    pub fn trace_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.trace)
    }

    /// Returns whether a non-empty trace was captured.
    #[must_use]
    pub fn has_trace(&self) -> bool {
        !self.trace.is_empty()
    }

    /// Returns a reference to the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Consumes the `StackError`, returning the wrapped error and discarding the trace.
    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl StackTrace for StackError {
    fn stack(&self) -> &[u8] {
        &self.trace
    }
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackError")
            .field("inner", &self.inner)
            .field("trace_len", &self.trace.len())
            .finish()
    }
}

impl StdError for StackError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.inner)
    }
}
