// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{BoxError, StackError, TRACE_LIMIT};

/// Policy for capturing stack traces in a [`StackError`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePolicy {
    /// Always capture, regardless of the `RUST_BACKTRACE` environment variable.
    #[default]
    Forced,
    /// Capture only when the `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` environment variables enable it.
    Auto,
    /// Never capture. The resulting trace is empty.
    Never,
}

/// Builder for creating [`StackError`] instances with custom configurations.
///
/// # Examples
///
/// ```rust
/// use errwrap::{CapturePolicy, StackError};
///
/// let error = StackError::builder()
///     .capture_policy(CapturePolicy::Never)
///     .build("disk full");
///
/// assert_eq!(error.to_string(), "disk full");
/// assert!(error.trace().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StackErrorBuilder {
    pub(crate) capture_policy: CapturePolicy,
    pub(crate) trace_limit: usize,
}

impl Default for StackErrorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StackErrorBuilder {
    /// Creates a new [`StackErrorBuilder`] with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            capture_policy: CapturePolicy::Forced,
            trace_limit: TRACE_LIMIT,
        }
    }

    /// Sets the stack capture policy.
    #[must_use]
    pub fn capture_policy(mut self, policy: CapturePolicy) -> Self {
        self.capture_policy = policy;
        self
    }

    /// Sets the maximum number of trace bytes to keep.
    ///
    /// The limit can only shrink the trace: values above [`TRACE_LIMIT`] are clamped.
    #[must_use]
    pub fn trace_limit(mut self, limit: usize) -> Self {
        self.trace_limit = limit.min(TRACE_LIMIT);
        self
    }

    /// Captures the stack and wraps `error` in a [`StackError`].
    #[must_use]
    pub fn build<E>(self, error: E) -> StackError
    where
        E: Into<BoxError>,
    {
        StackError::from_builder(self, error.into())
    }
}
