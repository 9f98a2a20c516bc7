// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test utilities for the errwrap crate.
//!
//! This module is only available when the `test-util` feature is enabled.

/// Asserts that a [`BoxError`](crate::BoxError) renders to the expected message and that its
/// chain holds at most one stack snapshot.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use errwrap::{BoxError, assert_error_message};
///
/// let mut error: Option<BoxError> = Some("file not found".into());
/// errwrap::wrap_stack!(&mut error, "open({})", "a.txt");
///
/// assert_error_message!(error.unwrap(), "open(a.txt): file not found");
/// # }
/// ```
#[macro_export]
#[cfg_attr(coverage_nightly, coverage(off))] // coverage doesn't handle panics well
macro_rules! assert_error_message {
    ($error:expr, $expected:expr) => {{
        let owned: $crate::BoxError = $error;
        let error: &(dyn ::std::error::Error + 'static) = &*owned;
        let expected: &str = $expected;
        let actual = error.to_string();

        assert!(actual == expected, "left : {expected}\nright: {actual}");

        let stacks = $crate::stack_count(error);
        assert!(stacks <= 1, "expected at most one stack snapshot in the chain, found {stacks}");
    }};
}

#[cfg(test)]
pub(crate) use log_capture::LogCapture;
