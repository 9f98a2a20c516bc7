// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use compact_str::CompactString;

/// An annotated error that hides what it annotates.
///
/// Produced by [`add`](crate::add). The rendering keeps the full message of the previous error,
/// but [`source`](StdError::source) is `None`: callers cannot recover or match on the
/// underlying error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    message: CompactString,
}

impl Opaque {
    pub(crate) fn new(message: CompactString) -> Self {
        Self { message }
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Opaque {}
