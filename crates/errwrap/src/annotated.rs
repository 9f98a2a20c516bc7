// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use compact_str::CompactString;

use crate::BoxError;

/// A node of the wrap chain: a context message in front of the error it wraps.
///
/// Renders as `"{message}: {inner}"` and unwraps to the inner error. Values are produced by
/// [`wrap`](crate::wrap) and friends and are never mutated afterwards.
pub struct Annotated {
    message: CompactString,
    inner: BoxError,
}

impl Annotated {
    pub(crate) fn new(message: CompactString, inner: BoxError) -> Self {
        Self { message, inner }
    }

    /// Returns the context message added by this node, without the inner error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns a reference to the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    /// Consumes the node, returning the wrapped error.
    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl fmt::Display for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.inner)
    }
}

impl fmt::Debug for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotated")
            .field("message", &self.message)
            .field("inner", &self.inner)
            .finish()
    }
}

impl StdError for Annotated {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.inner)
    }
}
