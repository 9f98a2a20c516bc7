// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Walking the wrap chain.

use std::error::Error as StdError;
use std::iter::FusedIterator;

use crate::{Annotated, BoxError, StackError, StackTrace};

/// Maximum number of nodes visited by a chain walk.
///
/// Wrap chains are as deep as the call stack that produced them, so real chains never come
/// close. The cutoff only protects against pathological `source()` implementations.
///
/// Only the iterative walks in this module are bounded. Rendering an [`Annotated`] or a
/// [`StackError`] and dropping a chain recurse once per node.
pub const MAX_CHAIN_HOPS: usize = 1024;

/// Iterator over an error and its sources, newest (outermost) first.
///
/// Created by [`chain`]. The walk is iterative and stops after [`MAX_CHAIN_HOPS`] nodes.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
    remaining: usize,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.next = None;
            return None;
        }

        let current = self.next?;
        self.next = current.source();
        self.remaining -= 1;
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Returns an iterator over `error` and every error reachable through
/// [`source`](StdError::source).
///
/// # Examples
///
/// ```rust
/// use errwrap::BoxError;
///
/// let mut error: Option<BoxError> = Some("file not found".into());
/// errwrap::wrap!(&mut error, "open({})", "a.txt");
///
/// let error = error.unwrap();
/// let messages: Vec<String> = errwrap::chain(&*error).map(ToString::to_string).collect();
/// assert_eq!(messages, ["open(a.txt): file not found", "file not found"]);
/// ```
#[must_use]
pub fn chain<'a>(error: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain {
        next: Some(error),
        remaining: MAX_CHAIN_HOPS,
    }
}

/// Returns the innermost error reachable from `error`.
#[must_use]
pub fn root_cause<'a>(error: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    chain(error).last().unwrap_or(error)
}

/// Returns the first error in the chain, `error` itself included, that is a `T`.
#[must_use]
pub fn find<'a, T: StdError + 'static>(error: &'a (dyn StdError + 'static)) -> Option<&'a T> {
    chain(error).find_map(|e| e.downcast_ref::<T>())
}

/// Returns the stack capability of `error` itself, if it carries one.
#[must_use]
pub fn as_stack_trace<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a dyn StackTrace> {
    error.downcast_ref::<StackError>().map(|e| e as &dyn StackTrace)
}

/// Returns the first node in the chain that carries a stack snapshot.
#[must_use]
pub fn find_stack<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a dyn StackTrace> {
    chain(error).find_map(as_stack_trace)
}

/// Returns whether any node in the chain carries a stack snapshot.
#[must_use]
pub fn has_stack(error: &(dyn StdError + 'static)) -> bool {
    find_stack(error).is_some()
}

/// Counts the nodes in the chain that carry a stack snapshot.
#[must_use]
pub fn stack_count(error: &(dyn StdError + 'static)) -> usize {
    chain(error).filter_map(as_stack_trace).count()
}

/// Unwraps one annotation layer, taking ownership of the wrapped error.
///
/// Sees through [`Annotated`] and [`StackError`] nodes. Any other error is handed back
/// unchanged as `Err`. The returned error is the same allocation that was wrapped.
///
/// # Errors
///
/// Returns the input as `Err` when it is not one of this crate's wrapper types.
///
/// # Examples
///
/// ```rust
/// use errwrap::BoxError;
///
/// let mut error: Option<BoxError> = Some(Box::new(std::io::Error::other("eof")));
/// errwrap::wrap!(&mut error, "read header");
///
/// let inner = errwrap::unwrap(error.unwrap()).unwrap();
/// assert!(inner.downcast_ref::<std::io::Error>().is_some());
/// assert!(errwrap::unwrap(inner).is_err());
/// ```
pub fn unwrap(error: BoxError) -> Result<BoxError, BoxError> {
    let error = match error.downcast::<Annotated>() {
        Ok(annotated) => return Ok(annotated.into_inner()),
        Err(error) => error,
    };

    error.downcast::<StackError>().map(|stack| stack.into_inner())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;
    use crate::CapturePolicy;

    /// An error whose source is itself.
    #[derive(Debug)]
    struct Cyclic;

    impl fmt::Display for Cyclic {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("cyclic")
        }
    }

    impl StdError for Cyclic {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(self)
        }
    }

    fn quiet_stack(inner: impl Into<BoxError>) -> StackError {
        StackError::builder().capture_policy(CapturePolicy::Never).build(inner)
    }

    #[test]
    fn walk_order() {
        let error = Annotated::new("outer".into(), Box::new(Annotated::new("inner".into(), "root".into())));
        let messages: Vec<_> = chain(&error).map(ToString::to_string).collect();
        assert_eq!(messages, ["outer: inner: root", "inner: root", "root"]);
        assert_eq!(root_cause(&error).to_string(), "root");
    }

    #[test]
    fn single_node() {
        let error = std::io::Error::other("eof");
        assert_eq!(chain(&error).count(), 1);
        assert_eq!(root_cause(&error).to_string(), "eof");
    }

    #[test]
    fn cyclic_source_is_cut_off() {
        let error = Cyclic;
        let mut walk = chain(&error);
        assert_eq!(walk.by_ref().count(), MAX_CHAIN_HOPS);
        assert!(walk.next().is_none());
        assert_eq!(root_cause(&error).to_string(), "cyclic");
        assert!(!has_stack(&error));
    }

    #[test]
    fn finds_typed_error() {
        let error = Annotated::new("read".into(), Box::new(std::io::Error::other("eof")));
        assert!(find::<std::io::Error>(&error).is_some());
        assert!(find::<Annotated>(&error).is_some());
        assert!(find::<StackError>(&error).is_none());
    }

    #[test]
    fn stack_lookup() {
        let error = Annotated::new("outer".into(), Box::new(quiet_stack("root")));
        assert!(has_stack(&error));
        assert_eq!(stack_count(&error), 1);
        assert!(as_stack_trace(&error).is_none());
        assert!(find_stack(&error).unwrap().stack().is_empty());

        let plain = Annotated::new("outer".into(), "root".into());
        assert!(!has_stack(&plain));
        assert_eq!(stack_count(&plain), 0);
    }

    #[test]
    fn lookups_outlive_the_walk() {
        fn deepest_stack(error: &BoxError) -> Option<&dyn StackTrace> {
            find_stack(&**error)
        }

        fn innermost(error: &BoxError) -> &(dyn StdError + 'static) {
            root_cause(&**error)
        }

        let error: BoxError = Box::new(Annotated::new("outer".into(), Box::new(quiet_stack("root"))));
        let stack = deepest_stack(&error);
        let root = innermost(&error);
        let io = find::<std::io::Error>(&*error);

        assert!(stack.is_some());
        assert_eq!(root.to_string(), "root");
        assert!(io.is_none());
        assert_eq!(chain(&*error).count(), 3);
    }

    #[test]
    fn unwrap_layers() {
        let error: BoxError = Box::new(Annotated::new("outer".into(), Box::new(quiet_stack("root"))));

        let error = unwrap(error).unwrap();
        assert!(error.downcast_ref::<StackError>().is_some());

        let error = unwrap(error).unwrap();
        assert_eq!(error.to_string(), "root");

        let error = unwrap(error).unwrap_err();
        assert_eq!(error.to_string(), "root");
    }
}
