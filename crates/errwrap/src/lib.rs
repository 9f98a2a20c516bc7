// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Context annotation for errors, with at most one stack snapshot per error chain.
//!
//! As an error travels up the call stack, each function it passes through can prefix it with a
//! short description of what that function was doing. The original error stays reachable through
//! [`source`](std::error::Error::source), so callers can still match on it, while the rendered
//! message reads outermost context first:
//!
//! ```text
//! load config: open(a.txt): No such file or directory (os error 2)
//! ```
//!
//! # Key Features
//!
//! - [**`wrap!`**](wrap!): adds context to the error held by a slot
//! - [**`wrap_stack!`**](wrap_stack!): like `wrap!`, and also captures a stack snapshot unless the chain already has one
//! - [**`StackError`**]: carries a size-bounded stack snapshot next to the error it wraps, without changing its message
//! - [**`#[annotate("...")]`**](annotate): attribute macro that annotates every error a function returns
//! - [**`ResultExt`**]: the same operations as combinators on [`Result`]
//! - [**`chain`**]: iterative walk over an error chain, plus [`find`], [`find_stack`] and [`root_cause`]
//!
//! # Slots
//!
//! The annotation functions take a mutable reference to an [`ErrorSlot`] (an
//! `Option<BoxError>`, a `Result<T, BoxError>` or a bare [`BoxError`]) and replace the error
//! it holds with an annotated one. A slot without an error is left untouched, which makes the
//! calls safe to run unconditionally on every exit path.
//!
//! ```rust
//! use errwrap::BoxError;
//!
//! let mut result: Result<(), BoxError> = Err("file not found".into());
//! errwrap::wrap!(&mut result, "open({})", "a.txt");
//! errwrap::wrap!(&mut result, "load config");
//!
//! assert_eq!(result.unwrap_err().to_string(), "load config: open(a.txt): file not found");
//! ```
//!
//! # Stack Snapshots
//!
//! Stack traces are bulky and only interesting from the deepest frame. [`wrap_stack!`] scans
//! the chain and only captures when no node carries a stack yet, so calling it at every level
//! records exactly one snapshot, at the level closest to the failure. The snapshot is taken when
//! `wrap_stack!` first runs, not when the underlying error was created.
//!
//! ```rust
//! use errwrap::BoxError;
//!
//! let mut result: Result<(), BoxError> = Err("file not found".into());
//! errwrap::wrap_stack!(&mut result, "open({})", "a.txt");
//! errwrap::wrap_stack!(&mut result, "load config");
//!
//! let error = result.unwrap_err();
//! assert_eq!(error.to_string(), "load config: open(a.txt): file not found");
//!
//! let stack = errwrap::find_stack(&*error).unwrap();
//! assert!(stack.stack().len() <= errwrap::TRACE_LIMIT);
//! ```
//!
//! # Function Annotation
//!
//! The [`#[annotate("...")]`](annotate) and [`#[annotate_stack("...")]`](annotate_stack)
//! attribute macros run the function body and apply [`wrap`] or [`wrap_stack`] to its result,
//! so every early `return` and `?` is covered without touching each exit point. Format
//! arguments can refer to the function parameters and are evaluated on entry, before the body
//! runs.
//!
//! ```rust
//! use errwrap::BoxError;
//!
//! #[errwrap::annotate("open({path})")]
//! fn open(path: &str) -> Result<String, BoxError> {
//!     Ok(std::fs::read_to_string(path)?)
//! }
//!
//! #[errwrap::annotate_stack("load config")]
//! fn load_config() -> Result<String, BoxError> {
//!     open("/definitely/not/here")
//! }
//!
//! let error = load_config().unwrap_err();
//! assert!(error.to_string().starts_with("load config: open(/definitely/not/here): "));
//! assert!(errwrap::has_stack(&*error));
//! ```
//!
//! # Features
//!
//! - `logs`: emits a `TRACE` level `tracing` event named `errwrap.stack_captured` whenever a
//!   stack snapshot is taken. Errors themselves are never logged.
//! - `test-util`: exposes the [`assert_error_message!`] macro.

#[doc(hidden)]
extern crate self as errwrap;

mod annotated;
mod builder;
mod chain;
mod ext;
mod opaque;
mod slot;
mod stack_error;
mod trace;
mod wrap;

#[cfg(any(feature = "test-util", test))]
pub mod test_util;

pub use annotated::Annotated;
pub use builder::{CapturePolicy, StackErrorBuilder};
pub use chain::{Chain, MAX_CHAIN_HOPS, as_stack_trace, chain, find, find_stack, has_stack, root_cause, stack_count, unwrap};
pub use errwrap_macros::{annotate, annotate_stack};
pub use ext::ResultExt;
pub use opaque::Opaque;
pub use slot::ErrorSlot;
pub use stack_error::{StackError, StackTrace};
pub use trace::TRACE_LIMIT;
pub use wrap::{add, wrap, wrap_stack};

/// Owned, type-erased error used throughout the wrap chain.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
