// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Procedural macros to support the [`errwrap`](https://docs.rs/errwrap) crate. See `errwrap` for more information.
//!
//! # Macros
//!
//! - `#[annotate("message")]` - Add context to every error a function returns
//! - `#[annotate_stack("message")]` - Same, and capture a stack snapshot if the error chain has none

use proc_macro::TokenStream;

mod annotate;
mod utils;

use annotate::Mode;

/// Attribute macro that adds context to every error returned by a function.
///
/// Format arguments are evaluated when the function is entered, so the message shows the
/// arguments as they were passed even if the body changes or consumes them.
///
/// See the main `errwrap` crate documentation for detailed usage examples.
#[proc_macro_attribute]
#[cfg_attr(test, mutants::skip)]
pub fn annotate(args: TokenStream, input: TokenStream) -> TokenStream {
    annotate::annotate(Mode::Plain, args, input)
}

/// Attribute macro that adds context and, when needed, a stack snapshot to every error
/// returned by a function.
///
/// See the main `errwrap` crate documentation for detailed usage examples.
#[proc_macro_attribute]
#[cfg_attr(test, mutants::skip)]
pub fn annotate_stack(args: TokenStream, input: TokenStream) -> TokenStream {
    annotate::annotate(Mode::Stack, args, input)
}
