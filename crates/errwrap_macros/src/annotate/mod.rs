// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, ItemFn, LitStr, Result, ReturnType, parse_macro_input};

use crate::utils::bail;

/// Which annotation function the generated code calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// `errwrap::wrap`
    Plain,
    /// `errwrap::wrap_stack`
    Stack,
}

impl Mode {
    fn function(self) -> proc_macro2::TokenStream {
        match self {
            Self::Plain => quote! { errwrap::wrap },
            Self::Stack => quote! { errwrap::wrap_stack },
        }
    }
}

/// Attribute macro that runs the function body and annotates its error result.
///
/// Supports format expressions like:
/// - `#[annotate("failed to read file: {}", path.display())]`
/// - `#[annotate("copy({src}, {dst})")]`
/// - `#[annotate("simple message")]`
/// - `#[annotate]` (the function name becomes the message)
#[cfg_attr(test, mutants::skip)] // procedural macro API cannot be used in tests directly
pub(crate) fn annotate(mode: Mode, args: TokenStream, input: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(args);
    let input = parse_macro_input!(input as ItemFn);

    impl_annotate_attribute(mode, args, input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn impl_annotate_attribute(mode: Mode, args: proc_macro2::TokenStream, mut fn_definition: ItemFn) -> Result<proc_macro2::TokenStream> {
    let context = if args.is_empty() {
        let fn_name = LitStr::new(&fn_definition.sig.ident.to_string(), fn_definition.sig.ident.span());
        Context::Fixed(quote! { #fn_name })
    } else {
        generate_context_expr(args)?
    };

    let return_type = check_return_type(&fn_definition.sig.output)?;
    let asyncness = &fn_definition.sig.asyncness;
    let await_suffix = asyncness.is_some().then(|| quote! { .await });
    let body = &fn_definition.block;
    let function = mode.function();
    let result = Ident::new("result", Span::mixed_site());
    let message = Ident::new("message", Span::mixed_site());

    // arguments are read on entry, before the body can mutate or move them
    let (prelude, context) = match context {
        Context::Fixed(tokens) => (None, quote! { format_args!(#tokens) }),
        Context::Formatted(tokens) => (
            Some(quote! { let #message = format!(#tokens); }),
            quote! { format_args!("{}", #message) },
        ),
    };

    let block = quote! {
        {
            #prelude
            let mut #result = (#asyncness || -> #return_type #body)() #await_suffix;
            #function(&mut #result, #context);
            #result
        }
    };

    fn_definition.block = syn::parse2(block)?;

    Ok(quote! { #fn_definition })
}

/// The context message of an annotated function, as `format_args!` input.
#[derive(Debug)]
enum Context {
    /// Text that does not depend on the function's arguments.
    Fixed(proc_macro2::TokenStream),
    /// A format string that reads the function's arguments.
    Formatted(proc_macro2::TokenStream),
}

/// Classify the attribute arguments.
///
/// Accepts a string literal, optionally with inline parameter interpolation like `"{param}"`,
/// followed by format arguments.
fn generate_context_expr(args_stream: proc_macro2::TokenStream) -> Result<Context> {
    let tokens: Vec<_> = args_stream.into_iter().collect();

    let Some(proc_macro2::TokenTree::Literal(lit)) = tokens.first() else {
        bail!("cannot parse annotate arguments as a string literal or format expression");
    };
    let lit_str = lit.to_string();
    if !is_quoted_string(&lit_str) {
        bail!(lit.span(), "annotate requires a string literal or format expression");
    }

    if tokens.len() > 1 || (lit_str.contains('{') && lit_str.contains('}')) {
        Ok(Context::Formatted(proc_macro2::TokenStream::from_iter(tokens)))
    } else if lit_str.contains('{') || lit_str.contains('}') {
        // a lone brace is not a valid format string, print it verbatim
        Ok(Context::Fixed(quote! { "{}", #lit }))
    } else {
        Ok(Context::Fixed(quote! { #lit }))
    }
}

fn is_quoted_string(lit: &str) -> bool {
    lit.len() >= 2 && lit.starts_with('"') && lit.ends_with('"')
}

/// Returns the function's return type, rejecting functions that return `()`.
fn check_return_type(output: &ReturnType) -> Result<&syn::Type> {
    match output {
        ReturnType::Type(_, ty) => Ok(ty),
        ReturnType::Default => {
            bail!("annotate can only be applied to functions returning Result")
        }
    }
}
