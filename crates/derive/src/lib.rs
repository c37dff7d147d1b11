//! Derive macro for shapets.
//!
//! `#[derive(Reflect)]` describes a struct to the shapets registry. It reads
//! field visibility, the serialization-relevant parts of `#[serde(...)]`
//! and the generator's own `#[ts(...)]` attributes.
//!
//! Field attributes:
//! - `#[ts(skip)]`, `#[ts(rename = "...")]`
//! - `#[ts(date)]` render a number or string as `Date`
//! - `#[ts(null)]` / `#[ts(no_null)]` force nullability
//! - `#[ts(optional)]` mark the property optional
//!
//! Container attributes:
//! - `#[ts(rename = "...")]`
//! - `#[ts(custom_render)]` / `#[ts(custom_render = "replace")]` call the
//!   type's `CustomRender` impl when rendering its body

mod attrs;
mod reflect;

use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Implement `shapets::Reflect` for a struct with named fields, a tuple
/// newtype, or a `#[serde(transparent)]` wrapper.
#[proc_macro_derive(Reflect, attributes(ts, serde))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match reflect::derive_reflect_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
