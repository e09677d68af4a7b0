//! Derive macro for `masking`.
//!
//! This crate generates the code behind `#[derive(Maskable)]`. It:
//! - reads `#[mask(...)]` field attributes and field visibility
//! - emits `masking::Maskable` and `masking::Record` implementations that
//!   rebuild the struct field by field through the engine
//!
//! It does **not** know any mask types. Annotations are recorded verbatim and
//! resolved by the `Masker` at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input, spanned::Spanned};

mod attrs;
mod derive_struct;
mod generics;

use derive_struct::derive_struct;
use generics::{add_default_predicates, add_maskable_bounds};

/// Derives `masking::Maskable` and `masking::Record` for structs.
///
/// # Field Attributes
///
/// - **No annotation**: the field is walked with no annotation of its own, so
///   a field default registered for its name applies, else it is copied
///   (nested structs and containers are still walked).
///
/// - `#[mask("<mask type><argument>")]`: records the annotation under the
///   default `"mask"` key, e.g. `#[mask("filled")]`, `#[mask("random100")]`.
///
/// - `#[mask(key = "...")]`: records the annotation under another key, picked
///   up when the engine's annotation key is set to `key`. Both forms can be
///   combined: `#[mask("zero", audit = "hash")]`.
///
/// # Visibility
///
/// Only `pub` fields are read. Every other field is rebuilt with
/// `Default::default()`, so its type must implement `Default`.
///
/// # Zero Value
///
/// The zero value has every `pub` field at its own zero and every other field
/// at its default. A struct equal to its zero value is returned as zero
/// without walking its fields.
///
/// Enums, unions and types with lifetime parameters are rejected at compile time.
#[proc_macro_derive(Maskable, attributes(mask))]
pub fn derive_maskable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    let data = match data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`Maskable` can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`Maskable` cannot be derived for unions",
            ));
        }
    };

    if let Some(lifetime) = generics.lifetimes().next() {
        return Err(syn::Error::new(
            lifetime.span(),
            "`Maskable` cannot be derived for types with lifetime parameters",
        ));
    }

    let output = derive_struct(data, &generics)?;

    let maskable_generics = add_maskable_bounds(generics, &output.walked_generics);
    let maskable_generics = add_default_predicates(maskable_generics, &output.defaulted_types);
    let (impl_generics, ty_generics, where_clause) = maskable_generics.split_for_impl();

    let maskable = crate_path("Maskable");
    let record = crate_path("Record");
    let shape = crate_path("Shape");
    let masker = crate_path("Masker");
    let mask_error = crate_path("MaskError");
    let field_info = crate_path("FieldInfo");

    let DeriveOutput {
        mask_body,
        zero_body,
        is_zero_body,
        field_infos,
        ..
    } = output;

    Ok(quote! {
        impl #impl_generics #maskable for #ident #ty_generics #where_clause {
            const SHAPE: #shape = #shape::Record;

            fn mask_with(
                &self,
                masker: &#masker,
                _annotation: &str,
            ) -> ::core::result::Result<Self, #mask_error> {
                masker.mask_record(self, |fields| {
                    let _ = fields;
                    ::core::result::Result::Ok(#mask_body)
                })
            }

            fn zero_value() -> Self {
                #zero_body
            }

            fn is_zero(&self) -> bool {
                #is_zero_body
            }
        }

        impl #impl_generics #record for #ident #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<#field_info> {
                ::std::vec![#(#field_infos),*]
            }
        }
    })
}

/// Returns the token stream to reference the masking crate root.
///
/// Handles crate renaming (e.g., `my_masking = { package = "masking", ... }`)
/// and the case where the derive is used inside the masking crate itself.
fn crate_root() -> proc_macro2::TokenStream {
    match crate_name("masking") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::masking },
    }
}

fn crate_path(item: &str) -> proc_macro2::TokenStream {
    let root = crate_root();
    let item = format_ident!("{}", item);
    quote! { #root::#item }
}

struct DeriveOutput {
    mask_body: proc_macro2::TokenStream,
    zero_body: proc_macro2::TokenStream,
    is_zero_body: proc_macro2::TokenStream,
    field_infos: Vec<proc_macro2::TokenStream>,
    walked_generics: Vec<syn::Ident>,
    defaulted_types: Vec<syn::Type>,
}
