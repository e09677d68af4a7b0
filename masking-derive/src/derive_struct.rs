//! Struct-specific `Maskable` derivation.
//!
//! For each field this module decides whether it is walked (`pub`) or
//! defaulted (anything else), and emits:
//! - the expression rebuilding the field during masking
//! - the expression for the field's zero value
//! - the `FieldInfo` entry describing it
//!
//! Field positions in the rebuilt struct match their index in the `FieldInfo`
//! list, which is how the engine pairs each field with its annotation.

use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{DataStruct, Field, Fields, Index, LitStr, Member, Result, Visibility, spanned::Spanned};

use crate::{
    DeriveOutput,
    attrs::parse_field_tags,
    crate_path,
    generics::GenericsCollector,
};

struct FieldTokens {
    mask: TokenStream,
    zero: TokenStream,
    is_zero: Option<TokenStream>,
    info: TokenStream,
}

pub(crate) fn derive_struct(data: DataStruct, generics: &syn::Generics) -> Result<DeriveOutput> {
    let mut walked = GenericsCollector::new(generics);
    let mut defaulted_types = Vec::new();
    let mut tokens = Vec::new();

    for (index, field) in data.fields.iter().enumerate() {
        let exported = matches!(field.vis, Visibility::Public(_));
        if exported {
            walked.visit_type(&field.ty);
        } else if GenericsCollector::mentions_generics(generics, &field.ty) {
            defaulted_types.push(field.ty.clone());
        }
        tokens.push(field_tokens(index, field, exported)?);
    }

    let mask = tokens.iter().map(|field| &field.mask);
    let zero = tokens.iter().map(|field| &field.zero);
    let is_zero = tokens.iter().filter_map(|field| field.is_zero.as_ref());

    let (mask_body, zero_body) = match &data.fields {
        Fields::Named(_) => (
            quote! { Self { #(#mask),* } },
            quote! { Self { #(#zero),* } },
        ),
        Fields::Unnamed(_) => (
            quote! { Self ( #(#mask),* ) },
            quote! { Self ( #(#zero),* ) },
        ),
        Fields::Unit => (quote! { Self }, quote! { Self }),
    };

    Ok(DeriveOutput {
        mask_body,
        zero_body,
        is_zero_body: quote! { true #(&& #is_zero)* },
        field_infos: tokens.into_iter().map(|field| field.info).collect(),
        walked_generics: walked.finish(),
        defaulted_types,
    })
}

fn field_tokens(index: usize, field: &Field, exported: bool) -> Result<FieldTokens> {
    let span = field.span();
    let tags = parse_field_tags(&field.attrs)?;
    let ty = &field.ty;
    let maskable = crate_path("Maskable");
    let field_info = crate_path("FieldInfo");
    let shape = crate_path("Shape");

    let member = match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index {
            index: u32::try_from(index)
                .map_err(|_| syn::Error::new(span, "too many fields"))?,
            span,
        }),
    };
    let name = match &field.ident {
        Some(ident) => LitStr::new(&ident.to_string(), ident.span()),
        None => LitStr::new(&index.to_string(), Span::call_site()),
    };
    // Named fields are rebuilt as `name: expr`, tuple fields as bare `expr`.
    let label = field.ident.as_ref().map(|ident| quote! { #ident: });

    let tag_pairs = tags.iter().map(|tag| {
        let key = &tag.key;
        let annotation = &tag.annotation;
        quote! { (#key, #annotation) }
    });

    let (mask, zero, is_zero, field_shape) = if exported {
        (
            quote_spanned! { span => #label fields.walk(#index, &self.#member)? },
            quote_spanned! { span => #label <#ty as #maskable>::zero_value() },
            Some(quote_spanned! { span => <#ty as #maskable>::is_zero(&self.#member) }),
            quote! { ::core::option::Option::Some(<#ty as #maskable>::SHAPE) },
        )
    } else {
        (
            quote_spanned! { span => #label ::core::default::Default::default() },
            quote_spanned! { span => #label ::core::default::Default::default() },
            None,
            quote! { ::core::option::Option::<#shape>::None },
        )
    };

    Ok(FieldTokens {
        mask,
        zero,
        is_zero,
        info: quote! {
            #field_info {
                name: #name,
                exported: #exported,
                shape: #field_shape,
                tags: &[#(#tag_pairs),*],
            }
        },
    })
}
