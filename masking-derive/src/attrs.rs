//! Parsing of `#[mask(...)]` field attributes.
//!
//! A field may carry any number of `(key, annotation)` tags:
//!
//! | Attribute                          | Tags recorded                 |
//! |------------------------------------|-------------------------------|
//! | none                               | none                          |
//! | `#[mask("filled4")]`               | `("mask", "filled4")`         |
//! | `#[mask(fake = "hash")]`           | `("fake", "hash")`            |
//! | `#[mask("zero", fake = "hash")]`   | `("mask", "zero")`, `("fake", "hash")` |
//!
//! The engine picks the tag whose key matches its configured annotation key.

use proc_macro2::Span;
use syn::{
    Attribute, Ident, LitStr, Meta, Result, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
};

/// Key that a bare `#[mask("...")]` string is recorded under.
pub(crate) const DEFAULT_KEY: &str = "mask";

/// One `(key, annotation)` pair from a field's attributes.
#[derive(Clone, Debug)]
pub(crate) struct Tag {
    pub(crate) key: String,
    pub(crate) annotation: LitStr,
}

enum TagArg {
    Default(LitStr),
    Keyed(Ident, LitStr),
}

impl Parse for TagArg {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Default(input.parse()?));
        }
        let key = input.call(Ident::parse_any)?;
        input.parse::<Token![=]>()?;
        Ok(Self::Keyed(key, input.parse()?))
    }
}

fn push_tag(tags: &mut Vec<Tag>, key: String, annotation: LitStr, span: Span) -> Result<()> {
    if tags.iter().any(|tag| tag.key == key) {
        return Err(syn::Error::new(
            span,
            format!("duplicate annotation for key `{key}` on the same field"),
        ));
    }
    tags.push(Tag { key, annotation });
    Ok(())
}

pub(crate) fn parse_field_tags(attrs: &[Attribute]) -> Result<Vec<Tag>> {
    let mut tags = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "missing annotation: use #[mask(\"<mask type><argument>\")] \
                     (e.g., #[mask(\"filled\")], #[mask(\"random100\")])",
                ));
            }
            Meta::List(list) => {
                let args = list
                    .parse_args_with(Punctuated::<TagArg, Token![,]>::parse_terminated)
                    .map_err(|_| {
                        syn::Error::new(
                            attr.span(),
                            "expected #[mask(\"...\")] or #[mask(key = \"...\")]",
                        )
                    })?;
                for arg in args {
                    match arg {
                        TagArg::Default(annotation) => {
                            push_tag(&mut tags, DEFAULT_KEY.to_owned(), annotation, attr.span())?;
                        }
                        TagArg::Keyed(key, annotation) => {
                            push_tag(&mut tags, key.unraw().to_string(), annotation, attr.span())?;
                        }
                    }
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected #[mask(\"...\")] syntax (e.g., #[mask(\"hash\")])",
                ));
            }
        }
    }
    Ok(tags)
}
