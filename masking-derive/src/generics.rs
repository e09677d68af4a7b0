//! Generic parameter discovery and bound insertion.
//!
//! Only type parameters that appear in walked (exported) field types get a
//! `Maskable` bound. Every type parameter gets `'static`, which `Maskable`
//! requires of the implementing type.
//!
//! `PhantomData<T>` never carries data, so `T` inside it does not need
//! `Maskable`:
//!
//! ```ignore
//! #[derive(Maskable)]
//! pub struct TypedId<T> {
//!     pub id: String,
//!     pub marker: PhantomData<T>, // no `T: Maskable` required
//! }
//! ```

use syn::{GenericArgument, Generics, Ident, PathArguments, ReturnType, Type, TypeParamBound, parse_quote};

use crate::crate_path;

/// Collects the type parameters of `generics` mentioned by field types.
pub(crate) struct GenericsCollector<'a> {
    generics: &'a Generics,
    found: Vec<Ident>,
}

impl<'a> GenericsCollector<'a> {
    pub(crate) fn new(generics: &'a Generics) -> Self {
        Self {
            generics,
            found: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<Ident> {
        self.found
    }

    /// Whether `ty` mentions any of the type parameters.
    pub(crate) fn mentions_generics(generics: &Generics, ty: &Type) -> bool {
        let mut collector = GenericsCollector::new(generics);
        collector.visit_type(ty);
        !collector.found.is_empty()
    }

    fn note(&mut self, ident: &Ident) {
        let is_param = self.generics.type_params().any(|param| param.ident == *ident);
        if is_param && !self.found.contains(ident) {
            self.found.push(ident.clone());
        }
    }

    pub(crate) fn visit_type(&mut self, ty: &Type) {
        match ty {
            Type::Path(type_path) => {
                if let Some(qself) = &type_path.qself {
                    self.visit_type(&qself.ty);
                }
                self.visit_path(&type_path.path);
            }
            Type::Reference(reference) => self.visit_type(&reference.elem),
            Type::Ptr(pointer) => self.visit_type(&pointer.elem),
            Type::Slice(slice) => self.visit_type(&slice.elem),
            Type::Array(array) => self.visit_type(&array.elem),
            Type::Paren(paren) => self.visit_type(&paren.elem),
            Type::Group(group) => self.visit_type(&group.elem),
            Type::Tuple(tuple) => tuple.elems.iter().for_each(|elem| self.visit_type(elem)),
            Type::TraitObject(object) => object.bounds.iter().for_each(|bound| self.visit_bound(bound)),
            Type::ImplTrait(impl_trait) => {
                impl_trait.bounds.iter().for_each(|bound| self.visit_bound(bound));
            }
            Type::BareFn(bare_fn) => {
                bare_fn.inputs.iter().for_each(|input| self.visit_type(&input.ty));
                self.visit_return(&bare_fn.output);
            }
            _ => {}
        }
    }

    fn visit_bound(&mut self, bound: &TypeParamBound) {
        if let TypeParamBound::Trait(trait_bound) = bound {
            self.visit_path(&trait_bound.path);
        }
    }

    fn visit_return(&mut self, output: &ReturnType) {
        if let ReturnType::Type(_, ty) = output {
            self.visit_type(ty);
        }
    }

    fn visit_path(&mut self, path: &syn::Path) {
        if path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "PhantomData")
        {
            return;
        }
        for segment in &path.segments {
            self.note(&segment.ident);
            match &segment.arguments {
                PathArguments::AngleBracketed(args) => {
                    for arg in &args.args {
                        match arg {
                            GenericArgument::Type(ty) => self.visit_type(ty),
                            GenericArgument::AssocType(assoc) => self.visit_type(&assoc.ty),
                            GenericArgument::Constraint(constraint) => {
                                constraint.bounds.iter().for_each(|bound| self.visit_bound(bound));
                            }
                            _ => {}
                        }
                    }
                }
                PathArguments::Parenthesized(args) => {
                    args.inputs.iter().for_each(|input| self.visit_type(input));
                    self.visit_return(&args.output);
                }
                PathArguments::None => {}
            }
        }
    }
}

/// Adds `'static` to every type parameter and `Maskable` to those in `walked`.
pub(crate) fn add_maskable_bounds(mut generics: Generics, walked: &[Ident]) -> Generics {
    let maskable = crate_path("Maskable");
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
        if walked.contains(&param.ident) {
            param.bounds.push(parse_quote!(#maskable));
        }
    }
    generics
}

/// Requires `Default` of each unexported field type that mentions a type parameter.
pub(crate) fn add_default_predicates(mut generics: Generics, defaulted: &[Type]) -> Generics {
    if defaulted.is_empty() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for ty in defaulted {
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::core::default::Default));
    }
    generics
}
