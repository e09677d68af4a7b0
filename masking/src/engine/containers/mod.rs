//! `Maskable` implementations for standard library types.
//!
//! ## Nil, Empty and Populated
//!
//! `None` stays `None`, an empty container stays empty and a populated one
//! keeps its length. Elements inherit the annotation of the field holding
//! the container.
//!
//! ## Map Keys Are Copied
//!
//! Keys are never masked. When a key is text and the map itself carries no
//! annotation, the key selects a field default, so `register_field_default("ID", ...)`
//! masks the `"ID"` entry of a `HashMap<String, _>`.
//!
//! ## Set Masking Can Collapse Elements
//!
//! Masked set elements are collected back into a set. If masking makes
//! elements equal (e.g. `filled` on strings of the same length), the set
//! shrinks.

mod leaves;
mod maps;
mod passthrough;
mod references;
mod sequences;
mod sets;


#[cfg(feature = "json")]
pub(crate) use maps::value_annotation;

// =============================================================================
// Passthrough implementation helper
// =============================================================================

macro_rules! impl_maskable_passthrough {
    ($ty:ty) => {
        impl_maskable_passthrough!($ty, <$ty as ::core::default::Default>::default());
    };
    ($ty:ty, $zero:expr) => {
        impl crate::engine::traits::Maskable for $ty {
            const SHAPE: crate::engine::traits::Shape = crate::engine::traits::Shape::Opaque;

            fn mask_with(
                &self,
                _masker: &crate::engine::masker::Masker,
                _annotation: &str,
            ) -> Result<Self, crate::engine::error::MaskError> {
                Ok(self.clone())
            }

            fn zero_value() -> Self {
                $zero
            }

            fn is_zero(&self) -> bool {
                *self == Self::zero_value()
            }
        }
    };
}

pub(crate) use impl_maskable_passthrough;
