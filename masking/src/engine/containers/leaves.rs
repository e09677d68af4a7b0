//! Primitive leaves dispatched to the category tables.
//!
//! Integers and floats are widened to 64 bits for the transform and narrowed
//! back with `as`, so an out-of-range result wraps (integers) or saturates to
//! infinity (`f32`) the same way a native conversion does.

use std::{borrow::Cow, sync::Arc};

use crate::engine::{
    error::MaskError,
    masker::Masker,
    traits::{Category, Maskable, Shape},
};

// =============================================================================
// Text
// =============================================================================

impl Maskable for String {
    const SHAPE: Shape = Shape::Leaf(Category::Text);

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        masker.dispatch_text(annotation, self)
    }

    fn zero_value() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Maskable for Box<str> {
    const SHAPE: Shape = Shape::Leaf(Category::Text);

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        masker
            .dispatch_text(annotation, self)
            .map(String::into_boxed_str)
    }

    fn zero_value() -> Self {
        Box::default()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Maskable for Arc<str> {
    const SHAPE: Shape = Shape::Leaf(Category::Text);

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        masker.dispatch_text(annotation, self).map(Arc::from)
    }

    fn zero_value() -> Self {
        Arc::from("")
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Maskable for Cow<'static, str> {
    const SHAPE: Shape = Shape::Leaf(Category::Text);

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        masker.dispatch_text(annotation, self).map(Cow::Owned)
    }

    fn zero_value() -> Self {
        Cow::Borrowed("")
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

// =============================================================================
// Numbers
// =============================================================================

macro_rules! impl_int_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Maskable for $ty {
                const SHAPE: Shape = Shape::Leaf(Category::Int);

                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_possible_wrap,
                    trivial_numeric_casts
                )]
                fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
                    masker
                        .dispatch_int(annotation, *self as i64)
                        .map(|masked| masked as $ty)
                }

                fn zero_value() -> Self {
                    0
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

macro_rules! impl_uint_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Maskable for $ty {
                const SHAPE: Shape = Shape::Leaf(Category::Uint);

                #[allow(clippy::cast_possible_truncation, trivial_numeric_casts)]
                fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
                    masker
                        .dispatch_uint(annotation, *self as u64)
                        .map(|masked| masked as $ty)
                }

                fn zero_value() -> Self {
                    0
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

macro_rules! impl_float_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Maskable for $ty {
                const SHAPE: Shape = Shape::Leaf(Category::Float);

                #[allow(clippy::cast_possible_truncation, trivial_numeric_casts)]
                fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
                    masker
                        .dispatch_float(annotation, f64::from(*self))
                        .map(|masked| masked as $ty)
                }

                fn zero_value() -> Self {
                    0.0
                }

                // `-0.0` is not the zero value.
                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }
            }
        )*
    };
}

impl_int_leaf!(i8, i16, i32, i64, isize);
impl_uint_leaf!(u8, u16, u32, u64, usize);
impl_float_leaf!(f32, f64);
