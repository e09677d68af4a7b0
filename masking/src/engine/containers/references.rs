//! Reference-like wrappers: `Option` is the nullable reference, `Box`, `Arc`
//! and `Rc` always point somewhere.
//!
//! The referent is walked with the wrapper's annotation and re-wrapped in a
//! fresh allocation; shared referents are never mutated in place.

use std::{rc::Rc, sync::Arc};

use crate::engine::{
    error::MaskError,
    masker::Masker,
    traits::{Maskable, Shape},
};

impl<T: Maskable> Maskable for Option<T> {
    const SHAPE: Shape = Shape::Reference;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        match self {
            None => Ok(None),
            Some(value) => masker.mask_annotated(value, annotation).map(Some),
        }
    }

    fn zero_value() -> Self {
        None
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

macro_rules! impl_pointer {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Maskable> Maskable for $ptr<T> {
                const SHAPE: Shape = Shape::Reference;

                fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
                    masker.mask_annotated(&**self, annotation).map($ptr::new)
                }

                fn zero_value() -> Self {
                    $ptr::new(T::zero_value())
                }

                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }
            }
        )*
    };
}

impl_pointer!(Box, Arc, Rc);
