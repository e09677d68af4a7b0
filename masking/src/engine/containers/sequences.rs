//! Homogeneous sequences: every element is walked with the annotation of the
//! field holding the sequence.

use std::collections::VecDeque;

use crate::engine::{
    error::MaskError,
    masker::Masker,
    traits::{Maskable, Shape},
};

fn mask_elements<'a, T, I>(masker: &Masker, items: I, annotation: &str) -> Result<Vec<T>, MaskError>
where
    T: Maskable,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(|item| masker.mask_annotated(item, annotation))
        .collect()
}

impl<T: Maskable> Maskable for Vec<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        mask_elements(masker, self, annotation)
    }

    fn zero_value() -> Self {
        Vec::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Maskable> Maskable for VecDeque<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        mask_elements(masker, self, annotation).map(VecDeque::from)
    }

    fn zero_value() -> Self {
        VecDeque::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Maskable> Maskable for Box<[T]> {
    const SHAPE: Shape = Shape::Sequence;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        mask_elements(masker, self.iter(), annotation).map(Vec::into_boxed_slice)
    }

    fn zero_value() -> Self {
        Box::default()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Maskable, const N: usize> Maskable for [T; N] {
    const SHAPE: Shape = Shape::Sequence;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        let mut masked = mask_elements(masker, self, annotation)?.into_iter();
        // `masked` holds exactly N elements.
        Ok(std::array::from_fn(|_| {
            masked.next().unwrap_or_else(T::zero_value)
        }))
    }

    fn zero_value() -> Self {
        std::array::from_fn(|_| T::zero_value())
    }

    fn is_zero(&self) -> bool {
        self.iter().all(T::is_zero)
    }
}
