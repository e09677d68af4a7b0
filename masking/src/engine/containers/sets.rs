//! Set containers. Masked elements are re-collected, so equal results merge.

use std::{
    collections::{BTreeSet, HashSet},
    hash::{BuildHasher, Hash},
};

use crate::engine::{
    error::MaskError,
    masker::Masker,
    traits::{Maskable, Shape},
};

impl<T, S> Maskable for HashSet<T, S>
where
    T: Maskable + Eq + Hash,
    S: BuildHasher + Clone + Default + 'static,
{
    const SHAPE: Shape = Shape::Sequence;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        let mut result = HashSet::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for item in self {
            result.insert(masker.mask_annotated(item, annotation)?);
        }
        Ok(result)
    }

    fn zero_value() -> Self {
        HashSet::default()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Maskable for BTreeSet<T>
where
    T: Maskable + Ord,
{
    const SHAPE: Shape = Shape::Sequence;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        self.iter()
            .map(|item| masker.mask_annotated(item, annotation))
            .collect()
    }

    fn zero_value() -> Self {
        BTreeSet::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}
