//! Dynamically typed values.
//!
//! [`Dynamic`] holds any `Maskable` value behind a trait object, or nothing.
//! Masking a populated handle walks the concrete value it holds; masking an
//! empty one yields an empty one.

use std::{any::Any, fmt};

use super::{
    error::MaskError,
    masker::Masker,
    traits::{Maskable, Shape},
};

/// Object-safe view of a `Maskable` value.
///
/// Blanket-implemented for every `Maskable + Clone + Debug + PartialEq + Send + Sync`.
pub trait DynMaskable: Any + Send + Sync + fmt::Debug {
    /// Masks the held value under `annotation`.
    fn mask_dyn(
        &self,
        masker: &Masker,
        annotation: &str,
    ) -> Result<Box<dyn DynMaskable>, MaskError>;

    /// Upcasts for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Clones into a new box.
    fn clone_dyn(&self) -> Box<dyn DynMaskable>;

    /// Compares with another dynamic value of possibly different type.
    fn eq_dyn(&self, other: &dyn DynMaskable) -> bool;
}

impl<T> DynMaskable for T
where
    T: Maskable + Clone + fmt::Debug + PartialEq + Send + Sync,
{
    fn mask_dyn(
        &self,
        masker: &Masker,
        annotation: &str,
    ) -> Result<Box<dyn DynMaskable>, MaskError> {
        let masked = masker.mask_annotated(self, annotation)?;
        Ok(Box::new(masked))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_dyn(&self) -> Box<dyn DynMaskable> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn DynMaskable) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

// =============================================================================
// Dynamic
// =============================================================================

/// A nullable, dynamically typed value.
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn DynMaskable>>);

impl Dynamic {
    /// Wraps `value`.
    pub fn new<T: DynMaskable>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// The empty handle.
    pub fn nil() -> Self {
        Self(None)
    }

    /// Whether the handle holds nothing.
    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    /// Borrows the held value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref()?.as_any().downcast_ref::<T>()
    }

    /// Borrows the held value as a trait object.
    pub fn get(&self) -> Option<&dyn DynMaskable> {
        self.0.as_deref()
    }
}

impl Clone for Dynamic {
    fn clone(&self) -> Self {
        Self(self.0.as_deref().map(DynMaskable::clone_dyn))
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self.get(), other.get()) {
            (None, None) => true,
            (Some(left), Some(right)) => left.eq_dyn(right),
            _ => false,
        }
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Dynamic").field(&value).finish(),
            None => f.write_str("Dynamic(nil)"),
        }
    }
}

impl Maskable for Dynamic {
    const SHAPE: Shape = Shape::Dynamic;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        match self.get() {
            None => Ok(Self::nil()),
            Some(value) => value.mask_dyn(masker, annotation).map(|masked| Self(Some(masked))),
        }
    }

    fn zero_value() -> Self {
        Self::nil()
    }

    fn is_zero(&self) -> bool {
        self.is_nil()
    }
}
