//! Named transform tables.
//!
//! Each leaf category owns one [`TransformTable`], and a separate table holds
//! any-type transforms that apply before category dispatch. Entries keep their
//! registration order; registering an existing name replaces it in place.

use std::{any::Any, fmt, sync::Arc};

use parking_lot::Mutex;
use rand::rngs::StdRng;

use super::annotation::{Annotation, parse_annotation};
use crate::TransformError;

// =============================================================================
// Transform signatures
// =============================================================================

/// Transform applied to text leaves.
pub type TextTransform =
    dyn Fn(&TransformContext<'_>, &str, &str) -> Result<String, TransformError> + Send + Sync;

/// Transform applied to signed integer leaves, widened to `i64`.
pub type IntTransform =
    dyn Fn(&TransformContext<'_>, &str, i64) -> Result<i64, TransformError> + Send + Sync;

/// Transform applied to unsigned integer leaves, widened to `u64`.
pub type UintTransform =
    dyn Fn(&TransformContext<'_>, &str, u64) -> Result<u64, TransformError> + Send + Sync;

/// Transform applied to floating point leaves, widened to `f64`.
pub type FloatTransform =
    dyn Fn(&TransformContext<'_>, &str, f64) -> Result<f64, TransformError> + Send + Sync;

/// Transform applied to a value of any shape.
///
/// The returned box must hold a value of the same type as the input; the
/// engine reports [`MaskError::TypeMismatch`](crate::MaskError::TypeMismatch)
/// otherwise.
pub type AnyTransform = dyn Fn(&TransformContext<'_>, &str, AnyValue<'_>) -> Result<Box<dyn Any>, TransformError>
    + Send
    + Sync;

// =============================================================================
// TransformContext - Engine state handed to every transform
// =============================================================================

/// Per-engine state a transform may read while running.
pub struct TransformContext<'a> {
    mask_char: &'a str,
    rng: &'a Mutex<StdRng>,
}

impl<'a> TransformContext<'a> {
    pub(crate) fn new(mask_char: &'a str, rng: &'a Mutex<StdRng>) -> Self {
        Self { mask_char, rng }
    }

    /// The engine's mask character (may be empty).
    pub fn mask_char(&self) -> &'a str {
        self.mask_char
    }

    /// Runs `f` with exclusive access to the engine's random source.
    ///
    /// The lock is held only for the duration of `f`.
    pub fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        f(&mut self.rng.lock())
    }
}

impl fmt::Debug for TransformContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformContext")
            .field("mask_char", &self.mask_char)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// AnyValue - Type-erased view for any-type transforms
// =============================================================================

/// Type-erased view of the value an any-type transform is applied to.
#[derive(Clone, Copy)]
pub struct AnyValue<'a> {
    value: &'a dyn Any,
    type_name: &'static str,
    zero: fn() -> Box<dyn Any>,
}

impl<'a> AnyValue<'a> {
    pub(crate) fn new(value: &'a dyn Any, type_name: &'static str, zero: fn() -> Box<dyn Any>) -> Self {
        Self {
            value,
            type_name,
            zero,
        }
    }

    /// Borrows the value as `T` when that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns `true` when the value's concrete type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Name of the value's concrete type, as reported by `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// A freshly built zero value of the same type.
    pub fn zero(&self) -> Box<dyn Any> {
        (self.zero)()
    }
}

impl fmt::Debug for AnyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TransformTable - Ordered name -> transform map
// =============================================================================

/// Ordered table of named transforms for one category.
pub(crate) struct TransformTable<F: ?Sized> {
    entries: Vec<(String, Arc<F>)>,
}

impl<F: ?Sized> TransformTable<F> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces `mask_type`. Returns `true` when an entry was replaced.
    pub(crate) fn insert(&mut self, mask_type: String, transform: Arc<F>) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == mask_type) {
            entry.1 = transform;
            return true;
        }
        self.entries.push((mask_type, transform));
        false
    }

    /// Finds the transform matching the annotation's prefix.
    pub(crate) fn resolve<'a>(&self, annotation: &'a str) -> Option<(Annotation<'a>, &Arc<F>)> {
        let parsed = parse_annotation(annotation, self.names())?;
        self.entries
            .iter()
            .find(|(name, _)| name == parsed.mask_type())
            .map(|(_, transform)| (parsed, transform))
    }

    /// Registered names whose prefix relation with `mask_type` makes them overlap.
    pub(crate) fn overlapping<'s>(&'s self, mask_type: &'s str) -> impl Iterator<Item = &'s str> {
        self.names().filter(move |name| {
            *name != mask_type && (name.starts_with(mask_type) || mask_type.starts_with(name))
        })
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<F: ?Sized> Clone for TransformTable<F> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<F: ?Sized> fmt::Debug for TransformTable<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
