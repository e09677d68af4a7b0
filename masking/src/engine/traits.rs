//! Core traits for masking traversal.
//!
//! - [`Maskable`]: implemented by every type the engine can walk
//! - [`Record`]: implemented by `#[derive(Maskable)]` structs, exposing their field table
//! - [`Shape`] / [`Category`]: the traversal rule a type follows

use super::{error::MaskError, masker::Masker};

// =============================================================================
// Shape - The traversal rule a type follows
// =============================================================================

/// Leaf category used to pick a transform table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Text (`String`, `Box<str>`, ...).
    Text,
    /// Signed integers, masked as `i64`.
    Int,
    /// Unsigned integers, masked as `u64`.
    Uint,
    /// Floating point, masked as `f64`.
    Float,
}

/// How the engine walks a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `Option<T>`, `Box<T>`, `Arc<T>`, `Rc<T>`: recurse into the referent.
    Reference,
    /// A derived struct: recurse into each exported field.
    Record,
    /// Vectors, slices, arrays and sets: recurse into each element.
    Sequence,
    /// Maps: recurse into each value; text keys can select a field default.
    Map,
    /// [`Dynamic`](crate::Dynamic): recurse into whatever the handle holds.
    Dynamic,
    /// A primitive dispatched to a category table.
    Leaf(Category),
    /// Copied verbatim (only any-type transforms apply).
    Opaque,
}

// =============================================================================
// Maskable - Traversal contract
// =============================================================================

/// A value the engine can walk and rebuild.
///
/// Implementations are provided for std leaves and containers; structs get
/// one from `#[derive(Maskable)]`. Implementations should not be called
/// directly: go through [`Masker::mask`] so any-type transforms apply at
/// every level.
pub trait Maskable: Sized + 'static {
    /// The traversal rule for this type.
    const SHAPE: Shape;

    /// Rebuilds `self` under `annotation`.
    ///
    /// `annotation` is the one inherited from the enclosing field or map key;
    /// composite shapes pass it down unchanged.
    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError>;

    /// The zero value: `None`, empty, `0`, `""` or a struct of zeros.
    fn zero_value() -> Self;

    /// Whether `self` equals [`Maskable::zero_value`].
    fn is_zero(&self) -> bool;
}

// =============================================================================
// Record - Field metadata for derived structs
// =============================================================================

/// Static metadata for one struct field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name, or its index for tuple structs.
    pub name: &'static str,
    /// Whether the field is `pub`. Other fields are never read.
    pub exported: bool,
    /// Declared shape; `None` for fields that are not read.
    pub shape: Option<Shape>,
    /// `(key, annotation)` pairs from the field's `#[mask(...)]` attributes.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldInfo {
    /// The annotation recorded under `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag_key, _)| *tag_key == key)
            .map(|(_, annotation)| *annotation)
    }
}

/// A struct whose exported fields the engine walks one by one.
pub trait Record: Maskable {
    /// Fields in declaration order.
    fn fields() -> Vec<FieldInfo>;
}
