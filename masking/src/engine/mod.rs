//! The traversal engine.
//!
//! - **`traits`**: `Maskable`, `Record` and the `Shape` each type follows
//! - **`masker`**: the configured engine and its entry points
//! - **`descriptor`**: per-record field descriptors and their cache
//! - **`dynamic`**: the dynamically typed `Dynamic` handle
//! - **`containers`**: `Maskable` implementations for std types
//! - **`error`**: `TransformError` and `MaskError`

mod containers;
mod descriptor;
mod dynamic;
mod error;
#[cfg(feature = "json")]
mod json;
mod masker;
mod traits;

pub use descriptor::{FieldDescriptor, TypeDescriptor};
pub use dynamic::{DynMaskable, Dynamic};
pub use error::{MaskError, TransformError};
#[cfg(feature = "json")]
pub use json::{MaskedJson, MaskedJsonExt};
pub use masker::{DEFAULT_ANNOTATION_KEY, Masker, MaskerBuilder, RecordFields};
pub use traits::{Category, FieldInfo, Maskable, Record, Shape};
