//! Transform functions and the tables that dispatch to them.
//!
//! - **`annotation`**: splits `<mask type><argument>` annotations
//! - **`registry`**: per-category transform tables and the context handed to transforms
//! - **`builtins`**: `filled`, `fixed`, `hash`, `random` and `zero`

mod annotation;
pub mod builtins;
mod registry;

pub use annotation::{Annotation, parse_annotation};
pub(crate) use registry::TransformTable;
pub use registry::{
    AnyTransform, AnyValue, FloatTransform, IntTransform, TextTransform, TransformContext,
    UintTransform,
};
