//! Annotation-driven masking of nested values.
//!
//! Given any value built from std types and `#[derive(Maskable)]` structs,
//! [`Masker::mask`] returns a structurally identical copy in which annotated
//! leaves have been replaced: filled with a mask character, hashed,
//! randomized or zeroed. Unannotated values are copied untouched.
//!
//! This crate separates:
//! - **Transforms**: named functions per leaf category (text, signed,
//!   unsigned, float) plus any-type transforms, selected by annotation prefix.
//! - **Traversal**: the `Maskable` shape rules for references, records,
//!   sequences, maps, dynamic handles and leaves.
//!
//! What this crate does:
//! - defines the `Masker` engine, its transform tables and field defaults
//! - caches per-type field descriptors
//! - provides logging integrations (`tracing`, and `slog` behind a feature flag)
//!
//! What it does not do:
//! - perform I/O or define a wire format
//! - detect reference cycles (owned Rust values cannot form one)
//!
//! The `Maskable` derive macro lives in `masking-derive` and is re-exported
//! from this crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use masking_derive::Maskable;

#[allow(unused_extern_crates)]
extern crate self as masking;

// Module declarations
mod engine;
#[cfg(feature = "slog")]
pub mod slog;
pub mod tracing;
pub mod transform;

// Re-exports from engine module
#[doc(hidden)]
pub use engine::RecordFields;
pub use engine::{
    Category, DEFAULT_ANNOTATION_KEY, DynMaskable, Dynamic, FieldDescriptor, FieldInfo,
    MaskError, Maskable, Masker, MaskerBuilder, Record, Shape, TransformError, TypeDescriptor,
};
#[cfg(feature = "json")]
pub use engine::{MaskedJson, MaskedJsonExt};
#[cfg(feature = "slog")]
pub use slog::SlogMaskedExt;
// Re-exports from transform module
pub use transform::{AnyValue, TransformContext, builtins::DEFAULT_MASK_CHAR};
