//! Adapters for emitting masked values through `slog`.
//!
//! [`MaskedJson`] implements `slog::Value` by handing its JSON to `slog`'s
//! nested-value support, so structured drains see the masked tree.
//! Failures are represented as placeholder strings rather than propagated
//! as errors.

use serde::Serialize;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

pub use crate::MaskedJson;
use crate::{Maskable, MaskedJsonExt, Masker};

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value().clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Extension trait for slog logging of masked values as JSON.
///
/// ## Example
/// ```ignore
/// use masking::slog::SlogMaskedExt;
///
/// info!(logger, "event"; "user" => user.slog_masked_json(&masker));
/// ```
pub trait SlogMaskedExt: Maskable + Serialize {
    /// Masks `self` and returns a `slog::Value` that serializes as structured JSON.
    fn slog_masked_json(&self, masker: &Masker) -> MaskedJson {
        self.masked_json(masker)
    }
}

impl<T> SlogMaskedExt for T where T: Maskable + Serialize {}
