//! `serde_json::Value` support.
//!
//! A JSON value is walked as a dynamic tree: objects behave like text-keyed
//! maps (so field defaults apply to their keys), arrays like sequences, and
//! strings and numbers like leaves. Numbers are dispatched as signed integers
//! when they fit, then unsigned, then float. A float transform that returns
//! a non-finite number yields `null`.
//!
//! [`MaskedJsonExt`] turns any serializable `Maskable` into the JSON of its
//! masked form, for logging sinks that take structured values.

use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};

use super::{
    containers::value_annotation,
    error::MaskError,
    masker::Masker,
    traits::{Maskable, Shape},
};

impl Maskable for JsonValue {
    const SHAPE: Shape = Shape::Dynamic;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        match self {
            JsonValue::Null | JsonValue::Bool(_) => Ok(self.clone()),
            JsonValue::String(text) => masker.dispatch_text(annotation, text).map(JsonValue::String),
            JsonValue::Number(number) => mask_number(masker, annotation, number),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| masker.mask_annotated(item, annotation))
                .collect::<Result<Vec<_>, _>>()
                .map(JsonValue::Array),
            JsonValue::Object(fields) => {
                let mut result = Map::new();
                for (key, value) in fields {
                    let annotation = value_annotation(masker, key, annotation);
                    result.insert(key.clone(), masker.mask_annotated(value, annotation)?);
                }
                Ok(JsonValue::Object(result))
            }
        }
    }

    fn zero_value() -> Self {
        JsonValue::Null
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

fn mask_number(masker: &Masker, annotation: &str, number: &Number) -> Result<JsonValue, MaskError> {
    if let Some(value) = number.as_i64() {
        return masker
            .dispatch_int(annotation, value)
            .map(|masked| JsonValue::Number(masked.into()));
    }
    if let Some(value) = number.as_u64() {
        return masker
            .dispatch_uint(annotation, value)
            .map(|masked| JsonValue::Number(masked.into()));
    }
    let value = number.as_f64().unwrap_or_default();
    let masked = masker.dispatch_float(annotation, value)?;
    Ok(Number::from_f64(masked).map_or(JsonValue::Null, JsonValue::Number))
}

// =============================================================================
// MaskedJson - Masked value rendered as JSON
// =============================================================================

/// The JSON form of a masked value.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskedJson(JsonValue);

impl MaskedJson {
    /// The rendered JSON.
    pub fn value(&self) -> &JsonValue {
        &self.0
    }

    /// Consumes the wrapper.
    pub fn into_value(self) -> JsonValue {
        self.0
    }
}

/// Extension trait rendering the masked form of a value as JSON.
pub trait MaskedJsonExt: Maskable + Serialize {
    /// Masks `self` with `masker` and serializes the result.
    ///
    /// Never fails: a masking or serialization error is rendered as a JSON
    /// string describing it, so the unmasked value is never emitted.
    fn masked_json(&self, masker: &Masker) -> MaskedJson {
        let json = match masker.mask(self) {
            Ok(masked) => serde_json::to_value(masked).unwrap_or_else(|err| {
                JsonValue::String(format!("Failed to serialize masked value: {err}"))
            }),
            Err(err) => JsonValue::String(format!("Failed to mask value: {err}")),
        };
        MaskedJson(json)
    }
}

impl<T> MaskedJsonExt for T where T: Maskable + Serialize {}
