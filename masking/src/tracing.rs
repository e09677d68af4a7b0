//! Adapters for emitting masked values through `tracing`.
//!
//! The logged text is always derived from the masked copy, never from the
//! original value. Masking failures are rendered as placeholder text instead
//! of being propagated into the logging call.
//!
//! # Example
//!
//! ```ignore
//! use masking::tracing::TracingMaskedExt;
//!
//! tracing::info!(user = %user.tracing_masked(&masker));
//! ```

use std::fmt;

use tracing::field::{DisplayValue, display};

#[cfg(feature = "json")]
use crate::MaskedJsonExt;
use crate::{Maskable, Masker};

/// Extension trait for logging masked values as display strings.
pub trait TracingMaskedExt: Maskable + fmt::Debug {
    /// Masks `self` and wraps its `Debug` rendering as a display value.
    ///
    /// If masking fails, the display value reads `Failed to mask value: ...`.
    fn tracing_masked(&self, masker: &Masker) -> DisplayValue<String> {
        let text = match masker.mask(self) {
            Ok(masked) => format!("{masked:?}"),
            Err(err) => format!("Failed to mask value: {err}"),
        };
        display(text)
    }

    /// Masks `self` and wraps its JSON rendering as a display value.
    #[cfg(feature = "json")]
    fn tracing_masked_json(&self, masker: &Masker) -> DisplayValue<String>
    where
        Self: serde::Serialize,
    {
        display(self.masked_json(masker).value().to_string())
    }
}

impl<T> TracingMaskedExt for T where T: Maskable + fmt::Debug {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn credentials() -> BTreeMap<String, String> {
        BTreeMap::from([
            (String::from("token"), String::from("secret")),
            (String::from("user"), String::from("usagi")),
        ])
    }

    #[test]
    fn renders_masked_debug() {
        let mut masker = Masker::new();
        masker.register_field_default("token", "filled");
        let rendered = format!("{:?}", credentials().tracing_masked(&masker));
        assert_eq!(rendered, r#"{"token": "******", "user": "usagi"}"#);
    }

    #[test]
    fn failure_is_rendered_as_placeholder() {
        let mut masker = Masker::new();
        masker.register_field_default("token", "filledX");
        let rendered = format!("{:?}", credentials().tracing_masked(&masker));
        assert!(rendered.starts_with("Failed to mask value:"));
        assert!(!rendered.contains("secret"));
    }
}
