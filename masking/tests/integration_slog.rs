//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `slog_masked_json()` produces correctly masked JSON values
//! - The `slog::Value` implementation works with slog's serialization API

#![cfg(feature = "slog")]

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use masking::{Maskable, Masker, slog::SlogMaskedExt};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

fn serialize_to_capture<V: slog::Value, S: slog::Serializer>(
    value: &V,
    key: &'static str,
    serializer: &mut S,
) {
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

#[derive(Clone, Debug, PartialEq, Maskable, Serialize)]
pub struct User {
    pub username: String,
    #[mask("fixed")]
    pub password: String,
    #[mask("zero")]
    pub recovery_codes: Vec<String>,
}

fn user() -> User {
    User {
        username: String::from("usagi"),
        password: String::from("super_secret_password"),
        recovery_codes: vec![String::from("1234")],
    }
}

#[test]
fn masks_simple_struct() {
    let masker = Masker::new();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&user().slog_masked_json(&masker), "user", &mut serializer);

    match serializer.get("user") {
        Some(CapturedValue::Serde(json)) => {
            assert_eq!(
                json,
                json!({"username": "usagi", "password": "********", "recovery_codes": []})
            );
        }
        other => panic!("expected Serde value for 'user', got {other:?}"),
    }
}

#[test]
fn respects_field_defaults() {
    let masker = Masker::builder().field_default("username", "filled").build();
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&user().slog_masked_json(&masker), "user", &mut serializer);

    let Some(CapturedValue::Serde(json)) = serializer.get("user") else {
        panic!("expected Serde value for 'user'");
    };
    assert_eq!(json["username"], "*****");
}

#[test]
fn failure_is_logged_as_placeholder() {
    #[derive(Clone, Debug, PartialEq, Maskable, Serialize)]
    pub struct Broken {
        #[mask("filledX")]
        pub secret: String,
    }

    let masker = Masker::new();
    let value = Broken {
        secret: String::from("leak"),
    };
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&value.slog_masked_json(&masker), "value", &mut serializer);

    let Some(CapturedValue::Serde(JsonValue::String(text))) = serializer.get("value") else {
        panic!("expected placeholder string for 'value'");
    };
    assert!(text.starts_with("Failed to mask value:"));
    assert!(!text.contains("leak"));
}
