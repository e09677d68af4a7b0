//! Integration tests for `serde_json::Value` support.
//!
//! A JSON value is walked as a dynamic tree: objects like text-keyed maps,
//! arrays like sequences, strings and numbers like leaves.

#![cfg(feature = "json")]

use masking::{Maskable, MaskedJsonExt, Masker};
use serde::Serialize;
use serde_json::{Value, json};

mod value_traversal {
    use super::*;

    #[test]
    fn annotation_flows_into_every_leaf() {
        let masker = Masker::new();
        let data = json!({"name": "Usagi", "tags": ["a", "bc"], "active": true, "none": null});
        let masked = masker.mask_annotated(&data, "filled").unwrap();
        assert_eq!(
            masked,
            json!({"name": "*****", "tags": ["*", "**"], "active": true, "none": null})
        );
    }

    #[test]
    fn object_keys_select_field_defaults() {
        let mut masker = Masker::new();
        masker.register_field_default("password", "fixed");
        masker.register_field_default("email", "hash");
        let data = json!({
            "user": {"email": "abc", "password": "hunter2", "name": "Usagi"},
            "password": "top"
        });
        let masked = masker.mask(&data).unwrap();
        assert_eq!(masked["user"]["email"], "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(masked["user"]["password"], "********");
        assert_eq!(masked["user"]["name"], "Usagi");
        assert_eq!(masked["password"], "********");
    }

    #[test]
    fn numbers_use_numeric_transforms() {
        let masker = Masker::with_seed(5);
        let data = json!({"int": -40, "big": u64::MAX, "float": 2.5});
        let masked = masker.mask_annotated(&data, "random10").unwrap();
        let int = masked["int"].as_i64().unwrap();
        assert!((0..10).contains(&int));
        assert!(masked["big"].as_u64().unwrap() < 10);
        assert!(masked["float"].as_f64().unwrap() < 10.0);
    }

    #[test]
    fn zero_turns_values_into_null() {
        let masker = Masker::new();
        let data = json!({"secret": {"nested": [1, 2, 3]}});
        assert_eq!(masker.mask_annotated(&data, "zero").unwrap(), Value::Null);
    }

    #[test]
    fn non_finite_float_results_become_null() {
        let masker = Masker::builder()
            .float_transform("inf", |_: &masking::TransformContext<'_>, _: &str, _: f64| {
                Ok(f64::INFINITY)
            })
            .build();
        let masked = masker.mask_annotated(&json!([1.5]), "inf").unwrap();
        assert_eq!(masked, json!([null]));
    }
}

mod record_fields {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Maskable, Serialize)]
    pub struct Event {
        pub kind: String,
        #[mask("filled")]
        pub payload: Value,
    }

    #[test]
    fn json_field_is_walked_with_its_annotation() {
        let masker = Masker::new();
        let event = Event {
            kind: String::from("login"),
            payload: json!({"user": "Usagi", "attempts": 3}),
        };
        let masked = masker.mask(&event).unwrap();
        assert_eq!(masked.kind, "login");
        assert_eq!(masked.payload, json!({"user": "*****", "attempts": 3}));
    }

    #[test]
    fn masked_json_renders_masked_record() {
        let masker = Masker::new();
        let event = Event {
            kind: String::from("login"),
            payload: json!("secret"),
        };
        let rendered = event.masked_json(&masker).into_value();
        assert_eq!(rendered, json!({"kind": "login", "payload": "******"}));
    }

    #[derive(Clone, Debug, PartialEq, Maskable, Serialize)]
    pub struct Faulty {
        #[mask("random0")]
        pub count: u32,
    }

    #[test]
    fn masked_json_reports_failures_without_leaking() {
        let masker = Masker::new();
        let rendered = Faulty { count: 7 }.masked_json(&masker).into_value();
        let text = rendered.as_str().unwrap();
        assert!(text.starts_with("Failed to mask value:"));
        assert!(!text.contains('7'));
    }
}
