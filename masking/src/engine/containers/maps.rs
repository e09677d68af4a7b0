//! Map containers (values only, keys copied).

use std::{
    any::Any,
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    sync::Arc,
};

use crate::engine::{
    error::MaskError,
    masker::Masker,
    traits::{Maskable, Shape},
};

/// Borrows `key` as text when it is one of the std string types.
pub(crate) fn text_key<K: Any>(key: &K) -> Option<&str> {
    let key: &dyn Any = key;
    key.downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| key.downcast_ref::<&'static str>().copied())
        .or_else(|| key.downcast_ref::<Box<str>>().map(|key| &**key))
        .or_else(|| key.downcast_ref::<Arc<str>>().map(|key| &**key))
        .or_else(|| key.downcast_ref::<Cow<'static, str>>().map(|key| &**key))
}

/// The annotation a map value is walked with.
///
/// The map's own annotation wins; otherwise a text key selects a field default.
pub(crate) fn value_annotation<'a, K: Any>(masker: &'a Masker, key: &K, inherited: &'a str) -> &'a str {
    if !inherited.is_empty() {
        return inherited;
    }
    text_key(key)
        .and_then(|name| masker.field_default(name))
        .unwrap_or_default()
}

impl<K, V, S> Maskable for HashMap<K, V, S>
where
    K: Clone + Eq + Hash + 'static,
    V: Maskable,
    S: BuildHasher + Clone + Default + 'static,
{
    const SHAPE: Shape = Shape::Map;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        let mut result = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (key, value) in self {
            let annotation = value_annotation(masker, key, annotation);
            result.insert(key.clone(), masker.mask_annotated(value, annotation)?);
        }
        Ok(result)
    }

    fn zero_value() -> Self {
        HashMap::default()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Maskable for BTreeMap<K, V>
where
    K: Clone + Ord + 'static,
    V: Maskable,
{
    const SHAPE: Shape = Shape::Map;

    fn mask_with(&self, masker: &Masker, annotation: &str) -> Result<Self, MaskError> {
        let mut result = BTreeMap::new();
        for (key, value) in self {
            let annotation = value_annotation(masker, key, annotation);
            result.insert(key.clone(), masker.mask_annotated(value, annotation)?);
        }
        Ok(result)
    }

    fn zero_value() -> Self {
        BTreeMap::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_key_recognizes_std_strings() {
        assert_eq!(text_key(&String::from("ID")), Some("ID"));
        assert_eq!(text_key(&"ID"), Some("ID"));
        assert_eq!(text_key(&Box::<str>::from("ID")), Some("ID"));
        assert_eq!(text_key(&Arc::<str>::from("ID")), Some("ID"));
        assert_eq!(text_key(&Cow::<'static, str>::Borrowed("ID")), Some("ID"));
        assert_eq!(text_key(&42_u32), None);
    }

    #[test]
    fn inherited_annotation_wins_over_key_default() {
        let mut masker = Masker::new();
        masker.register_field_default("ID", "zero");
        let key = String::from("ID");
        assert_eq!(value_annotation(&masker, &key, "filled"), "filled");
        assert_eq!(value_annotation(&masker, &key, ""), "zero");
        assert_eq!(value_annotation(&masker, &String::from("Name"), ""), "");
        assert_eq!(value_annotation(&masker, &7_i32, ""), "");
    }
}
