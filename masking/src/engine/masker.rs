//! The masking engine.
//!
//! [`Masker`] owns everything a traversal needs:
//!
//! - one transform table per leaf category plus an any-type table
//! - the field-default table consulted when a field or text key has no annotation
//! - the mask character, annotation key and caching switch
//! - the descriptor cache and the random source used by `random`
//!
//! Configuration goes through `&mut self`, so it cannot race with a traversal
//! in progress. Traversals take `&self` and may run concurrently.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};

use super::{
    descriptor::{DescriptorCache, TypeDescriptor},
    error::{MaskError, TransformError},
    traits::{Maskable, Record},
};
use crate::transform::{
    AnyTransform, AnyValue, FloatTransform, IntTransform, TextTransform, TransformContext,
    TransformTable, UintTransform,
    builtins::{self, DEFAULT_MASK_CHAR},
};

/// Annotation key used when none is configured.
pub const DEFAULT_ANNOTATION_KEY: &str = "mask";

// =============================================================================
// Masker
// =============================================================================

/// A configured masking engine.
///
/// ```ignore
/// use masking::{Masker, Maskable};
///
/// #[derive(Clone, Debug, PartialEq, Maskable)]
/// pub struct User {
///     pub id: String,
///     #[mask("filled")]
///     pub name: String,
///     #[mask("random100")]
///     pub age: i32,
/// }
///
/// let masker = Masker::new();
/// let masked = masker.mask(&user)?;
/// ```
pub struct Masker {
    text: TransformTable<TextTransform>,
    int: TransformTable<IntTransform>,
    uint: TransformTable<UintTransform>,
    float: TransformTable<FloatTransform>,
    any: TransformTable<AnyTransform>,
    field_defaults: HashMap<String, String>,
    mask_char: String,
    annotation_key: String,
    caching: bool,
    cache: DescriptorCache,
    rng: Mutex<StdRng>,
}

impl Masker {
    /// An engine with the built-in transforms registered and an entropy-seeded random source.
    pub fn new() -> Self {
        let mut masker = Self::empty();
        masker.register_builtins();
        masker
    }

    /// Like [`Masker::new`], with a fixed seed so `random` transforms are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        let mut masker = Self::new();
        masker.rng = Mutex::new(StdRng::seed_from_u64(seed));
        masker
    }

    /// An engine with no transforms registered at all.
    pub fn empty() -> Self {
        Self {
            text: TransformTable::new(),
            int: TransformTable::new(),
            uint: TransformTable::new(),
            float: TransformTable::new(),
            any: TransformTable::new(),
            field_defaults: HashMap::new(),
            mask_char: DEFAULT_MASK_CHAR.to_owned(),
            annotation_key: DEFAULT_ANNOTATION_KEY.to_owned(),
            caching: true,
            cache: DescriptorCache::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Starts a [`MaskerBuilder`] seeded with the built-in transforms.
    pub fn builder() -> MaskerBuilder {
        MaskerBuilder {
            masker: Self::new(),
        }
    }

    fn register_builtins(&mut self) {
        self.register_text_transform(builtins::MASK_TYPE_FILLED, builtins::filled);
        self.register_text_transform(builtins::MASK_TYPE_FIXED, builtins::fixed);
        self.register_text_transform(builtins::MASK_TYPE_HASH, builtins::hash);
        self.register_int_transform(builtins::MASK_TYPE_RANDOM, builtins::random_int);
        self.register_uint_transform(builtins::MASK_TYPE_RANDOM, builtins::random_uint);
        self.register_float_transform(builtins::MASK_TYPE_RANDOM, builtins::random_float);
        self.register_any_transform(builtins::MASK_TYPE_ZERO, builtins::zero);
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Returns a masked copy of `value`.
    ///
    /// The top level carries no annotation, so only field annotations, field
    /// defaults and map-key defaults select transforms. `None` comes back as
    /// `None`. The first failing transform aborts the walk.
    pub fn mask<T: Maskable>(&self, value: &T) -> Result<T, MaskError> {
        self.mask_annotated(value, "")
    }

    /// Returns a masked copy of `value` as if it were a field annotated with `annotation`.
    ///
    /// Any-type transforms are tried first, then the value's own shape rule.
    pub fn mask_annotated<T: Maskable>(&self, value: &T, annotation: &str) -> Result<T, MaskError> {
        if let Some(masked) = self.apply_any(value, annotation)? {
            return Ok(masked);
        }
        value.mask_with(self, annotation)
    }

    /// Masks a single text value.
    pub fn mask_text(&self, annotation: &str, value: &str) -> Result<String, MaskError> {
        self.mask_annotated(&value.to_owned(), annotation)
    }

    /// Masks a single signed integer.
    pub fn mask_int(&self, annotation: &str, value: i64) -> Result<i64, MaskError> {
        self.mask_annotated(&value, annotation)
    }

    /// Masks a single unsigned integer.
    pub fn mask_uint(&self, annotation: &str, value: u64) -> Result<u64, MaskError> {
        self.mask_annotated(&value, annotation)
    }

    /// Masks a single float.
    pub fn mask_float(&self, annotation: &str, value: f64) -> Result<f64, MaskError> {
        self.mask_annotated(&value, annotation)
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Registers (or replaces) a text transform.
    pub fn register_text_transform<F>(&mut self, mask_type: impl Into<String>, transform: F) -> &mut Self
    where
        F: Fn(&TransformContext<'_>, &str, &str) -> Result<String, TransformError>
            + Send
            + Sync
            + 'static,
    {
        let transform: Arc<TextTransform> = Arc::new(transform);
        register(&mut self.text, "text", mask_type.into(), transform);
        self
    }

    /// Registers (or replaces) a signed integer transform.
    pub fn register_int_transform<F>(&mut self, mask_type: impl Into<String>, transform: F) -> &mut Self
    where
        F: Fn(&TransformContext<'_>, &str, i64) -> Result<i64, TransformError>
            + Send
            + Sync
            + 'static,
    {
        let transform: Arc<IntTransform> = Arc::new(transform);
        register(&mut self.int, "int", mask_type.into(), transform);
        self
    }

    /// Registers (or replaces) an unsigned integer transform.
    pub fn register_uint_transform<F>(&mut self, mask_type: impl Into<String>, transform: F) -> &mut Self
    where
        F: Fn(&TransformContext<'_>, &str, u64) -> Result<u64, TransformError>
            + Send
            + Sync
            + 'static,
    {
        let transform: Arc<UintTransform> = Arc::new(transform);
        register(&mut self.uint, "uint", mask_type.into(), transform);
        self
    }

    /// Registers (or replaces) a float transform.
    pub fn register_float_transform<F>(&mut self, mask_type: impl Into<String>, transform: F) -> &mut Self
    where
        F: Fn(&TransformContext<'_>, &str, f64) -> Result<f64, TransformError>
            + Send
            + Sync
            + 'static,
    {
        let transform: Arc<FloatTransform> = Arc::new(transform);
        register(&mut self.float, "float", mask_type.into(), transform);
        self
    }

    /// Registers (or replaces) an any-type transform.
    ///
    /// Any-type transforms are consulted before the category tables, for
    /// every shape, including references, containers and records.
    pub fn register_any_transform<F>(&mut self, mask_type: impl Into<String>, transform: F) -> &mut Self
    where
        F: Fn(&TransformContext<'_>, &str, AnyValue<'_>) -> Result<Box<dyn Any>, TransformError>
            + Send
            + Sync
            + 'static,
    {
        let transform: Arc<AnyTransform> = Arc::new(transform);
        register(&mut self.any, "any", mask_type.into(), transform);
        self
    }

    /// Uses `annotation` for every field or text map key named `name` that has
    /// no annotation of its own.
    pub fn register_field_default(
        &mut self,
        name: impl Into<String>,
        annotation: impl Into<String>,
    ) -> &mut Self {
        self.field_defaults.insert(name.into(), annotation.into());
        self
    }

    /// The default annotation registered for `name`.
    pub fn field_default(&self, name: &str) -> Option<&str> {
        self.field_defaults.get(name).map(String::as_str)
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Sets the mask character used by `filled` and `fixed`. Empty is allowed.
    pub fn set_mask_char(&mut self, mask_char: impl Into<String>) -> &mut Self {
        self.mask_char = mask_char.into();
        self
    }

    /// The current mask character.
    pub fn mask_char(&self) -> &str {
        &self.mask_char
    }

    /// Selects which `#[mask(key = "...")]` entry is a field's annotation.
    ///
    /// The default is `"mask"`, which `#[mask("...")]` writes to. An empty key
    /// disables field annotations so only field defaults apply. Changing the
    /// key drops every cached descriptor.
    pub fn set_annotation_key(&mut self, key: impl Into<String>) -> &mut Self {
        let key = key.into();
        if key != self.annotation_key {
            self.annotation_key = key;
            self.cache.clear();
        }
        self
    }

    /// The current annotation key.
    pub fn annotation_key(&self) -> &str {
        &self.annotation_key
    }

    /// Turns descriptor caching on or off.
    ///
    /// With caching off, uncached types are described on every walk and not
    /// stored; descriptors cached earlier stay in use. Output is the same
    /// either way.
    pub fn set_caching_enabled(&mut self, enabled: bool) -> &mut Self {
        self.caching = enabled;
        self
    }

    /// Whether descriptor caching is on.
    pub fn caching_enabled(&self) -> bool {
        self.caching
    }

    /// Drops every cached descriptor.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of record types with a cached descriptor.
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    // -------------------------------------------------------------------------
    // Traversal internals
    // -------------------------------------------------------------------------

    /// The descriptor the engine uses for `T`, built on demand.
    pub fn describe<T: Record>(&self) -> Arc<TypeDescriptor> {
        let id = TypeId::of::<T>();
        let build = || TypeDescriptor::build::<T>(&self.annotation_key);
        if self.caching {
            self.cache.get_or_insert_with(id, build)
        } else {
            self.cache.get(id).unwrap_or_else(|| Arc::new(build()))
        }
    }

    /// Walks a record. Called by `#[derive(Maskable)]` code.
    ///
    /// A zero record comes back as zero without looking at its fields.
    #[doc(hidden)]
    pub fn mask_record<T, F>(&self, value: &T, build: F) -> Result<T, MaskError>
    where
        T: Record,
        F: FnOnce(&RecordFields<'_>) -> Result<T, MaskError>,
    {
        if value.is_zero() {
            return Ok(T::zero_value());
        }
        let fields = RecordFields {
            masker: self,
            descriptor: self.describe::<T>(),
        };
        build(&fields)
    }

    fn context(&self) -> TransformContext<'_> {
        TransformContext::new(&self.mask_char, &self.rng)
    }

    fn apply_any<T: Maskable>(&self, value: &T, annotation: &str) -> Result<Option<T>, MaskError> {
        let Some((parsed, transform)) = self.any.resolve(annotation) else {
            return Ok(None);
        };
        let view = AnyValue::new(value, type_name::<T>(), boxed_zero::<T>);
        let masked = transform(&self.context(), parsed.argument(), view)
            .map_err(|source| MaskError::transform(annotation, parsed.mask_type(), source))?;
        masked
            .downcast::<T>()
            .map(|masked| Some(*masked))
            .map_err(|_| MaskError::TypeMismatch {
                annotation: annotation.to_owned(),
                expected: type_name::<T>(),
            })
    }

    fn dispatch<F: ?Sized, O>(
        &self,
        table: &TransformTable<F>,
        annotation: &str,
        call: impl FnOnce(&F, &TransformContext<'_>, &str) -> Result<O, TransformError>,
    ) -> Result<Option<O>, MaskError> {
        let Some((parsed, transform)) = table.resolve(annotation) else {
            if !annotation.is_empty() {
                tracing::trace!(annotation, "no transform registered for annotation");
            }
            return Ok(None);
        };
        call(transform, &self.context(), parsed.argument())
            .map(Some)
            .map_err(|source| MaskError::transform(annotation, parsed.mask_type(), source))
    }

    pub(crate) fn dispatch_text(&self, annotation: &str, value: &str) -> Result<String, MaskError> {
        let masked = self.dispatch(&self.text, annotation, |f, ctx, arg| f(ctx, arg, value))?;
        Ok(masked.unwrap_or_else(|| value.to_owned()))
    }

    pub(crate) fn dispatch_int(&self, annotation: &str, value: i64) -> Result<i64, MaskError> {
        let masked = self.dispatch(&self.int, annotation, |f, ctx, arg| f(ctx, arg, value))?;
        Ok(masked.unwrap_or(value))
    }

    pub(crate) fn dispatch_uint(&self, annotation: &str, value: u64) -> Result<u64, MaskError> {
        let masked = self.dispatch(&self.uint, annotation, |f, ctx, arg| f(ctx, arg, value))?;
        Ok(masked.unwrap_or(value))
    }

    pub(crate) fn dispatch_float(&self, annotation: &str, value: f64) -> Result<f64, MaskError> {
        let masked = self.dispatch(&self.float, annotation, |f, ctx, arg| f(ctx, arg, value))?;
        Ok(masked.unwrap_or(value))
    }
}

fn boxed_zero<T: Maskable>() -> Box<dyn Any> {
    Box::new(T::zero_value())
}

fn register<F: ?Sized>(
    table: &mut TransformTable<F>,
    category: &'static str,
    mask_type: String,
    transform: Arc<F>,
) {
    for existing in table.overlapping(&mask_type) {
        tracing::warn!(
            category,
            mask_type = mask_type.as_str(),
            existing,
            "mask type overlaps a registered one; the longest match wins"
        );
    }
    if table.insert(mask_type.clone(), transform) {
        tracing::debug!(category, mask_type = mask_type.as_str(), "replaced transform");
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Masker {
    fn clone(&self) -> Self {
        Self {
            text: self.text.clone(),
            int: self.int.clone(),
            uint: self.uint.clone(),
            float: self.float.clone(),
            any: self.any.clone(),
            field_defaults: self.field_defaults.clone(),
            mask_char: self.mask_char.clone(),
            annotation_key: self.annotation_key.clone(),
            caching: self.caching,
            cache: self.cache.clone(),
            rng: Mutex::new(self.rng.lock().clone()),
        }
    }
}

impl fmt::Debug for Masker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Masker")
            .field("text", &self.text)
            .field("int", &self.int)
            .field("uint", &self.uint)
            .field("float", &self.float)
            .field("any", &self.any)
            .field("field_defaults", &self.field_defaults)
            .field("mask_char", &self.mask_char)
            .field("annotation_key", &self.annotation_key)
            .field("caching", &self.caching)
            .field("cached_types", &self.cache.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// RecordFields - Field access handed to derived code
// =============================================================================

/// Resolves per-field annotations while a record is being rebuilt.
#[doc(hidden)]
pub struct RecordFields<'a> {
    masker: &'a Masker,
    descriptor: Arc<TypeDescriptor>,
}

impl RecordFields<'_> {
    /// Walks field `index` with its effective annotation.
    pub fn walk<T: Maskable>(&self, index: usize, value: &T) -> Result<T, MaskError> {
        self.masker.mask_annotated(value, self.annotation(index))
    }

    /// The field's own annotation, else the field default for its name, else `""`.
    pub fn annotation(&self, index: usize) -> &str {
        let Some(field) = self.descriptor.field(index) else {
            return "";
        };
        if !field.annotation().is_empty() {
            return field.annotation();
        }
        self.masker.field_default(field.name()).unwrap_or_default()
    }
}

// =============================================================================
// MaskerBuilder
// =============================================================================

/// Chained configuration for a [`Masker`].
///
/// Starts from [`Masker::new`]: built-ins registered, `"*"` mask character,
/// `"mask"` annotation key, caching on.
#[derive(Debug)]
#[must_use]
pub struct MaskerBuilder {
    masker: Masker,
}

impl MaskerBuilder {
    /// Seeds the random source.
    pub fn seed(mut self, seed: u64) -> Self {
        self.masker.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// See [`Masker::set_mask_char`].
    pub fn mask_char(mut self, mask_char: impl Into<String>) -> Self {
        self.masker.set_mask_char(mask_char);
        self
    }

    /// See [`Masker::set_annotation_key`].
    pub fn annotation_key(mut self, key: impl Into<String>) -> Self {
        self.masker.set_annotation_key(key);
        self
    }

    /// See [`Masker::set_caching_enabled`].
    pub fn caching(mut self, enabled: bool) -> Self {
        self.masker.set_caching_enabled(enabled);
        self
    }

    /// See [`Masker::register_field_default`].
    pub fn field_default(mut self, name: impl Into<String>, annotation: impl Into<String>) -> Self {
        self.masker.register_field_default(name, annotation);
        self
    }

    /// See [`Masker::register_text_transform`].
    pub fn text_transform<F>(mut self, mask_type: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&TransformContext<'_>, &str, &str) -> Result<String, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.masker.register_text_transform(mask_type, transform);
        self
    }

    /// See [`Masker::register_int_transform`].
    pub fn int_transform<F>(mut self, mask_type: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&TransformContext<'_>, &str, i64) -> Result<i64, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.masker.register_int_transform(mask_type, transform);
        self
    }

    /// See [`Masker::register_uint_transform`].
    pub fn uint_transform<F>(mut self, mask_type: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&TransformContext<'_>, &str, u64) -> Result<u64, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.masker.register_uint_transform(mask_type, transform);
        self
    }

    /// See [`Masker::register_float_transform`].
    pub fn float_transform<F>(mut self, mask_type: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&TransformContext<'_>, &str, f64) -> Result<f64, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.masker.register_float_transform(mask_type, transform);
        self
    }

    /// See [`Masker::register_any_transform`].
    pub fn any_transform<F>(mut self, mask_type: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&TransformContext<'_>, &str, AnyValue<'_>) -> Result<Box<dyn Any>, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.masker.register_any_transform(mask_type, transform);
        self
    }

    /// Finishes configuration.
    pub fn build(self) -> Masker {
        self.masker
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::{Maskable, transform::AnyValue};

    #[derive(Clone, Debug, PartialEq, Maskable)]
    pub struct Account {
        #[mask("filled")]
        pub name: String,
        #[mask(log = "hash")]
        pub email: String,
        pub token: String,
    }

    #[derive(Clone, Debug, PartialEq, Maskable)]
    pub struct Wrapper {
        pub account: Account,
    }

    fn account() -> Account {
        Account {
            name: String::from("Usagi"),
            email: String::from("usagi@example.com"),
            token: String::from("abc"),
        }
    }

    #[test]
    fn masker_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Masker>();
    }

    #[test]
    fn default_settings() {
        let masker = Masker::new();
        assert_eq!(masker.mask_char(), "*");
        assert_eq!(masker.annotation_key(), DEFAULT_ANNOTATION_KEY);
        assert!(masker.caching_enabled());
        assert_eq!(masker.cached_types(), 0);
        assert_eq!(masker.field_default("token"), None);
    }

    #[test]
    fn empty_masker_has_no_transforms() {
        let masker = Masker::empty();
        assert_eq!(masker.mask_text("filled", "abc").unwrap(), "abc");
        assert_eq!(masker.mask_int("zero", 5).unwrap(), 5);
    }

    #[test]
    fn single_value_entry_points() {
        let masker = Masker::with_seed(7);
        assert_eq!(masker.mask_text("filled", "ヤハッ！").unwrap(), "****");
        assert_eq!(masker.mask_text("fixed", "").unwrap(), "********");
        assert_eq!(masker.mask_text("", "plain").unwrap(), "plain");
        assert!((0..10).contains(&masker.mask_int("random10", 99).unwrap()));
        assert!(masker.mask_uint("random10", 99).unwrap() < 10);
        assert!(masker.mask_float("random1.2", 99.0).unwrap() < 1.0);
    }

    #[test]
    fn zero_reaches_single_value_entry_points() {
        let masker = Masker::new();
        assert_eq!(masker.mask_text("zero", "abc").unwrap(), "");
        assert_eq!(masker.mask_int("zero", 42).unwrap(), 0);
        assert_eq!(masker.mask_uint("zero", 42).unwrap(), 0);
        assert_eq!(masker.mask_float("zero", 4.2).unwrap(), 0.0);
    }

    #[test]
    fn mask_char_setting_is_used() {
        let mut masker = Masker::new();
        masker.set_mask_char("■");
        assert_eq!(masker.mask_text("filled", "abc").unwrap(), "■■■");
        masker.set_mask_char("");
        assert_eq!(masker.mask_text("fixed", "abc").unwrap(), "");
    }

    #[test]
    fn records_are_cached_once_per_type() {
        let masker = Masker::new();
        masker.mask(&account()).unwrap();
        masker.mask(&account()).unwrap();
        assert_eq!(masker.cached_types(), 1);
        masker.mask(&Wrapper { account: account() }).unwrap();
        assert_eq!(masker.cached_types(), 2);
        masker.clear_cache();
        assert_eq!(masker.cached_types(), 0);
    }

    #[test]
    fn caching_disabled_does_not_store() {
        let mut masker = Masker::new();
        masker.set_caching_enabled(false);
        let masked = masker.mask(&account()).unwrap();
        assert_eq!(masker.cached_types(), 0);
        assert_eq!(masked.name, "*****");
    }

    #[test]
    fn annotation_key_selects_tag_and_clears_cache() {
        let mut masker = Masker::new();
        let masked = masker.mask(&account()).unwrap();
        assert_eq!(masked.name, "*****");
        assert_eq!(masked.email, "usagi@example.com");
        assert_eq!(masker.cached_types(), 1);

        masker.set_annotation_key("log");
        assert_eq!(masker.cached_types(), 0);
        let masked = masker.mask(&account()).unwrap();
        assert_eq!(masked.name, "Usagi");
        assert_eq!(masked.email.len(), 40);
    }

    #[test]
    fn empty_annotation_key_leaves_only_field_defaults() {
        let mut masker = Masker::new();
        masker.set_annotation_key("");
        masker.register_field_default("token", "fixed");
        let masked = masker.mask(&account()).unwrap();
        assert_eq!(masked.name, "Usagi");
        assert_eq!(masked.token, "********");
    }

    #[test]
    fn own_annotation_wins_over_field_default() {
        let mut masker = Masker::new();
        masker.register_field_default("name", "fixed");
        masker.register_field_default("token", "hash");
        let masked = masker.mask(&account()).unwrap();
        assert_eq!(masked.name, "*****");
        assert_eq!(masked.token, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn re_registration_replaces_transform() {
        let mut masker = Masker::new();
        masker.register_text_transform("filled", |_: &TransformContext<'_>, _: &str, _: &str| {
            Ok(String::from("replaced"))
        });
        assert_eq!(masker.mask_text("filled", "abc").unwrap(), "replaced");
    }

    #[test]
    fn longest_prefix_wins() {
        let mut masker = Masker::new();
        masker.register_text_transform("fill", |_: &TransformContext<'_>, arg: &str, _: &str| {
            Ok(format!("fill:{arg}"))
        });
        assert_eq!(masker.mask_text("filled", "ab").unwrap(), "**");
        assert_eq!(masker.mask_text("fillx", "ab").unwrap(), "fill:x");
    }

    #[test]
    fn any_transform_sees_every_shape() {
        let mut masker = Masker::new();
        masker.register_any_transform(
            "named",
            |_: &TransformContext<'_>, _: &str, value: AnyValue<'_>| -> Result<Box<dyn Any>, TransformError> {
                if let Some(account) = value.downcast_ref::<Account>() {
                    let mut account = account.clone();
                    account.name = String::from("anonymous");
                    return Ok(Box::new(account));
                }
                Ok(value.zero())
            },
        );
        let masked = masker.mask_annotated(&account(), "named").unwrap();
        assert_eq!(masked.name, "anonymous");
        assert_eq!(masker.mask_annotated(&vec![1_i32, 2], "named").unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn any_transform_returning_wrong_type_is_mismatch() {
        let mut masker = Masker::new();
        masker.register_any_transform(
            "bogus",
            |_: &TransformContext<'_>, _: &str, _: AnyValue<'_>| -> Result<Box<dyn Any>, TransformError> {
                Ok(Box::new(1_u8))
            },
        );
        let err = masker.mask_text("bogus", "abc").unwrap_err();
        assert!(matches!(err, MaskError::TypeMismatch { ref annotation, .. } if annotation == "bogus"));
    }

    #[test]
    fn transform_errors_carry_annotation_and_mask_type() {
        let masker = Masker::new();
        let err = masker.mask_int("random-3", 1).unwrap_err();
        match err {
            MaskError::Transform {
                annotation,
                mask_type,
                ..
            } => {
                assert_eq!(annotation, "random-3");
                assert_eq!(mask_type, "random");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn oversized_arguments_are_errors_not_panics() {
        let masker = Masker::with_seed(1);
        let err = masker.mask_text("filled18446744073709551615", "abc").unwrap_err();
        assert!(matches!(
            err,
            MaskError::Transform {
                source: TransformError::InvalidArgument { .. },
                ..
            }
        ));
        let err = masker
            .mask_float("random18446744073709551615.300", 1.0)
            .unwrap_err();
        assert_eq!(err.annotation(), "random18446744073709551615.300");
    }

    #[test]
    fn seeded_maskers_agree() {
        let first = Masker::with_seed(1000);
        let second = Masker::builder().seed(1000).build();
        for _ in 0..20 {
            assert_eq!(
                first.mask_int("random1000", 0).unwrap(),
                second.mask_int("random1000", 0).unwrap()
            );
        }
    }

    #[test]
    fn builder_applies_every_setting() {
        let masker = Masker::builder()
            .mask_char("#")
            .annotation_key("log")
            .caching(false)
            .field_default("token", "filled2")
            .int_transform("const", |_: &TransformContext<'_>, _: &str, _: i64| Ok(7))
            .build();
        assert_eq!(masker.mask_char(), "#");
        assert_eq!(masker.annotation_key(), "log");
        assert!(!masker.caching_enabled());
        assert_eq!(masker.field_default("token"), Some("filled2"));
        assert_eq!(masker.mask_int("const", 1).unwrap(), 7);
        let masked = masker.mask(&account()).unwrap();
        assert_eq!(masked.token, "##");
    }

    #[test]
    fn describe_reads_declared_fields() {
        let masker = Masker::new();
        let descriptor = masker.describe::<Account>();
        let names: Vec<_> = descriptor.fields().iter().map(|field| field.name()).collect();
        assert_eq!(names, ["name", "email", "token"]);
        assert_eq!(descriptor.fields()[0].annotation(), "filled");
        assert_eq!(descriptor.fields()[1].annotation(), "");
        assert!(descriptor.fields().iter().all(|field| field.is_exported()));
    }

    #[test]
    fn clone_keeps_configuration() {
        let mut masker = Masker::new();
        masker.set_mask_char("x").register_field_default("token", "filled");
        let cloned = masker.clone();
        assert_eq!(cloned.mask_char(), "x");
        assert_eq!(cloned.mask(&account()).unwrap().token, "xxx");
    }
}
