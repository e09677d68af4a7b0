//! Per-type field descriptors and their cache.
//!
//! A [`TypeDescriptor`] is built the first time a record type is walked and
//! then published into a copy-on-write snapshot. Readers load the snapshot
//! without locking; first population of a type is serialized so concurrent
//! walkers build it at most once.

use std::{
    any::{TypeId, type_name},
    collections::HashMap,
    sync::Arc,
};

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use super::traits::{Record, Shape};

// =============================================================================
// TypeDescriptor
// =============================================================================

/// One field of a [`TypeDescriptor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    exported: bool,
    shape: Option<Shape>,
    annotation: &'static str,
}

impl FieldDescriptor {
    /// Field name (index for tuple structs).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the field is walked.
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Declared shape of the field.
    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    /// The field's own annotation under the engine's annotation key, or `""`.
    pub fn annotation(&self) -> &'static str {
        self.annotation
    }
}

/// Ordered field metadata for a record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Enumerates `T`'s fields, reading annotations recorded under `annotation_key`.
    ///
    /// An empty key reads no annotations at all.
    pub(crate) fn build<T: Record>(annotation_key: &str) -> Self {
        let fields = T::fields()
            .into_iter()
            .map(|info| FieldDescriptor {
                name: info.name,
                exported: info.exported,
                shape: info.shape,
                annotation: if annotation_key.is_empty() {
                    ""
                } else {
                    info.tag(annotation_key).unwrap_or_default()
                },
            })
            .collect();
        Self {
            type_name: type_name::<T>(),
            fields,
        }
    }

    /// Name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order, exported or not.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub(crate) fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }
}

// =============================================================================
// DescriptorCache
// =============================================================================

type Snapshot = HashMap<TypeId, Arc<TypeDescriptor>>;

/// Lock-free-read cache of descriptors keyed by `TypeId`.
pub(crate) struct DescriptorCache {
    snapshot: ArcSwap<Snapshot>,
    populate: Mutex<()>,
}

impl DescriptorCache {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(HashMap::new()),
            populate: Mutex::new(()),
        }
    }

    pub(crate) fn get(&self, id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.snapshot.load().get(&id).cloned()
    }

    /// Returns the cached descriptor for `id`, building and storing it on a miss.
    ///
    /// `build` runs at most once per type between clears, even under contention.
    pub(crate) fn get_or_insert_with(
        &self,
        id: TypeId,
        build: impl FnOnce() -> TypeDescriptor,
    ) -> Arc<TypeDescriptor> {
        if let Some(descriptor) = self.get(id) {
            return descriptor;
        }

        let _guard = self.populate.lock();
        // Another walker may have published it while we waited.
        if let Some(descriptor) = self.get(id) {
            return descriptor;
        }

        let descriptor = Arc::new(build());
        let mut next = HashMap::clone(&self.snapshot.load());
        next.insert(id, Arc::clone(&descriptor));
        self.snapshot.store(Arc::new(next));
        tracing::debug!(
            type_name = descriptor.type_name(),
            fields = descriptor.fields().len(),
            "cached type descriptor"
        );
        descriptor
    }

    pub(crate) fn clear(&self) {
        let _guard = self.populate.lock();
        self.snapshot.store(Arc::new(HashMap::new()));
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.load().len()
    }
}

impl Clone for DescriptorCache {
    fn clone(&self) -> Self {
        Self {
            snapshot: ArcSwap::new(self.snapshot.load_full()),
            populate: Mutex::new(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn descriptor(name: &'static str) -> TypeDescriptor {
        TypeDescriptor {
            type_name: name,
            fields: Vec::new(),
        }
    }

    #[test]
    fn builds_once_per_type() {
        let cache = DescriptorCache::new();
        let builds = AtomicUsize::new(0);
        for _ in 0..3 {
            cache.get_or_insert_with(TypeId::of::<u8>(), || {
                builds.fetch_add(1, Ordering::SeqCst);
                descriptor("u8")
            });
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_types_get_distinct_entries() {
        let cache = DescriptorCache::new();
        cache.get_or_insert_with(TypeId::of::<u8>(), || descriptor("a"));
        let second = cache.get_or_insert_with(TypeId::of::<u16>(), || descriptor("b"));
        assert_eq!(second.type_name(), "b");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let cache = DescriptorCache::new();
        cache.get_or_insert_with(TypeId::of::<u8>(), || descriptor("a"));
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.get(TypeId::of::<u8>()).is_none());
    }

    #[test]
    fn concurrent_population_builds_once() {
        let cache = DescriptorCache::new();
        let builds = AtomicUsize::new(0);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    cache.get_or_insert_with(TypeId::of::<String>(), || {
                        builds.fetch_add(1, Ordering::SeqCst);
                        descriptor("String")
                    })
                });
            }
        });
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }
}
