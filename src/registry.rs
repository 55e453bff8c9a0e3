//! Process-wide table of per-type bucket operations.
//!
//! A `HeteroContainer` stores its buckets type-erased, so it cannot clear,
//! copy or measure them on its own. The first time any container receives a
//! value of type `T`, the operations that know how to handle a `Vec<T>` are
//! recorded here; every container that later uses `T` shares that record.

use crate::container::HeteroContainer;
use rustc_hash::FxHashMap;
use std::any::{self, TypeId};
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Type-erased operations on the bucket of one element type
pub(crate) struct BucketOps {
    pub(crate) type_name: &'static str,
    pub(crate) clear: fn(&mut HeteroContainer),
    pub(crate) copy: fn(&HeteroContainer, &mut HeteroContainer),
    pub(crate) len: fn(&HeteroContainer) -> usize,
}

impl fmt::Debug for BucketOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketOps")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

type Registry = RwLock<FxHashMap<TypeId, &'static BucketOps>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Default::default)
}

fn clear_bucket<T: 'static>(container: &mut HeteroContainer) {
    if let Some(bucket) = container.bucket_mut::<T>() {
        bucket.clear();
    }
}

fn copy_bucket<T: Clone + 'static>(source: &HeteroContainer, dest: &mut HeteroContainer) {
    let bucket = dest.bucket_entry::<T>();
    if let Some(values) = source.bucket::<T>() {
        bucket.extend(values.iter().cloned());
    }
}

fn bucket_len<T: 'static>(container: &HeteroContainer) -> usize {
    container.bucket::<T>().map_or(0, Vec::len)
}

/// Returns the operations for `T`, registering them on first use
///
/// Registration happens at most once per type for the whole process, even
/// when several threads ask for a new type at the same time.
pub(crate) fn ops_for<T: Clone + 'static>() -> &'static BucketOps {
    let type_id = TypeId::of::<T>();
    {
        let map = registry().read().unwrap_or_else(PoisonError::into_inner);
        if let Some(&ops) = map.get(&type_id) {
            return ops;
        }
    }

    // entries are immutable once inserted, so a poisoned lock is still consistent
    let mut map = registry().write().unwrap_or_else(PoisonError::into_inner);
    *map.entry(type_id).or_insert_with(|| {
        let type_name = any::type_name::<T>();
        debug!(element_type = type_name, "registering bucket operations");
        let ops: &'static BucketOps = Box::leak(Box::new(BucketOps {
            type_name,
            clear: clear_bucket::<T>,
            copy: copy_bucket::<T>,
            len: bucket_len::<T>,
        }));
        ops
    })
}

/// Returns true if any container in the process has ever stored a `T`
pub fn is_registered<T: 'static>() -> bool {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&TypeId::of::<T>())
}

/// Number of distinct element types registered so far, across all containers
pub fn registered_type_count() -> usize {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .len()
}
