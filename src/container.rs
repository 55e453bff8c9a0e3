use crate::error::ContainerError;
use crate::registry::{self, BucketOps};
use crate::visit::{Declared, TypeList, Types};
use rustc_hash::FxHashMap;
use std::any::{self, Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Process-unique identity of a [`HeteroContainer`]
///
/// Every container, including every clone, gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ContainerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An open-set heterogeneous container
///
/// Accepts values of any `Clone + 'static` type without the set of types
/// being declared up front. Values are grouped into one bucket per type,
/// created on the first insertion of that type; insertion order is kept
/// within each bucket. Visiting goes type by type, in the order of the type
/// list given to [`visit`](Self::visit).
///
/// # Examples
///
/// ```
/// use hetero_container::{types, DoubleVisitor, HeteroContainer, RecordVisitor};
///
/// let mut container = HeteroContainer::new();
/// container.insert(1i32);
/// container.insert(2.5f32);
/// container.insert('c');
/// container.insert("foo".to_string());
///
/// container.visit(types::<(i32, f32)>(), &mut DoubleVisitor);
///
/// let mut record = RecordVisitor::new();
/// container.visit(types::<(i32, f32, char, String)>(), &mut record);
/// assert_eq!(record.lines, vec!["2", "5", "c", "foo"]);
/// ```
///
/// Cloning copies every bucket; the clone shares no storage with the source:
///
/// ```
/// use hetero_container::{types, DoubleVisitor, HeteroContainer};
///
/// let mut original = HeteroContainer::new();
/// original.insert(10i32);
///
/// let mut copy = original.clone();
/// copy.visit(types::<(i32,)>(), &mut DoubleVisitor);
///
/// assert_eq!(original.with_bucket(|v: &[i32]| v.to_vec()), Ok(vec![10]));
/// assert_eq!(copy.with_bucket(|v: &[i32]| v.to_vec()), Ok(vec![20]));
/// ```
pub struct HeteroContainer {
    id: ContainerId,
    // INVARIANT: the value under `TypeId::of::<T>()` is a `Vec<T>`, and the
    // keys are exactly the types listed in `ops`.
    buckets: FxHashMap<TypeId, Box<dyn Any>>,
    ops: Vec<&'static BucketOps>,
}

impl HeteroContainer {
    /// Creates a new, empty container
    pub fn new() -> Self {
        Self {
            id: ContainerId::next(),
            buckets: FxHashMap::default(),
            ops: Vec::new(),
        }
    }

    /// This container's identity
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Appends `value` to the bucket for `T`
    ///
    /// The first value of a given type creates the bucket and registers the
    /// clear and copy operations for it; later values of that type only push.
    pub fn insert<T: Clone + 'static>(&mut self, value: T) {
        self.bucket_entry::<T>().push(value);
    }

    /// Visits every stored value whose type is in `L`
    ///
    /// Types are handled in list order, values within a type in insertion
    /// order. Types missing from `L`, and listed types never inserted, are
    /// skipped.
    pub fn visit<L, V>(&mut self, _types: Types<L>, visitor: &mut V)
    where
        L: TypeList<V>,
    {
        L::visit_buckets(self, visitor);
    }

    /// Visits with the type list the visitor declares for itself
    pub fn visit_declared<V: Declared>(&mut self, visitor: &mut V) {
        <V::Accepts as TypeList<V>>::visit_buckets(self, visitor);
    }

    /// Empties every bucket this container has used
    ///
    /// The buckets stay registered, so the container remains fully usable.
    pub fn clear(&mut self) {
        trace!(container = %self.id, types = self.ops.len(), "clearing container");
        for index in 0..self.ops.len() {
            let ops = self.ops[index];
            (ops.clear)(self);
        }
    }

    /// Total number of stored values, across all types
    pub fn len(&self) -> usize {
        self.ops.iter().map(|ops| (ops.len)(self)).sum()
    }

    /// Returns true if no values are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored values of type `T`
    pub fn len_of<T: 'static>(&self) -> usize {
        self.bucket::<T>().map_or(0, Vec::len)
    }

    /// Returns true if this container has ever received a value of type `T`
    ///
    /// Stays true after [`clear`](Self::clear).
    pub fn contains_type<T: 'static>(&self) -> bool {
        self.buckets.contains_key(&TypeId::of::<T>())
    }

    /// Number of distinct types this container has received
    pub fn type_count(&self) -> usize {
        self.ops.len()
    }

    /// Number of bucket operation records this container holds
    ///
    /// One per registered type. Equal to [`type_count`](Self::type_count)
    /// for any container, including clones and cleared containers.
    pub fn operation_count(&self) -> usize {
        self.ops.len()
    }

    /// Names of the types this container has received, in first-insertion order
    pub fn type_names(&self) -> Vec<&'static str> {
        self.ops.iter().map(|ops| ops.type_name).collect()
    }

    /// Runs `f` with read access to the values of type `T`
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::TypeNotFound` if no `T` was ever inserted.
    pub fn with_bucket<T: 'static, R>(
        &self,
        f: impl FnOnce(&[T]) -> R,
    ) -> Result<R, ContainerError> {
        let bucket = self
            .bucket::<T>()
            .ok_or_else(|| ContainerError::TypeNotFound(any::type_name::<T>()))?;
        Ok(f(bucket.as_slice()))
    }

    /// Runs `f` with write access to the values of type `T`
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::TypeNotFound` if no `T` was ever inserted.
    pub fn with_bucket_mut<T: 'static, R>(
        &mut self,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> Result<R, ContainerError> {
        let bucket = self
            .bucket_mut::<T>()
            .ok_or_else(|| ContainerError::TypeNotFound(any::type_name::<T>()))?;
        Ok(f(bucket))
    }

    pub(crate) fn bucket<T: 'static>(&self) -> Option<&Vec<T>> {
        self.buckets.get(&TypeId::of::<T>())?.downcast_ref()
    }

    pub(crate) fn bucket_mut<T: 'static>(&mut self) -> Option<&mut Vec<T>> {
        self.buckets.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// The bucket for `T`, created and registered if this is its first use
    pub(crate) fn bucket_entry<T: Clone + 'static>(&mut self) -> &mut Vec<T> {
        let Self { id, buckets, ops } = self;
        let bucket = buckets.entry(TypeId::of::<T>()).or_insert_with(|| {
            let bucket_ops = registry::ops_for::<T>();
            debug!(container = %id, element_type = bucket_ops.type_name, "new bucket");
            ops.push(bucket_ops);
            Box::new(Vec::<T>::new()) as Box<dyn Any>
        });
        match bucket.downcast_mut::<Vec<T>>() {
            Some(bucket) => bucket,
            None => unreachable!("bucket keyed by the TypeId of another type"),
        }
    }
}

impl Default for HeteroContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HeteroContainer {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.clone_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        trace!(from = %source.id, to = %self.id, types = source.ops.len(), "copying container");
        self.clear();
        self.buckets.clear();
        self.ops.clear();
        // each copy op re-creates its bucket here, so `ops` ends up in source order
        for ops in &source.ops {
            (ops.copy)(source, self);
        }
    }
}

impl fmt::Debug for HeteroContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeteroContainer")
            .field("id", &self.id)
            .field("types", &self.type_names())
            .field("len", &self.len())
            .finish()
    }
}
