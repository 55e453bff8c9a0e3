use crate::any_value::AnyValue;
use crate::error::ContainerError;
use crate::visit::{types, Declared, TypeList, Types};
use std::any;
use std::slice;
use tracing::trace;

/// A flat sequence of boxed values of any type
///
/// The simplest heterogeneous container: every value is boxed in an
/// [`AnyValue`] and kept in insertion order. Visiting has to try each
/// candidate type against each box, which costs O(values x types) on every
/// visit; [`HeteroContainer`](crate::HeteroContainer) avoids that by grouping
/// values by type up front.
///
/// # Examples
///
/// ```
/// use hetero_container::{types, AnyContainer, DoubleVisitor, RecordVisitor};
///
/// let mut container = AnyContainer::new();
/// container.push(1i32);
/// container.push('c');
/// container.push(2.5f32);
///
/// container.visit(types::<(i32, f32)>(), &mut DoubleVisitor);
///
/// let mut record = RecordVisitor::new();
/// container.visit(types::<(i32, f32, char)>(), &mut record);
/// assert_eq!(record.lines, vec!["2", "c", "5"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnyContainer {
    items: Vec<AnyValue>,
}

impl AnyContainer {
    /// Creates a new, empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxes `value` and appends it
    pub fn push<T: Clone + 'static>(&mut self, value: T) {
        self.items.push(AnyValue::new(value));
    }

    /// Visits every value, in insertion order, as the first type of `L` it matches
    ///
    /// Values matching none of the listed types are skipped.
    pub fn visit<L, V>(&mut self, _types: Types<L>, visitor: &mut V)
    where
        L: TypeList<V>,
    {
        let mut matched = 0;
        for item in self.items.iter_mut() {
            if L::visit_value(item, visitor) {
                matched += 1;
            }
        }
        trace!(values = self.items.len(), matched, "visited boxed values");
    }

    /// Visits with the type list the visitor declares for itself
    pub fn visit_declared<V: Declared>(&mut self, visitor: &mut V) {
        self.visit(types::<V::Accepts>(), visitor);
    }

    /// Runs `f` with read access to the value at `index`
    ///
    /// # Errors
    ///
    /// - Returns `ContainerError::IndexOutOfBounds` if `index` is past the end
    /// - Returns `ContainerError::TypeMismatch` if the value is not a `T`
    pub fn with<T: 'static, R>(
        &self,
        index: usize,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, ContainerError> {
        let item = self.items.get(index).ok_or(ContainerError::IndexOutOfBounds {
            index,
            len: self.items.len(),
        })?;
        let value = item.downcast_ref::<T>().ok_or(ContainerError::TypeMismatch {
            expected: any::type_name::<T>(),
            found: item.type_name(),
        })?;
        Ok(f(value))
    }

    /// Runs `f` with write access to the value at `index`
    ///
    /// # Errors
    ///
    /// - Returns `ContainerError::IndexOutOfBounds` if `index` is past the end
    /// - Returns `ContainerError::TypeMismatch` if the value is not a `T`
    pub fn with_mut<T: 'static, R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, ContainerError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ContainerError::IndexOutOfBounds { index, len })?;
        let found = item.type_name();
        let value = item.downcast_mut::<T>().ok_or(ContainerError::TypeMismatch {
            expected: any::type_name::<T>(),
            found,
        })?;
        Ok(f(value))
    }

    pub fn get(&self, index: usize) -> Option<&AnyValue> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, AnyValue> {
        self.items.iter()
    }

    /// Names of the stored values' types, in insertion order
    pub fn type_names(&self) -> Vec<&'static str> {
        self.items.iter().map(AnyValue::type_name).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::Visit;
    use crate::visitors::{CountVisitor, DoubleVisitor, PrintVisitor, RecordVisitor};

    #[derive(Default)]
    struct FirstMatch(Vec<&'static str>);

    impl Visit<i64> for FirstMatch {
        fn visit(&mut self, _value: &mut i64) {
            self.0.push("i64");
        }
    }

    impl Visit<u8> for FirstMatch {
        fn visit(&mut self, _value: &mut u8) {
            self.0.push("u8");
        }
    }

    #[test]
    fn test_visit_keeps_insertion_order_across_types() {
        let mut container = AnyContainer::new();
        container.push(1i32);
        container.push('a');
        container.push(2i32);
        container.push("s".to_string());

        let mut record = RecordVisitor::new();
        container.visit(types::<(String, char, i32)>(), &mut record);
        assert_eq!(record.lines, vec!["1", "a", "2", "s"]);
    }

    #[test]
    fn test_mismatches_are_skipped() {
        let mut container = AnyContainer::new();
        container.push(1i64);
        container.push(true);
        container.push(7u8);
        container.push(());

        let mut seen = FirstMatch::default();
        container.visit(types::<(u8, i64)>(), &mut seen);
        assert_eq!(seen.0, vec!["i64", "u8"]);

        let mut count = CountVisitor::default();
        container.visit(types::<(f32,)>(), &mut count);
        assert_eq!(count.count, 0);
    }

    #[test]
    fn test_duplicate_types_in_list_visit_once() {
        let mut container = AnyContainer::new();
        container.push(3i32);

        container.visit(types::<(i32, i32)>(), &mut DoubleVisitor);
        assert_eq!(container.with(0, |v: &i32| *v), Ok(6));
    }

    #[test]
    fn test_visit_declared() {
        let mut container = AnyContainer::new();
        container.push(4i32);
        container.push(4u32);

        container.visit_declared(&mut DoubleVisitor);
        container.visit_declared(&mut PrintVisitor);

        assert_eq!(container.with(0, |v: &i32| *v), Ok(8));
        assert_eq!(container.with(1, |v: &u32| *v), Ok(4));
    }

    #[test]
    fn test_with_errors() {
        let mut container = AnyContainer::new();
        container.push('c');

        assert_eq!(
            container.with(1, |v: &char| *v),
            Err(ContainerError::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert_eq!(
            container.with_mut(0, |v: &mut i32| *v),
            Err(ContainerError::TypeMismatch {
                expected: "i32",
                found: "char"
            })
        );
        assert_eq!(container.type_names(), vec!["char"]);
    }

    #[test]
    fn test_clone_is_independent() -> Result<(), ContainerError> {
        let mut original = AnyContainer::new();
        original.push("foo".to_string());

        let mut copy = original.clone();
        copy.with_mut(0, |s: &mut String| s.push('!'))?;
        copy.clear();
        copy.push(1i32);

        assert_eq!(original.with(0, |s: &String| s.clone())?, "foo");
        assert_eq!(copy.len(), 1);
        assert!(original.get(0).is_some_and(|v| v.is_type::<String>()));
        Ok(())
    }
}
