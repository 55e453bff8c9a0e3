use std::slice;

/// A tagged value that can hand its active alternative to a visitor
///
/// Implemented by enums generated with [`closed_set!`](crate::closed_set) for
/// every visitor that accepts all of the enum's alternatives. A visitor that
/// misses one alternative does not satisfy the bound, so the mistake is caught
/// at compile time.
pub trait Dispatch<V> {
    fn dispatch(&mut self, visitor: &mut V);
}

/// Declares a closed set of alternative types as an enum
///
/// Each variant wraps exactly one type. The macro generates the enum, a
/// `From` conversion per alternative (so the alternatives must be distinct
/// types) and a [`Dispatch`] impl for every visitor covering all of them.
///
/// # Examples
///
/// ```
/// use hetero_container::{closed_set, ClosedSetContainer, RecordVisitor};
///
/// closed_set! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum Scalar {
///         Int(i32),
///         Float(f64),
///         Text(String),
///     }
/// }
///
/// let mut container = ClosedSetContainer::<Scalar>::new();
/// container.insert(1i32);
/// container.insert(2.2f64);
/// container.insert("foo".to_string());
///
/// let mut record = RecordVisitor::new();
/// container.visit(&mut record);
/// assert_eq!(record.lines, vec!["1", "2.2", "foo"]);
/// ```
#[macro_export]
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant($ty)),+
        }

        $(
            impl ::core::convert::From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )+

        impl<V> $crate::Dispatch<V> for $name
        where
            $(V: $crate::Visit<$ty>,)+
        {
            fn dispatch(&mut self, visitor: &mut V) {
                match self {
                    $($name::$variant(value) => $crate::Visit::<$ty>::visit(visitor, value),)+
                }
            }
        }
    };
}

/// A sequence of values drawn from a closed set of alternatives
///
/// `E` is normally an enum declared with [`closed_set!`](crate::closed_set).
/// Storage is a plain `Vec<E>`, so copying, moving and dropping need no
/// special handling.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedSetContainer<E> {
    items: Vec<E>,
}

impl<E> ClosedSetContainer<E> {
    /// Creates a new, empty container
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a value of any of the alternative types
    pub fn insert<T: Into<E>>(&mut self, value: T) {
        self.items.push(value.into());
    }

    /// Visits every value in insertion order, as its actual alternative
    pub fn visit<V>(&mut self, visitor: &mut V)
    where
        E: Dispatch<V>,
    {
        for item in self.items.iter_mut() {
            item.dispatch(visitor);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<E> Default for ClosedSetContainer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, T: Into<E>> Extend<T> for ClosedSetContainer<E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a, E> IntoIterator for &'a ClosedSetContainer<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
