use crate::any_value::AnyValue;
use crate::container::HeteroContainer;
use std::fmt;
use std::marker::PhantomData;

/// A callable that can be applied to values of type `T`
///
/// A visitor handling several types simply implements `Visit` once per type,
/// or once generically over a bound such as `T: Display`.
///
/// # Examples
///
/// ```
/// use hetero_container::{types, HeteroContainer, Visit};
///
/// struct Negate;
///
/// impl Visit<i32> for Negate {
///     fn visit(&mut self, value: &mut i32) {
///         *value = -*value;
///     }
/// }
///
/// impl Visit<f64> for Negate {
///     fn visit(&mut self, value: &mut f64) {
///         *value = -*value;
///     }
/// }
///
/// let mut container = HeteroContainer::new();
/// container.insert(3i32);
/// container.insert(1.5f64);
/// container.visit(types::<(i32, f64)>(), &mut Negate);
///
/// assert_eq!(container.with_bucket(|ints: &[i32]| ints[0]), Ok(-3));
/// ```
pub trait Visit<T> {
    fn visit(&mut self, value: &mut T);
}

/// An ordered list of element types, spelled as a tuple: `(i32, f32, char)`
///
/// Implemented for tuples of up to twelve types whose members are all
/// accepted by the visitor `V`. The unit type `()` is the empty list.
pub trait TypeList<V> {
    /// Visit, type by type in list order, every matching bucket of `container`
    fn visit_buckets(container: &mut HeteroContainer, visitor: &mut V);

    /// Apply `visitor` to `value` as the first listed type it matches
    ///
    /// Returns `false` when `value` holds none of the listed types.
    fn visit_value(value: &mut AnyValue, visitor: &mut V) -> bool;
}

impl<V> TypeList<V> for () {
    fn visit_buckets(_container: &mut HeteroContainer, _visitor: &mut V) {}

    fn visit_value(_value: &mut AnyValue, _visitor: &mut V) -> bool {
        false
    }
}

macro_rules! impl_type_list {
    ($($t:ident),+) => {
        impl<V, $($t: 'static),+> TypeList<V> for ($($t,)+)
        where
            $(V: Visit<$t>,)+
        {
            fn visit_buckets(container: &mut HeteroContainer, visitor: &mut V) {
                $(
                    if let Some(bucket) = container.bucket_mut::<$t>() {
                        for value in bucket.iter_mut() {
                            Visit::<$t>::visit(visitor, value);
                        }
                    }
                )+
            }

            fn visit_value(value: &mut AnyValue, visitor: &mut V) -> bool {
                $(
                    if let Some(value) = value.downcast_mut::<$t>() {
                        Visit::<$t>::visit(visitor, value);
                        return true;
                    }
                )+
                false
            }
        }
    };
}

impl_type_list!(A);
impl_type_list!(A, B);
impl_type_list!(A, B, C);
impl_type_list!(A, B, C, D);
impl_type_list!(A, B, C, D, E);
impl_type_list!(A, B, C, D, E, F);
impl_type_list!(A, B, C, D, E, F, G);
impl_type_list!(A, B, C, D, E, F, G, H);
impl_type_list!(A, B, C, D, E, F, G, H, I);
impl_type_list!(A, B, C, D, E, F, G, H, I, J);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K, L);

/// A zero-sized marker carrying a type list to a `visit` call
///
/// Build one with [`types`].
pub struct Types<L>(PhantomData<fn() -> L>);

/// The type list `L`, as a value
///
/// ```
/// use hetero_container::types;
///
/// let numbers = types::<(i32, f32, f64)>();
/// # let _ = numbers;
/// ```
pub const fn types<L>() -> Types<L> {
    Types(PhantomData)
}

impl<L> Clone for Types<L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for Types<L> {}

impl<L> fmt::Debug for Types<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Types<{}>", std::any::type_name::<L>())
    }
}

/// A visitor that carries its own list of accepted types
///
/// Containers offer `visit_declared`, which visits with `Self::Accepts`
/// without the caller spelling the list out.
pub trait Declared: Sized {
    type Accepts: TypeList<Self>;
}

/// Adapts a closure over a single type into a visitor
///
/// ```
/// use hetero_container::{types, FnVisitor, HeteroContainer};
///
/// let mut container = HeteroContainer::new();
/// container.insert(2u8);
/// container.insert('x');
///
/// let mut bump = FnVisitor(|value: &mut u8| *value += 1);
/// container.visit(types::<(u8,)>(), &mut bump);
///
/// assert_eq!(container.with_bucket(|values: &[u8]| values[0]), Ok(3));
/// ```
pub struct FnVisitor<F>(pub F);

impl<T, F> Visit<T> for FnVisitor<F>
where
    F: FnMut(&mut T),
{
    fn visit(&mut self, value: &mut T) {
        (self.0)(value)
    }
}

impl<T, V> Visit<T> for &mut V
where
    V: Visit<T> + ?Sized,
{
    fn visit(&mut self, value: &mut T) {
        (**self).visit(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tally {
        ints: usize,
        chars: usize,
    }

    impl Visit<i32> for Tally {
        fn visit(&mut self, _value: &mut i32) {
            self.ints += 1;
        }
    }

    impl Visit<char> for Tally {
        fn visit(&mut self, _value: &mut char) {
            self.chars += 1;
        }
    }

    #[test]
    fn test_visit_value_uses_first_matching_type() {
        let mut tally = Tally { ints: 0, chars: 0 };
        let mut value = AnyValue::new('z');

        assert!(<(i32, char) as TypeList<Tally>>::visit_value(
            &mut value, &mut tally
        ));
        assert!(!<(i32,) as TypeList<Tally>>::visit_value(
            &mut value, &mut tally
        ));
        assert!(!<() as TypeList<Tally>>::visit_value(&mut value, &mut tally));
        assert_eq!((tally.ints, tally.chars), (0, 1));
    }

    #[test]
    fn test_mut_ref_is_a_visitor() {
        let mut tally = Tally { ints: 0, chars: 0 };
        let mut value = AnyValue::new(5i32);
        {
            let mut by_ref = &mut tally;
            assert!(<(i32,) as TypeList<&mut Tally>>::visit_value(
                &mut value,
                &mut by_ref
            ));
        }
        assert_eq!(tally.ints, 1);
    }

    #[test]
    fn test_types_debug_names_the_list() {
        assert_eq!(format!("{:?}", types::<(i32,)>()), "Types<(i32,)>");
    }
}
