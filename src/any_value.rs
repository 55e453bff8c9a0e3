use std::any::{self, Any, TypeId};
use std::fmt;

/// A container for type-erased values that preserves type information
///
/// Unlike a bare `Box<dyn Any>`, an `AnyValue` remembers the name of the type
/// it was built from and knows how to clone itself, so collections of boxed
/// values keep ordinary copy semantics.
pub struct AnyValue {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any>,
    clone_fn: fn(&dyn Any) -> Box<dyn Any>,
}

fn clone_boxed<T: Clone + 'static>(value: &dyn Any) -> Box<dyn Any> {
    match value.downcast_ref::<T>() {
        Some(value) => Box::new(value.clone()),
        // clone_fn is only ever paired with a value of type T
        None => unreachable!("AnyValue clone function paired with a foreign type"),
    }
}

impl AnyValue {
    /// Create a new AnyValue from any cloneable value
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
            value: Box::new(value),
            clone_fn: clone_boxed::<T>,
        }
    }

    /// Check if the contained value is of type T
    pub fn is_type<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The `TypeId` of the contained value
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the contained value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Get a reference to the contained value if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Get a mutable reference to the contained value if it is of type T
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    /// Take the contained value out if it is of type T, handing the box back otherwise
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        if !self.is_type::<T>() {
            return Err(self);
        }
        let Self {
            type_id,
            type_name,
            value,
            clone_fn,
        } = self;
        value.downcast::<T>().map(|value| *value).map_err(|value| Self {
            type_id,
            type_name,
            value,
            clone_fn,
        })
    }
}

impl Clone for AnyValue {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            type_name: self.type_name,
            value: (self.clone_fn)(self.value.as_ref()),
            clone_fn: self.clone_fn,
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
