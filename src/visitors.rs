//! Ready-made visitors shared by all three containers.

use crate::visit::{Declared, Visit};
use std::fmt::Display;

/// Prints every visited value on its own line to stdout
///
/// Uses `Display`, so a whole float such as `5.0f32` prints as `5`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintVisitor;

impl<T: Display> Visit<T> for PrintVisitor {
    fn visit(&mut self, value: &mut T) {
        println!("{}", value);
    }
}

impl Declared for PrintVisitor {
    type Accepts = (i32, f32, char, String);
}

/// Records the `Display` rendering of every visited value
///
/// The in-memory counterpart of [`PrintVisitor`], handy when the output has
/// to be inspected afterwards. Lines match what [`PrintVisitor`] prints,
/// so a doubled `2.5f32` is recorded as `"5"`.
#[derive(Debug, Default, Clone)]
pub struct RecordVisitor {
    pub lines: Vec<String>,
}

impl RecordVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded lines, leaving the visitor empty
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl<T: Display> Visit<T> for RecordVisitor {
    fn visit(&mut self, value: &mut T) {
        self.lines.push(value.to_string());
    }
}

impl Declared for RecordVisitor {
    type Accepts = (i32, f32, char, String);
}

/// Values that can be doubled in place
///
/// Integers double with wrapping arithmetic, floats by addition and strings
/// by repetition (`"foo"` becomes `"foofoo"`).
pub trait Double {
    fn double(&mut self);
}

macro_rules! impl_double_int {
    ($($t:ty),*) => {
        $(
            impl Double for $t {
                fn double(&mut self) {
                    *self = self.wrapping_add(*self);
                }
            }
        )*
    };
}

impl_double_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Double for f32 {
    fn double(&mut self) {
        *self += *self;
    }
}

impl Double for f64 {
    fn double(&mut self) {
        *self += *self;
    }
}

impl Double for String {
    fn double(&mut self) {
        self.push_str(&self.clone());
    }
}

/// Doubles every visited value in place
#[derive(Debug, Default, Clone, Copy)]
pub struct DoubleVisitor;

impl<T: Double> Visit<T> for DoubleVisitor {
    fn visit(&mut self, value: &mut T) {
        value.double();
    }
}

impl Declared for DoubleVisitor {
    type Accepts = (i32, f32);
}

/// Counts visited values, whatever their type
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountVisitor {
    pub count: usize,
}

impl<T> Visit<T> for CountVisitor {
    fn visit(&mut self, _value: &mut T) {
        self.count += 1;
    }
}
