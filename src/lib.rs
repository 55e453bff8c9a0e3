//! # hetero-container
//!
//! Three ways to keep values of unrelated types in one collection and visit
//! them type-safely afterwards.
//!
//! - [`ClosedSetContainer`]: the set of element types is fixed when the
//!   element enum is declared with [`closed_set!`]. Visiting dispatches each
//!   value to its active alternative; a visitor missing an alternative fails
//!   to compile.
//! - [`HeteroContainer`]: accepts any `Clone + 'static` type, with no list of
//!   types declared anywhere. Values land in one bucket per type, created on
//!   first insertion. Cloning deep-copies every bucket, even when the
//!   container holds containers of its own type.
//! - [`AnyContainer`]: every value is boxed in an [`AnyValue`]; visiting
//!   tries each candidate type against each box. Simple, and slow for large
//!   counts or long type lists.
//!
//! Visitors implement [`Visit<T>`](Visit) for the types they handle. The
//! open-set and boxed containers also need the list of types to look for:
//! either passed explicitly as [`types::<(A, B, ..)>()`](types) or declared
//! by the visitor through [`Declared`].
//!
//! ## Key Features
//!
//! - **Type-safe**: values are only ever handed to a visitor as their real type
//! - **Open**: new element types need no registration step
//! - **Copyable**: clone and clear work without knowing the stored types
//! - **No unsafe**: type erasure is built on `std::any`
//!
//! ## Usage Examples
//!
//! ### Print, Double, Print
//!
//! ```rust
//! use hetero_container::{types, DoubleVisitor, HeteroContainer, RecordVisitor};
//!
//! let mut container = HeteroContainer::new();
//! container.insert(1i32);
//! container.insert(2.5f32);
//! container.insert('c');
//! container.insert("foo".to_string());
//!
//! let all = types::<(i32, f32, char, String)>();
//!
//! let mut before = RecordVisitor::new();
//! container.visit(all, &mut before);
//! assert_eq!(before.lines, vec!["1", "2.5", "c", "foo"]);
//!
//! // only ints and floats are doubled; chars and strings are left alone
//! container.visit(types::<(i32, f32)>(), &mut DoubleVisitor);
//!
//! let mut after = RecordVisitor::new();
//! container.visit(all, &mut after);
//! assert_eq!(after.lines, vec!["2", "5", "c", "foo"]);
//! ```
//!
//! ### Writing a Visitor
//!
//! ```rust
//! use hetero_container::{HeteroContainer, Declared, Visit};
//!
//! #[derive(Default)]
//! struct Total(f64);
//!
//! impl Visit<i32> for Total {
//!     fn visit(&mut self, value: &mut i32) {
//!         self.0 += f64::from(*value);
//!     }
//! }
//!
//! impl Visit<f64> for Total {
//!     fn visit(&mut self, value: &mut f64) {
//!         self.0 += *value;
//!     }
//! }
//!
//! impl Declared for Total {
//!     type Accepts = (i32, f64);
//! }
//!
//! let mut container = HeteroContainer::new();
//! container.insert(2i32);
//! container.insert(0.5f64);
//! container.insert("ignored");
//!
//! let mut total = Total::default();
//! container.visit_declared(&mut total);
//! assert_eq!(total.0, 2.5);
//! ```
//!
//! ### Containers Inside Containers
//!
//! ```rust
//! use hetero_container::{types, CountVisitor, HeteroContainer};
//!
//! let mut inner = HeteroContainer::new();
//! inner.insert(1u8);
//!
//! let mut outer = HeteroContainer::new();
//! outer.insert(inner);
//! outer.insert(outer.clone());
//!
//! let mut copy = outer.clone();
//! copy.clear();
//!
//! let mut count = CountVisitor::default();
//! outer.visit(types::<(HeteroContainer,)>(), &mut count);
//! assert_eq!(count.count, 2);
//! assert!(copy.is_empty());
//! ```
//!
//! ### Error Handling
//!
//! Inserting, visiting, clearing and cloning cannot fail. The accessors that
//! reach a specific value report what went wrong:
//!
//! ```rust
//! use hetero_container::{AnyContainer, ContainerError};
//!
//! let mut container = AnyContainer::new();
//! container.push(vec!["setting1", "setting2"]);
//!
//! match container.with(0, |value: &String| value.len()) {
//!     Ok(len) => println!("Length: {}", len),
//!     Err(ContainerError::TypeMismatch { expected, found }) => {
//!         println!("Wanted {}, found {}", expected, found)
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

mod any_value;
mod boxed;
mod closed;
mod container;
mod error;
mod registry;
mod visit;
mod visitors;

pub use any_value::AnyValue;
pub use boxed::AnyContainer;
pub use closed::{ClosedSetContainer, Dispatch};
pub use container::{ContainerId, HeteroContainer};
pub use error::ContainerError;
pub use registry::{is_registered, registered_type_count};
pub use visit::{types, Declared, FnVisitor, TypeList, Types, Visit};
pub use visitors::{CountVisitor, Double, DoubleVisitor, PrintVisitor, RecordVisitor};
