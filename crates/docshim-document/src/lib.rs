//! Ordered, typed documents exchanged with legacy wire-protocol clients.
//!
//! Documents keep their fields in insertion order and expose checked
//! accessors ([`Document::expect_document`], [`Document::expect_str`]) so
//! callers never have to assume the type of a heterogeneous field.

mod document;
mod value;

pub use document::{Document, FieldError};
pub use value::{Binary, Value};
