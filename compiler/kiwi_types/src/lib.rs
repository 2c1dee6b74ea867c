//! Type names for Kiwi type hints.
//!
//! Type hints are advisory: the parser resolves a hint's name to a
//! [`TypeId`] and the interpreter checks values against it at run time.
//! There is no static checking here.

mod registry;

pub use kiwi_ir::TypeId;
pub use registry::{SharedTypeRegistry, TypeRegistry, PRIMITIVE_TYPES};
