//! # Domain Layer
//!
//! Quote and history types that form the stable output contract, plus the
//! value objects they are built from. Nothing in here performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
