//! Core library for the Todo API
//!
//! This crate contains the domain layer:
//! - Task entity and validation
//! - List filter/order parsing
//! - Repository interface and store adapters
//! - Use cases orchestrating the rules above

pub mod error;
pub mod task;
pub mod usecase;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
