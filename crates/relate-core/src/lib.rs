//! Infers relational mappings from model descriptors: column names, primary
//! keys, and the kind and keys of every relationship between models.

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{Model, Schema};

/// A Result type alias that uses relate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
