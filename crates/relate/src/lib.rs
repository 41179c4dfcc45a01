//! Infer relational mapping schemas from Rust record types.
//!
//! ```ignore
//! #[derive(relate::Model)]
//! struct User {
//!     ID: u64,
//!     Name: String,
//!     Profile: Profile,
//! }
//!
//! let schema = relate::schema_of::<User>()?;
//! ```

mod registry;
pub use registry::Registry;

pub use relate_core::schema;
pub use relate_core::schema::{
    Field, FieldType, JoinTable, Model, ModelRef, Polymorphic, RelationKind, Relationship, Schema,
    Shape, TagSettings,
};
pub use relate_core::{Error, Result};
pub use relate_macros::Model;

use std::sync::{Arc, OnceLock};

/// Resolves the schema of `T` through the process-wide [`Registry`].
///
/// Prefer an explicitly constructed registry where resolution should not
/// leave process-wide state behind, e.g. in tests.
pub fn schema_of<T: Model>() -> Result<Arc<Schema>> {
    global().schema::<T>()
}

/// The process-wide registry used by [`schema_of`].
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::new)
}

#[doc(hidden)]
pub mod codegen_support {
    pub use relate_core::schema::{
        FieldDescriptor, FieldType, Model, ModelDescriptor, ModelRef, Shape,
    };
}
