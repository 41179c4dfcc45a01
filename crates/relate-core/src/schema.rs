mod descriptor;
pub use descriptor::{FieldDescriptor, FieldType, Model, ModelDescriptor, ModelRef, Shape};

mod field;
pub use field::Field;

mod model;
pub use model::Schema;

mod name;
pub use name::{default_foreign_key_name, to_column_name, Name};

mod relation;
pub use relation::{JoinTable, Polymorphic, RelationKind, Relationship};

mod tag;
pub use tag::{FieldOptions, RelationOptions, TagSettings};

mod builder;
pub use builder::Builder;
