mod expect;
pub use expect::{field, relation, relationship, Expect};

pub use relate::{Model, RelationKind, Registry, Schema};

use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Initializes test logging; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Resolves `T` in a fresh registry, panicking on error.
#[track_caller]
pub fn resolve<T: relate::Model>() -> Arc<Schema> {
    init_logging();
    match Registry::new().schema::<T>() {
        Ok(schema) => schema,
        Err(e) => panic!("failed to resolve `{}`: {e}", T::model_ref().name()),
    }
}

/// Resolves `T` in a fresh registry, panicking if it succeeds.
#[track_caller]
pub fn resolve_err<T: relate::Model>() -> relate::Error {
    init_logging();
    match Registry::new().schema::<T>() {
        Ok(schema) => panic!("expected resolution to fail; actual={schema:#?}"),
        Err(e) => e,
    }
}

/// Compares the resolved fields of `schema` with `expect`, in order.
#[track_caller]
pub fn assert_fields(schema: &Schema, expect: Vec<Expect>) {
    let expect: Vec<_> = expect.into_iter().map(Expect::into_field).collect();
    assert_eq!(schema.fields, expect);
}
