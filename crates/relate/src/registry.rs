use crate::{Model, ModelRef, Result, Schema};
use relate_core::schema::Builder;

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Memoizes resolved schemas per model type.
///
/// A schema is resolved the first time its type is requested and shared from
/// then on; every caller receives the same `Arc`. Resolution runs outside the
/// lock, so concurrent first requests may each resolve the type, but only the
/// first to finish is stored and returned to all of them. Failed resolutions
/// are not stored.
#[derive(Debug, Default)]
pub struct Registry {
    builder: Builder,
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn schema<T: Model>(&self) -> Result<Arc<Schema>> {
        self.schema_for(T::model_ref())
    }

    pub fn schema_for(&self, model: ModelRef) -> Result<Arc<Schema>> {
        if let Some(schema) = self.get(model) {
            return Ok(schema);
        }

        log::debug!("resolving schema for `{}`", model.name());
        let schema = Arc::new(self.builder.build(model)?);

        // Entries are only ever inserted whole, so a poisoned lock still
        // guards a consistent map.
        let mut schemas = self
            .schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(schemas.entry(model.type_id()).or_insert(schema).clone())
    }

    /// Returns the cached schema of `model` without resolving it.
    pub fn get(&self, model: ModelRef) -> Option<Arc<Schema>> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&model.type_id())
            .cloned()
    }

    pub fn contains(&self, model: ModelRef) -> bool {
        self.get(model).is_some()
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
