use super::{Relationship, TagSettings};

/// A storage-mapped attribute of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name as declared on the model
    pub name: String,

    /// Resolved column name
    pub db_name: String,

    /// Access path from the model root. Fields flattened out of an embedded
    /// struct have one entry per level; synthesized foreign keys have none.
    pub bind_names: Vec<String>,

    /// True if the field holds a column value rather than a relationship
    pub is_normal: bool,

    pub is_primary_key: bool,

    /// True if the field stores a relationship's foreign key
    pub is_foreign_key: bool,

    /// Parsed annotation, as written
    pub tag_settings: TagSettings,

    /// Set for fields whose type is another model
    pub relationship: Option<Relationship>,
}

impl Field {
    /// A plain column field bound directly on the model.
    pub fn normal(name: impl Into<String>, db_name: impl Into<String>) -> Field {
        let name = name.into();
        Field {
            bind_names: vec![name.clone()],
            name,
            db_name: db_name.into(),
            is_normal: true,
            is_primary_key: false,
            is_foreign_key: false,
            tag_settings: TagSettings::default(),
            relationship: None,
        }
    }

    pub fn is_relationship(&self) -> bool {
        self.relationship.is_some()
    }

    /// True if the field was synthesized to hold a foreign key the model
    /// does not declare.
    pub fn is_synthesized(&self) -> bool {
        self.bind_names.is_empty()
    }

    /// Fully qualified name used in diagnostics.
    pub(crate) fn full_name(&self, model: &str) -> String {
        format!("{}::{}", model, self.name)
    }
}
