use relate::{Field, Model, RelationKind, Relationship, TagSettings};

/// Builds an expected [`Field`] for comparison with a resolved one.
#[derive(Debug)]
pub struct Expect {
    field: Field,
}

/// A column field bound directly on the model.
pub fn field(name: &str, db_name: &str) -> Expect {
    Expect {
        field: Field::normal(name, db_name),
    }
}

/// A relationship field bound directly on the model.
pub fn relation(name: &str, db_name: &str, relationship: Relationship) -> Expect {
    let mut field = Field::normal(name, db_name);
    field.is_normal = false;
    field.relationship = Some(relationship);
    Expect { field }
}

pub fn relationship<T: Model>(
    kind: RelationKind,
    foreign_key: &[&str],
    association_foreign_key: &[&str],
) -> Relationship {
    Relationship {
        kind,
        target: T::model_ref(),
        foreign_key: foreign_key.iter().map(|s| s.to_string()).collect(),
        association_foreign_key: association_foreign_key
            .iter()
            .map(|s| s.to_string())
            .collect(),
        polymorphic: None,
        join_table: None,
    }
}

impl Expect {
    pub fn primary_key(mut self) -> Self {
        self.field.is_primary_key = true;
        self
    }

    pub fn foreign_key(mut self) -> Self {
        self.field.is_foreign_key = true;
        self
    }

    /// Adds an entry to the expected tag settings.
    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.field.tag_settings.insert(key, value);
        self
    }

    pub fn tags(mut self, settings: TagSettings) -> Self {
        self.field.tag_settings = settings;
        self
    }

    pub fn bind_names(mut self, bind_names: &[&str]) -> Self {
        self.field.bind_names = bind_names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn into_field(self) -> Field {
        self.field
    }
}
