use super::{Field, ModelRef, Name, Relationship};

/// The resolved mapping of one model: its fields in declaration order, with
/// any synthesized foreign key fields appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub model: ModelRef,

    pub name: Name,

    /// Default table name, the plural snake case of the type name
    pub table_name: String,

    pub fields: Vec<Field>,
}

impl Schema {
    /// Look up a field by its declared name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Look up a column-holding field by its resolved column name.
    pub fn field_by_db_name(&self, db_name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.is_normal && field.db_name == db_name)
    }

    pub fn primary_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.is_primary_key)
    }

    /// The primary key field, if the key has exactly one column.
    pub fn prioritized_primary_field(&self) -> Option<&Field> {
        let mut fields = self.primary_fields();
        match (fields.next(), fields.next()) {
            (Some(field), None) => Some(field),
            _ => None,
        }
    }

    pub fn relationships(&self) -> impl Iterator<Item = (&Field, &Relationship)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| Some((field, field.relationship.as_ref()?)))
    }

    /// Column names in field order, excluding relationship fields.
    pub fn db_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.is_normal)
            .map(|field| field.db_name.as_str())
    }
}
