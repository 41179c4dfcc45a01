use super::ModelRef;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// The owning model stores the foreign key
    BelongsTo,

    /// The associated model stores the foreign key, one record
    HasOne,

    /// The associated model stores the foreign key, many records
    HasMany,

    /// Both sides are referenced from a join table
    ManyToMany,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub kind: RelationKind,

    /// The associated model
    pub target: ModelRef,

    /// Columns holding the reference. For `ManyToMany` these are the join
    /// table columns referencing the owner.
    pub foreign_key: Vec<String>,

    /// Columns the foreign key points to. For `ManyToMany` these are the join
    /// table columns referencing the associated model.
    pub association_foreign_key: Vec<String>,

    pub polymorphic: Option<Polymorphic>,

    pub join_table: Option<JoinTable>,
}

/// The associated model identifies its owner by a (type, id) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polymorphic {
    /// Discriminator field name on the associated model, e.g. `OwnerType`
    pub type_field: String,

    /// Discriminator column, e.g. `owner_type`
    pub db_name: String,

    /// Value stored in the discriminator for this owner, e.g. `my_struct`
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTable {
    pub name: String,

    /// Owner columns referenced by the relationship's `foreign_key`
    pub owner_keys: Vec<String>,

    /// Associated model columns referenced by `association_foreign_key`
    pub association_keys: Vec<String>,
}

impl RelationKind {
    pub fn parse(src: &str) -> Option<RelationKind> {
        match src.trim().to_ascii_lowercase().as_str() {
            "belongs_to" => Some(RelationKind::BelongsTo),
            "has_one" => Some(RelationKind::HasOne),
            "has_many" => Some(RelationKind::HasMany),
            "many_to_many" | "many2many" => Some(RelationKind::ManyToMany),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongs_to",
            RelationKind::HasOne => "has_one",
            RelationKind::HasMany => "has_many",
            RelationKind::ManyToMany => "many_to_many",
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, RelationKind::HasMany | RelationKind::ManyToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Relationship {
    pub fn is_polymorphic(&self) -> bool {
        self.polymorphic.is_some()
    }

    /// True if the foreign key columns live on the owning model.
    pub fn owner_holds_foreign_key(&self) -> bool {
        self.kind == RelationKind::BelongsTo
    }
}
