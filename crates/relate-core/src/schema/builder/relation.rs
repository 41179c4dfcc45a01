use super::Fields;
use crate::schema::{
    default_foreign_key_name, to_column_name, Field, JoinTable, ModelRef, Name, Polymorphic,
    RelationKind, RelationOptions, Relationship, Shape,
};
use crate::{Error, Result};
use std::collections::HashMap;

/// A resolved relationship plus the foreign key columns it places on the
/// owning model.
pub(super) struct Resolution {
    pub(super) relationship: Relationship,

    /// Columns of the owner that hold this relationship's foreign key
    pub(super) owner_keys: Vec<String>,
}

/// Resolves every relationship field of `owner`, returning each resolution
/// with the index of its field.
pub(super) fn resolve_all(
    owner: &Fields,
    targets: &HashMap<ModelRef, Fields>,
) -> Result<Vec<(usize, Resolution)>> {
    let mut resolved = vec![];

    for (index, decl) in owner.decls.iter().enumerate() {
        let (target, many) = match decl.shape {
            Shape::Scalar => continue,
            Shape::One { target, .. } => (target, false),
            Shape::Many { target, .. } => (target, true),
        };

        let target = if target == owner.model {
            owner
        } else {
            match targets.get(&target) {
                Some(target) => target,
                None => crate::bail!("model `{}` was not collected", target.name()),
            }
        };

        let resolver = Resolver {
            owner,
            target,
            field: &owner.fields[index],
            options: &decl.options.relation,
        };

        let resolution = if many {
            resolver.plural()?
        } else {
            resolver.singular()?
        };

        log::debug!(
            "resolved `{}`: {} {} foreign_key={:?} association_foreign_key={:?}",
            resolver.field.full_name(&owner.type_name),
            resolution.relationship.kind,
            target.type_name,
            resolution.relationship.foreign_key,
            resolution.relationship.association_foreign_key,
        );

        resolved.push((index, resolution));
    }

    Ok(resolved)
}

struct Resolver<'a> {
    /// Model declaring the relationship field
    owner: &'a Fields,

    /// Model on the other side; the same as `owner` for self references
    target: &'a Fields,

    field: &'a Field,

    options: &'a RelationOptions,
}

impl Resolver<'_> {
    fn singular(&self) -> Result<Resolution> {
        if let Some(name) = &self.options.polymorphic {
            return self.polymorphic(name, RelationKind::HasOne);
        }

        match self.options.rel {
            Some(RelationKind::BelongsTo) => return self.belongs_to(None),
            Some(RelationKind::HasOne) => return self.has_n(RelationKind::HasOne, None),
            Some(kind @ (RelationKind::HasMany | RelationKind::ManyToMany)) => {
                return Err(Error::invalid_schema(format!(
                    "field `{}` is annotated `rel:{kind}` but is not a collection",
                    self.field_name()
                )));
            }
            None => {}
        }

        if self.options.many2many.is_some() {
            return Err(Error::invalid_schema(format!(
                "field `{}` is annotated `many2many` but is not a collection",
                self.field_name()
            )));
        }

        // An explicit foreign key decides the direction by where it lives.
        // The owner is searched first; for self references both sides are
        // the same model and the key is read as pointing back at the owner.
        if !self.options.foreign_key.is_empty() {
            if !self.is_self_reference() {
                if let Some(keys) = lookup(self.owner, &self.options.foreign_key) {
                    return self.belongs_to(Some(keys));
                }
            }

            if let Some(keys) = lookup(self.target, &self.options.foreign_key) {
                return self.has_n(RelationKind::HasOne, Some(keys));
            }

            return Err(Error::ambiguous_relationship(
                &self.owner.type_name,
                &self.field.name,
                format!(
                    "foreign key `{}` is not a field of `{}` or `{}`",
                    self.options.foreign_key.join(","),
                    self.owner.type_name,
                    self.target.type_name,
                ),
            ));
        }

        // A self reference holding `<model>_<pk>` points at its owner.
        if self.is_self_reference() {
            if let Some(keys) = self.convention_has_n_keys() {
                return self.has_n(RelationKind::HasOne, Some(keys));
            }
        }

        if let Some(keys) = self.convention_belongs_to_keys() {
            return self.belongs_to(Some(keys));
        }

        if !self.is_self_reference() {
            if let Some(keys) = self.convention_has_n_keys() {
                return self.has_n(RelationKind::HasOne, Some(keys));
            }
        }

        let target_pk = self.target.require_primary_fields()?;

        Err(Error::ambiguous_relationship(
            &self.owner.type_name,
            &self.field.name,
            format!(
                "neither `{}` holds `{}` nor `{}` holds `{}`; add a `rel` or `foreignkey` annotation",
                self.target.type_name,
                self.default_has_n_keys()
                    .map(|keys| keys.join(","))
                    .unwrap_or_default(),
                self.owner.type_name,
                default_keys(&self.belongs_to_prefixes()[0], &target_pk).join(","),
            ),
        ))
    }

    fn plural(&self) -> Result<Resolution> {
        if let Some(name) = &self.options.polymorphic {
            return self.polymorphic(name, RelationKind::HasMany);
        }

        if self.options.is_many_to_many() {
            return self.many_to_many(self.options.many2many.as_deref());
        }

        match self.options.rel {
            Some(kind @ (RelationKind::BelongsTo | RelationKind::HasOne)) => {
                return Err(Error::invalid_schema(format!(
                    "field `{}` is annotated `rel:{kind}` but is a collection",
                    self.field_name()
                )));
            }
            Some(RelationKind::HasMany) => return self.has_n(RelationKind::HasMany, None),
            _ => {}
        }

        if !self.options.foreign_key.is_empty() {
            return self.has_n(RelationKind::HasMany, None);
        }

        if let Some(keys) = self.convention_has_n_keys() {
            return self.has_n(RelationKind::HasMany, Some(keys));
        }

        // Both sides hold collections of each other and no foreign key
        // points back: a join table connects them.
        if !self.is_self_reference() && self.target.declares_many(self.owner.model) {
            return self.many_to_many(None);
        }

        self.has_n(RelationKind::HasMany, None)
    }

    /// The owner stores the foreign key, referencing the target's key.
    fn belongs_to(&self, keys: Option<Vec<String>>) -> Result<Resolution> {
        let foreign_key = match keys {
            Some(keys) => keys,
            None if !self.options.foreign_key.is_empty() => self.explicit_keys(self.owner)?,
            None => {
                let target_pk = self.target.require_primary_fields()?;
                let prefixes = self.belongs_to_prefixes();
                match_keys(self.owner, &prefixes, &target_pk)
                    .unwrap_or_else(|| default_keys(&prefixes[0], &target_pk))
            }
        };

        let association_foreign_key = self.association_keys(self.target, foreign_key.len())?;

        Ok(Resolution {
            owner_keys: foreign_key.clone(),
            relationship: self.relationship(
                RelationKind::BelongsTo,
                foreign_key,
                association_foreign_key,
            ),
        })
    }

    /// The target stores the foreign key, referencing the owner's key.
    fn has_n(&self, kind: RelationKind, keys: Option<Vec<String>>) -> Result<Resolution> {
        let foreign_key = match keys {
            Some(keys) => keys,
            None if !self.options.foreign_key.is_empty() => self.explicit_keys(self.target)?,
            None => match self.convention_has_n_keys() {
                Some(keys) => keys,
                None => self
                    .default_has_n_keys()
                    .ok_or_else(|| Error::missing_identity(&self.owner.type_name))?,
            },
        };

        let association_foreign_key = self.association_keys(self.owner, foreign_key.len())?;

        Ok(Resolution {
            owner_keys: self.self_held(&foreign_key),
            relationship: self.relationship(kind, foreign_key, association_foreign_key),
        })
    }

    /// The target identifies its owner by a `<name>Type`/`<name>ID` pair.
    fn polymorphic(&self, name: &str, kind: RelationKind) -> Result<Resolution> {
        let type_field = format!("{name}Type");
        let id_field = format!("{name}ID");

        let db_name = self
            .target
            .find(&type_field)
            .map(|field| field.db_name.clone())
            .unwrap_or_else(|| to_column_name(&type_field));

        let foreign_key = vec![self
            .target
            .find(&id_field)
            .map(|field| field.db_name.clone())
            .unwrap_or_else(|| format!("{}_id", to_column_name(name)))];

        let association_foreign_key = self.association_keys(self.owner, foreign_key.len())?;

        let mut relationship = self.relationship(kind, foreign_key, association_foreign_key);
        relationship.polymorphic = Some(Polymorphic {
            type_field,
            db_name,
            value: self.owner.name.singular(),
        });

        Ok(Resolution {
            owner_keys: self.self_held(&relationship.foreign_key),
            relationship,
        })
    }

    /// Both sides are referenced from a join table. `foreignkey` and
    /// `associationforeignkey` select the referenced keys of the owner and
    /// the target.
    fn many_to_many(&self, join_table: Option<&str>) -> Result<Resolution> {
        let owner_keys = if self.options.foreign_key.is_empty() {
            columns(&self.owner.require_primary_fields()?)
        } else {
            self.explicit_keys(self.owner)?
        };

        let association_keys = if self.options.association_foreign_key.is_empty() {
            columns(&self.target.require_primary_fields()?)
        } else {
            lookup(self.target, &self.options.association_foreign_key)
                .ok_or_else(|| self.unknown_association_key(self.target))?
        };

        let foreign_key = owner_keys
            .iter()
            .map(|key| default_foreign_key_name(&self.owner.type_name, key))
            .collect();

        let association_foreign_key = if self.is_self_reference() {
            let singular = Name::new(&self.field.name).singular();
            association_keys
                .iter()
                .map(|key| format!("{singular}_{key}"))
                .collect()
        } else {
            association_keys
                .iter()
                .map(|key| default_foreign_key_name(&self.target.type_name, key))
                .collect()
        };

        let name = match join_table {
            Some(name) => name.to_string(),
            None if self.is_self_reference() => {
                format!("{}_{}", self.owner.name.singular(), to_column_name(&self.field.name))
            }
            None => {
                let mut tables = [self.owner.name.plural(), self.target.name.plural()];
                tables.sort();
                tables.join("_")
            }
        };

        let mut relationship = self.relationship(
            RelationKind::ManyToMany,
            foreign_key,
            association_foreign_key,
        );
        relationship.join_table = Some(JoinTable {
            name,
            owner_keys,
            association_keys,
        });

        Ok(Resolution {
            relationship,
            owner_keys: vec![],
        })
    }

    fn relationship(
        &self,
        kind: RelationKind,
        foreign_key: Vec<String>,
        association_foreign_key: Vec<String>,
    ) -> Relationship {
        Relationship {
            kind,
            target: self.target.model,
            foreign_key,
            association_foreign_key,
            polymorphic: None,
            join_table: None,
        }
    }

    /// Columns named by `associationforeignkey` on `referenced`, or its
    /// primary key columns.
    fn association_keys(&self, referenced: &Fields, len: usize) -> Result<Vec<String>> {
        let keys = if self.options.association_foreign_key.is_empty() {
            columns(&referenced.require_primary_fields()?)
        } else {
            lookup(referenced, &self.options.association_foreign_key)
                .ok_or_else(|| self.unknown_association_key(referenced))?
        };

        if keys.len() != len {
            return Err(Error::invalid_schema(format!(
                "field `{}` has {} foreign key column(s) but {} association key column(s)",
                self.field_name(),
                len,
                keys.len()
            )));
        }

        Ok(keys)
    }

    /// Columns named by `foreignkey`, which must all be fields of `holder`.
    fn explicit_keys(&self, holder: &Fields) -> Result<Vec<String>> {
        lookup(holder, &self.options.foreign_key).ok_or_else(|| {
            Error::ambiguous_relationship(
                &self.owner.type_name,
                &self.field.name,
                format!(
                    "foreign key `{}` is not a field of `{}`",
                    self.options.foreign_key.join(","),
                    holder.type_name
                ),
            )
        })
    }

    /// A foreign key on the target referencing the owner, found by naming
    /// convention.
    fn convention_has_n_keys(&self) -> Option<Vec<String>> {
        let owner_pk = self.owner.primary_fields();
        if owner_pk.is_empty() {
            return None;
        }
        match_keys(self.target, &[to_column_name(&self.owner.type_name)], &owner_pk)
    }

    /// A foreign key on the owner referencing the target, found by naming
    /// convention.
    fn convention_belongs_to_keys(&self) -> Option<Vec<String>> {
        let target_pk = self.target.primary_fields();
        if target_pk.is_empty() {
            return None;
        }
        match_keys(self.owner, &self.belongs_to_prefixes(), &target_pk)
    }

    /// The foreign key name the target is expected to hold for the owner.
    fn default_has_n_keys(&self) -> Option<Vec<String>> {
        let owner_pk = self.owner.primary_fields();
        if owner_pk.is_empty() {
            return None;
        }
        Some(default_keys(&to_column_name(&self.owner.type_name), &owner_pk))
    }

    /// Column prefixes the owner may use for a key referencing the target:
    /// after the field first, then after the target type.
    fn belongs_to_prefixes(&self) -> Vec<String> {
        let mut prefixes = vec![to_column_name(&self.field.name)];
        let by_type = to_column_name(&self.target.type_name);
        if !prefixes.contains(&by_type) {
            prefixes.push(by_type);
        }
        prefixes
    }

    /// The part of `foreign_key` that lives on the owner, which is all of it
    /// when the target is the owner itself.
    fn self_held(&self, foreign_key: &[String]) -> Vec<String> {
        if self.is_self_reference() {
            foreign_key.to_vec()
        } else {
            vec![]
        }
    }

    fn is_self_reference(&self) -> bool {
        self.owner.model == self.target.model
    }

    fn field_name(&self) -> String {
        self.field.full_name(&self.owner.type_name)
    }

    fn unknown_association_key(&self, referenced: &Fields) -> Error {
        Error::invalid_schema(format!(
            "association foreign key `{}` of field `{}` is not a field of `{}`",
            self.options.association_foreign_key.join(","),
            self.field_name(),
            referenced.type_name
        ))
    }
}

/// Resolves field names to their columns; `None` unless all are found.
fn lookup(holder: &Fields, names: &[String]) -> Option<Vec<String>> {
    names
        .iter()
        .map(|name| holder.find(name).map(|field| field.db_name.clone()))
        .collect()
}

/// Finds, for each referenced key field, a column on `holder` named
/// `<prefix>_<key>`.
///
/// The key is spelled both from the referenced field's resolved column and
/// from its declared name, so an `ID` field renamed to `my_id` still matches a
/// declared `my_struct_id`.
fn match_keys(holder: &Fields, prefixes: &[String], referenced: &[&Field]) -> Option<Vec<String>> {
    referenced
        .iter()
        .map(|key| {
            let spellings = [key.db_name.clone(), to_column_name(&key.name)];

            prefixes
                .iter()
                .flat_map(|prefix| {
                    spellings
                        .iter()
                        .map(move |spelling| default_foreign_key_name(prefix, spelling))
                })
                .find_map(|candidate| {
                    log::trace!("looking for `{candidate}` on `{}`", holder.type_name);
                    holder.find_column(&candidate)
                })
                .map(|field| field.db_name.clone())
        })
        .collect()
}

/// Foreign key names to use when none are declared.
fn default_keys(prefix: &str, referenced: &[&Field]) -> Vec<String> {
    referenced
        .iter()
        .map(|key| default_foreign_key_name(prefix, &key.db_name))
        .collect()
}

fn columns(fields: &[&Field]) -> Vec<String> {
    fields.iter().map(|field| field.db_name.clone()).collect()
}
