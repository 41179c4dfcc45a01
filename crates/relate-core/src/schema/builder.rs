mod relation;

use super::{
    to_column_name, Field, FieldOptions, ModelDescriptor, ModelRef, Name, Schema, Shape,
    TagSettings,
};
use crate::{err, Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Resolves schemas from model descriptors.
///
/// The builder keeps no state between calls; memoization belongs to the
/// caller (see `relate::Registry`).
#[derive(Debug, Default)]
pub struct Builder {
    _priv: (),
}

/// The fields of one model before relationships are resolved.
///
/// This is all the resolver needs to know about the model on the other side
/// of a relationship, so building it never recurses into related models.
#[derive(Debug)]
pub(crate) struct Fields {
    pub(crate) model: ModelRef,

    pub(crate) name: Name,

    /// Type name as declared
    pub(crate) type_name: String,

    pub(crate) fields: Vec<Field>,

    /// Declared shape and typed options, parallel to `fields`
    pub(crate) decls: Vec<Decl>,
}

#[derive(Debug)]
pub(crate) struct Decl {
    pub(crate) shape: Shape,
    pub(crate) options: FieldOptions,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Resolves the complete schema of `model`.
    pub fn build(&self, model: ModelRef) -> Result<Schema> {
        let mut owner = Fields::collect(model)?;

        // Shallow field lists of every other model referenced by a
        // relationship field.
        let mut targets = HashMap::new();
        for (field, decl) in owner.fields.iter().zip(&owner.decls) {
            let Some(target) = decl.shape.target() else {
                continue;
            };

            if target != model && !targets.contains_key(&target) {
                let fields = Fields::collect(target).map_err(|e| {
                    e.context(err!("resolving `{}`", field.full_name(&owner.type_name)))
                })?;
                targets.insert(target, fields);
            }
        }

        let resolved = relation::resolve_all(&owner, &targets)?;

        for (index, resolution) in resolved {
            for column in &resolution.owner_keys {
                owner.mark_foreign_key(column);
            }
            owner.fields[index].relationship = Some(resolution.relationship);
        }

        Ok(Schema {
            model,
            table_name: owner.name.plural(),
            name: owner.name,
            fields: owner.fields,
        })
    }
}

impl Fields {
    /// Builds the field list of `model`, flattening embedded structs.
    pub(crate) fn collect(model: ModelRef) -> Result<Fields> {
        let descriptor = model.describe();

        let mut fields = Fields {
            model,
            name: Name::new(&descriptor.name),
            type_name: descriptor.name.clone(),
            fields: vec![],
            decls: vec![],
        };

        let mut stack = vec![model];
        fields.push_fields(&descriptor, &[], "", &mut stack)?;
        fields.assign_primary_key();
        fields.verify_columns()?;

        Ok(fields)
    }

    fn push_fields(
        &mut self,
        descriptor: &ModelDescriptor,
        path: &[String],
        prefix: &str,
        stack: &mut Vec<ModelRef>,
    ) -> Result<()> {
        for field in &descriptor.fields {
            let tag_settings = field
                .annotation
                .as_deref()
                .map(TagSettings::parse)
                .unwrap_or_default();
            let options = FieldOptions::from_settings(&tag_settings);

            if options.ignore {
                continue;
            }

            let mut bind_names = path.to_vec();
            bind_names.push(field.name.clone());

            if options.embedded {
                let Shape::One { target, .. } = field.shape else {
                    return Err(Error::invalid_schema(format!(
                        "field `{}::{}` is annotated `embedded` but is not a struct",
                        self.type_name, field.name
                    )));
                };

                let embedded = target.describe();

                if stack.contains(&target) {
                    return Err(Error::invalid_schema(format!(
                        "field `{}::{}` embeds `{}` recursively",
                        self.type_name, field.name, embedded.name
                    )));
                }

                let prefix = format!("{prefix}{}", options.embedded_prefix.unwrap_or_default());

                stack.push(target);
                self.push_fields(&embedded, &bind_names, &prefix, stack)?;
                stack.pop();
                continue;
            }

            let column = options
                .column
                .clone()
                .unwrap_or_else(|| to_column_name(&field.name));

            self.fields.push(Field {
                name: field.name.clone(),
                db_name: format!("{prefix}{column}"),
                bind_names,
                is_normal: field.shape.is_scalar(),
                is_primary_key: false,
                is_foreign_key: false,
                tag_settings,
                relationship: None,
            });
            self.decls.push(Decl {
                shape: field.shape,
                options,
            });
        }

        Ok(())
    }

    /// Fields annotated `primary_key` form the key. Without any, the scalar
    /// field named `ID` does, or `id` when there is no `ID`.
    fn assign_primary_key(&mut self) {
        let explicit = self
            .decls
            .iter()
            .any(|decl| decl.options.primary_key && decl.shape.is_scalar());

        let by_name = if self
            .fields
            .iter()
            .any(|field| field.is_normal && field.name == "ID")
        {
            "ID"
        } else {
            "id"
        };

        for (field, decl) in self.fields.iter_mut().zip(&self.decls) {
            if !field.is_normal {
                continue;
            }

            field.is_primary_key = if explicit {
                decl.options.primary_key
            } else {
                field.name == by_name
            };
        }
    }

    fn verify_columns(&self) -> Result<()> {
        let mut seen = IndexMap::<&str, &Field>::new();

        for field in self.fields.iter().filter(|field| field.is_normal) {
            if let Some(first) = seen.insert(&field.db_name, field) {
                return Err(Error::duplicate_column(
                    &self.type_name,
                    &field.db_name,
                    &first.name,
                    &field.name,
                ));
            }
        }

        Ok(())
    }

    pub(crate) fn primary_fields(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|field| field.is_primary_key)
            .collect()
    }

    /// The primary key fields, or a missing identity error naming the model.
    pub(crate) fn require_primary_fields(&self) -> Result<Vec<&Field>> {
        let fields = self.primary_fields();
        if fields.is_empty() {
            return Err(Error::missing_identity(&self.type_name));
        }
        Ok(fields)
    }

    /// Finds a column field by declared name, falling back to its column.
    pub(crate) fn find(&self, name: &str) -> Option<&Field> {
        let normal = || self.fields.iter().filter(|field| field.is_normal);

        normal()
            .find(|field| field.name == name)
            .or_else(|| normal().find(|field| field.db_name == name))
            .or_else(|| {
                let column = to_column_name(name);
                normal().find(|field| field.db_name == column)
            })
    }

    /// Finds a column field whose resolved or conventional column is
    /// `column`.
    pub(crate) fn find_column(&self, column: &str) -> Option<&Field> {
        self.fields.iter().filter(|field| field.is_normal).find(|field| {
            field.db_name == column || to_column_name(&field.name) == column
        })
    }

    /// True if the model declares a collection of `model`.
    pub(crate) fn declares_many(&self, model: ModelRef) -> bool {
        self.decls
            .iter()
            .any(|decl| matches!(decl.shape, Shape::Many { target, .. } if target == model))
    }

    fn mark_foreign_key(&mut self, column: &str) {
        if let Some(field) = self
            .fields
            .iter_mut()
            .find(|field| field.is_normal && field.db_name == column)
        {
            field.is_foreign_key = true;
            return;
        }

        log::debug!(
            "synthesizing foreign key field `{}::{column}`",
            self.type_name
        );

        self.fields.push(Field {
            name: column.to_string(),
            db_name: column.to_string(),
            bind_names: vec![],
            is_normal: true,
            is_primary_key: false,
            is_foreign_key: true,
            tag_settings: TagSettings::default(),
            relationship: None,
        });
    }
}
