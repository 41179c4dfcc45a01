use super::RelationKind;

use indexmap::IndexMap;
use std::fmt;

/// Raw per-field overrides parsed from an annotation string.
///
/// Keys are stored upper-cased and looked up case-insensitively. Unknown keys
/// are kept so layers further downstream can read their own settings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TagSettings {
    entries: IndexMap<String, String>,
}

impl TagSettings {
    /// Parses an annotation of the form `key[:value](;key[:value])*`.
    ///
    /// Keys are case-insensitive. A segment without `:` gets an empty value,
    /// and a segment with an empty key is dropped with a warning.
    pub fn parse(raw: &str) -> TagSettings {
        let mut entries = IndexMap::new();

        for segment in raw.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (key, value) = segment.split_once(':').unwrap_or((segment, ""));
            let key = key.trim();

            if key.is_empty() {
                log::warn!("ignoring malformed annotation segment `{segment}` in `{raw}`");
                continue;
            }

            entries.insert(key.to_ascii_uppercase(), value.trim().to_string());
        }

        TagSettings { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_uppercase())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_ascii_uppercase(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl fmt::Debug for TagSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TagSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = TagSettings::default();
        for (key, value) in iter {
            settings.insert(key.as_ref(), value);
        }
        settings
    }
}

/// Recognized overrides of a field, in typed form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// `column:<name>`
    pub column: Option<String>,

    /// `primary_key`
    pub primary_key: bool,

    /// `-` excludes the field from the schema
    pub ignore: bool,

    /// `embedded` flattens a struct field into its parent
    pub embedded: bool,

    /// `embedded_prefix:<prefix>`
    pub embedded_prefix: Option<String>,

    pub relation: RelationOptions,
}

/// Overrides that steer the relationship resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationOptions {
    /// `foreignkey:<Field>[,<Field>]`
    pub foreign_key: Vec<String>,

    /// `associationforeignkey:<Field>[,<Field>]`
    pub association_foreign_key: Vec<String>,

    /// `polymorphic:<Name>`
    pub polymorphic: Option<String>,

    /// `rel:<kind>`
    pub rel: Option<RelationKind>,

    /// `many2many:<join table>`
    pub many2many: Option<String>,
}

impl FieldOptions {
    pub fn from_settings(settings: &TagSettings) -> FieldOptions {
        FieldOptions {
            column: non_empty(settings.get("COLUMN")),
            primary_key: settings.contains("PRIMARY_KEY"),
            ignore: settings.contains("-"),
            embedded: settings.contains("EMBEDDED"),
            embedded_prefix: non_empty(settings.get("EMBEDDED_PREFIX")),
            relation: RelationOptions::from_settings(settings),
        }
    }
}

impl RelationOptions {
    pub fn from_settings(settings: &TagSettings) -> RelationOptions {
        let rel = settings.get("REL").and_then(|value| {
            let kind = RelationKind::parse(value);
            if kind.is_none() {
                log::warn!("ignoring unknown relationship kind `rel:{value}`");
            }
            kind
        });

        RelationOptions {
            foreign_key: list(settings.get("FOREIGNKEY")),
            association_foreign_key: list(settings.get("ASSOCIATIONFOREIGNKEY")),
            polymorphic: non_empty(settings.get("POLYMORPHIC")),
            rel,
            many2many: non_empty(settings.get("MANY2MANY")),
        }
    }

    /// True if `many2many` or `rel:many_to_many` was given.
    pub fn is_many_to_many(&self) -> bool {
        self.many2many.is_some() || self.rel == Some(RelationKind::ManyToMany)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(String::from)
}

fn list(value: Option<&str>) -> Vec<String> {
    value
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
