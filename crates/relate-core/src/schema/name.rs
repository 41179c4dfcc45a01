use heck::{ToSnakeCase, ToUpperCamelCase};

/// Converts an identifier to its storage column name.
///
/// Word boundaries are found at lower-to-upper transitions, at the end of an
/// upper-case run (`HTTPServer` → `http_server`), and after a digit followed
/// by an upper-case letter (`MyStruct2ID` → `my_struct2_id`). The output is a
/// fixed point: converting a column name again returns it unchanged.
pub fn to_column_name(ident: &str) -> String {
    ident.to_snake_case()
}

/// The foreign key column another model uses to reference `owner` by its
/// primary key column `pk_column`.
///
/// `("MyStruct", "id")` gives `my_struct_id`; `("MyStruct", "uuid")` gives
/// `my_struct_uuid`.
pub fn default_foreign_key_name(owner: &str, pk_column: &str) -> String {
    format!("{}_{}", to_column_name(owner), to_column_name(pk_column))
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = to_column_name(src);
        let parts = snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    /// Snake case with the last word singularized (`user_roles` → `user_role`).
    pub fn singular(&self) -> String {
        self.inflect_last(1)
    }

    /// Snake case with the last word pluralized (`user_role` → `user_roles`).
    pub fn plural(&self) -> String {
        self.inflect_last(2)
    }

    fn inflect_last(&self, count: isize) -> String {
        let Some((last, init)) = self.parts.split_last() else {
            return String::new();
        };

        let mut parts = init.to_vec();
        parts.push(pluralizer::pluralize(last, count, false));
        parts.join("_")
    }
}

impl From<&str> for Name {
    fn from(src: &str) -> Self {
        Name::new(src)
    }
}
