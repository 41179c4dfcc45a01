use super::Field;

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Model fields
    pub(crate) fields: Vec<Field>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut fields = vec![];
        let mut errors = vec![];

        for node in node.named.iter() {
            match Field::from_ast(node) {
                Ok(field) => fields.push(field),
                Err(err) => errors.push(err),
            }
        }

        // Report every malformed field at once
        if let Some(err) = errors.into_iter().reduce(|mut all, err| {
            all.combine(err);
            all
        }) {
            return Err(err);
        }

        Ok(Self {
            ident: ast.ident.clone(),
            fields,
        })
    }
}
