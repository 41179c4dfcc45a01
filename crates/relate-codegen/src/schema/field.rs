use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field name as written, without any `r#` prefix
    pub(crate) name: String,

    /// Declared type
    pub(crate) ty: syn::Type,

    /// Contents of the `#[relate("...")]` attributes, joined with `;`
    pub(crate) annotation: Option<String>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut segments = vec![];

        for attr in &field.attrs {
            if !attr.path().is_ident("relate") {
                continue;
            }

            let lit: syn::LitStr = attr.parse_args().map_err(|_| {
                syn::Error::new_spanned(
                    attr,
                    "expected #[relate(\"key:value;...\")], e.g. #[relate(\"column:my_id\")]",
                )
            })?;

            segments.push(lit.value());
        }

        let annotation = if segments.is_empty() {
            None
        } else {
            Some(segments.join(";"))
        };

        Ok(Self {
            name: ident.unraw().to_string(),
            ty: field.ty.clone(),
            annotation,
        })
    }
}
