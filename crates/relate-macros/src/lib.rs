extern crate proc_macro;

use proc_macro::TokenStream;

/// Implements `Model` and `FieldType` for a struct with named fields.
///
/// Per-field overrides go in `#[relate("key:value;...")]`, for example
/// `#[relate("column:my_id")]` or `#[relate("rel:belongs_to;foreignkey:ParentKey")]`.
#[proc_macro_derive(Model, attributes(relate))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    match relate_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
