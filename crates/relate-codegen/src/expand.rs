use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

pub(super) fn model(model: &Model) -> TokenStream {
    let relate = quote!(_relate::codegen_support);
    let model_ident = &model.ident;
    let model_name = model_ident.unraw().to_string();

    let fields = model.fields.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        let annotation = field
            .annotation
            .as_ref()
            .map(|annotation| quote!(.annotation(#annotation)));

        quote! {
            .field(
                #relate::FieldDescriptor::new(
                    #name,
                    <#ty as #relate::FieldType>::shape(),
                )
                #annotation
            )
        }
    });

    wrap_in_const(quote! {
        impl #relate::Model for #model_ident {
            fn describe() -> #relate::ModelDescriptor {
                #relate::ModelDescriptor::new(#model_name)
                    #( #fields )*
            }
        }

        impl #relate::FieldType for #model_ident {
            fn shape() -> #relate::Shape {
                #relate::Shape::one(<#model_ident as #relate::Model>::model_ref())
            }
        }
    })
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use relate as _relate;
            #code
        };
    }
}
