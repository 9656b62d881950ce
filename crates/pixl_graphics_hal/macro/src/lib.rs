use darling::{ast, util, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::{quote, ToTokens};

/// Derives `pixl_graphics_hal::vertex::Vertex` for a `#[repr(C)]` struct.
///
/// Every field becomes a shader attribute named after the field, unless
/// renamed with `#[vertex(name = "...")]` or skipped with `#[vertex(skip)]`.
#[proc_macro_derive(Vertex, attributes(vertex))]
pub fn vertex_derive(input: TokenStream) -> TokenStream {
    let input = match syn::parse2(input.into()) {
        Ok(input) => input,
        Err(e) => return e.to_compile_error().into(),
    };

    match Vertex::from_derive_input(&input) {
        Ok(vertex) => quote!(#vertex).into(),
        Err(e) => e.write_errors().into(),
    }
}

#[derive(Debug, FromField)]
#[darling(attributes(vertex))]
struct VertexField {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    skip: bool,
}

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named))]
struct Vertex {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<util::Ignored, VertexField>,
}

impl ToTokens for Vertex {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let Vertex {
            ref ident,
            ref generics,
            ref data,
        } = *self;

        let (imp, ty, wher) = generics.split_for_impl();

        let fields = match data.as_ref().take_struct() {
            Some(fields) => fields.fields,
            None => return,
        };

        let attributes = fields
            .into_iter()
            .filter(|field| !field.skip)
            .filter_map(|field| {
                let field_ident = field.ident.as_ref()?;
                let field_ty = &field.ty;

                let name = field
                    .name
                    .clone()
                    .unwrap_or_else(|| field_ident.to_string());

                // Resolved at compile time to the byte offset of the field
                let offset = quote! {
                    {
                        let uninit = core::mem::MaybeUninit::<#ident>::uninit();
                        let base = uninit.as_ptr();
                        let field = unsafe { core::ptr::addr_of!((*base).#field_ident) };

                        unsafe { (field as *const u8).offset_from(base as *const u8) as usize }
                    }
                };

                Some(quote! {
                    pixl_graphics_hal::vertex::VertexAttribute {
                        name: #name,
                        offset: #offset,
                        kind: <#field_ty as pixl_graphics_hal::vertex::AsAttributeKind>::KIND,
                        size: <#field_ty as pixl_graphics_hal::vertex::AsAttributeKind>::SIZE,
                    }
                })
            });

        tokens.extend(quote! {
            impl #imp pixl_graphics_hal::vertex::Vertex for #ident #ty #wher {
                const FORMAT: &'static [pixl_graphics_hal::vertex::VertexAttribute] = &[
                    #(#attributes,)*
                ];
            }
        });
    }
}
