extern crate proc_macro;

use proc_macro::TokenStream;

/// Derives `actix_web::ResponseError` for an endpoint error enum. Variants
/// default to 500; a variant carrying `#[status_code(BAD_REQUEST)]` (any
/// associated constant of `actix_web::http::StatusCode`) answers with that
/// status instead. Bodies serialize the error chain as
/// `presence_web_core::ErrorDesc`.
#[proc_macro_derive(ApiError, attributes(status_code))]
pub fn derive_response_error(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let name = input.ident;

    let status_arms: Vec<proc_macro2::TokenStream> = match &input.data {
        syn::Data::Enum(data) => data
            .variants
            .iter()
            .filter_map(|variant| {
                variant
                    .attrs
                    .iter()
                    .find(|attr| attr.path.is_ident("status_code"))
                    .map(|attr| (variant, attr))
            })
            .map(|(variant, attr)| {
                let variant_name = &variant.ident;
                let code: syn::Ident = attr
                    .parse_args()
                    .expect("status_code expects a StatusCode constant name");
                let pattern = match &variant.fields {
                    syn::Fields::Unit => quote::quote! { Self::#variant_name },
                    syn::Fields::Unnamed(_) => quote::quote! { Self::#variant_name(..) },
                    syn::Fields::Named(_) => quote::quote! { Self::#variant_name{..} },
                };
                quote::quote! {
                    #pattern => ::actix_web::http::StatusCode::#code,
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    TokenStream::from(quote::quote! {
        impl ::actix_web::ResponseError for #name {
            fn status_code(&self) -> ::actix_web::http::StatusCode {
                #[allow(unreachable_patterns)]
                match self {
                    #(#status_arms)*
                    _ => ::actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                }
            }

            fn error_response(&self) -> ::actix_web::web::HttpResponse<::actix_web::body::Body> {
                ::actix_web::web::HttpResponse::build(self.status_code())
                    .json(::presence_web_core::ErrorDesc::from(self as &dyn std::error::Error))
            }
        }
    })
}
