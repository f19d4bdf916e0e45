//! `#[dynamic_api]` expansion.

use autoroute_parse::{extract_candidates, get_impl_name, strip_helper_attrs};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ItemImpl, Token, parse::Parse};

use crate::tokens::candidate_tokens;

/// Arguments for the #[dynamic_api] attribute
#[derive(Default)]
pub(crate) struct DynamicApiArgs {
    /// Declaring type name used for routes (defaults to the impl's type name)
    pub name: Option<String>,
}

impl Parse for DynamicApiArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut args = DynamicApiArgs::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: syn::LitStr = input.parse()?;
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`name` must not be empty"));
                    }
                    args.name = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!(
                            "unknown argument `{other}`\n\
                             Valid arguments: name\n\
                             Examples:\n\
                             - #[dynamic_api]\n\
                             - #[dynamic_api(name = \"UserService\")]"
                        ),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

pub(crate) fn expand_dynamic_api(
    args: DynamicApiArgs,
    mut impl_block: ItemImpl,
) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &impl_block.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[dynamic_api] expects an inherent impl block\n\
             \n\
             Use: #[dynamic_api] impl UserService { ... }\n\
             Not: #[dynamic_api] impl SomeTrait for UserService { ... }",
        ));
    }

    let type_name = match args.name {
        Some(name) => name,
        None => get_impl_name(&impl_block)?.to_string(),
    };
    let candidates = extract_candidates(&impl_block, &type_name)?;
    strip_helper_attrs(&mut impl_block);

    let self_ty = &impl_block.self_ty;
    let (impl_generics, _, where_clause) = impl_block.generics.split_for_impl();
    let candidate_exprs = candidates.iter().map(candidate_tokens);

    Ok(quote! {
        #impl_block

        impl #impl_generics ::autoroute::DynamicApi for #self_ty #where_clause {
            fn method_candidates() -> ::std::vec::Vec<::autoroute::MethodCandidate> {
                ::std::vec![#(#candidate_exprs),*]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_args_parse() {
        let args: DynamicApiArgs = syn::parse_str(r#"name = "AccountService""#).unwrap();
        assert_eq!(args.name.as_deref(), Some("AccountService"));

        let args: DynamicApiArgs = syn::parse_str("").unwrap();
        assert!(args.name.is_none());
    }

    #[test]
    fn test_args_reject_unknown() {
        let err = syn::parse_str::<DynamicApiArgs>(r#"prefix = "api""#)
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown argument `prefix`"));
    }

    #[test]
    fn test_expand_emits_trait_impl() {
        let impl_block: ItemImpl = parse_quote! {
            impl UserService {
                #[route(method = "PUT")]
                pub fn rename(&self, id: u64, #[param(query)] name: String) {}
            }
        };
        let output = expand_dynamic_api(DynamicApiArgs::default(), impl_block)
            .unwrap()
            .to_string();
        assert!(output.contains(":: autoroute :: DynamicApi for UserService"));
        assert!(output.contains("\"Rename\""));
        assert!(!output.contains("# [route"));
        assert!(!output.contains("# [param"));
    }

    #[test]
    fn test_expand_rejects_trait_impl() {
        let impl_block: ItemImpl = parse_quote! {
            impl Service for UserService {}
        };
        assert!(expand_dynamic_api(DynamicApiArgs::default(), impl_block).is_err());
    }
}
