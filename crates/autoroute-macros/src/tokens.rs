//! Candidate values rendered as constructor expressions.

use autoroute_core::{
    BindingSource, ExistingSelector, HttpVerb, MethodCandidate, ParameterInfo, TypeDescriptor,
};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

pub(crate) fn candidate_tokens(candidate: &MethodCandidate) -> TokenStream2 {
    let declaring_type = &candidate.declaring_type;
    let method_name = &candidate.method_name;
    let params = candidate.parameters.iter().map(parameter_tokens);
    let selectors = candidate.selectors.iter().map(selector_tokens);

    quote! {
        ::autoroute::MethodCandidate::new(#declaring_type, #method_name)
            #(.with_parameter(#params))*
            #(.selector(#selectors))*
    }
}

fn parameter_tokens(param: &ParameterInfo) -> TokenStream2 {
    let name = &param.name;
    let ty = type_tokens(&param.ty);
    match param.binding {
        Some(binding) => {
            let binding = binding_tokens(binding);
            quote! { ::autoroute::ParameterInfo::new(#name, #ty).with_binding(#binding) }
        }
        None => quote! { ::autoroute::ParameterInfo::new(#name, #ty) },
    }
}

fn selector_tokens(selector: &ExistingSelector) -> TokenStream2 {
    let template = match &selector.template {
        Some(t) => quote! { ::std::option::Option::Some(::std::string::String::from(#t)) },
        None => quote! { ::std::option::Option::None },
    };
    let verb = match selector.verb {
        Some(v) => {
            let v = verb_tokens(v);
            quote! { ::std::option::Option::Some(#v) }
        }
        None => quote! { ::std::option::Option::None },
    };
    let has_other_metadata = selector.has_other_metadata;

    quote! {
        ::autoroute::ExistingSelector {
            template: #template,
            verb: #verb,
            has_other_metadata: #has_other_metadata,
        }
    }
}

fn verb_tokens(verb: HttpVerb) -> TokenStream2 {
    match verb {
        HttpVerb::Get => quote! { ::autoroute::HttpVerb::Get },
        HttpVerb::Post => quote! { ::autoroute::HttpVerb::Post },
        HttpVerb::Put => quote! { ::autoroute::HttpVerb::Put },
        HttpVerb::Patch => quote! { ::autoroute::HttpVerb::Patch },
        HttpVerb::Delete => quote! { ::autoroute::HttpVerb::Delete },
        HttpVerb::Head => quote! { ::autoroute::HttpVerb::Head },
        HttpVerb::Options => quote! { ::autoroute::HttpVerb::Options },
    }
}

fn binding_tokens(binding: BindingSource) -> TokenStream2 {
    match binding {
        BindingSource::Path => quote! { ::autoroute::BindingSource::Path },
        BindingSource::Body => quote! { ::autoroute::BindingSource::Body },
        BindingSource::Query => quote! { ::autoroute::BindingSource::Query },
        BindingSource::Header => quote! { ::autoroute::BindingSource::Header },
    }
}

fn type_tokens(ty: &TypeDescriptor) -> TokenStream2 {
    match ty {
        TypeDescriptor::Bool => quote! { ::autoroute::TypeDescriptor::Bool },
        TypeDescriptor::Char => quote! { ::autoroute::TypeDescriptor::Char },
        TypeDescriptor::Integer => quote! { ::autoroute::TypeDescriptor::Integer },
        TypeDescriptor::Float => quote! { ::autoroute::TypeDescriptor::Float },
        TypeDescriptor::Decimal => quote! { ::autoroute::TypeDescriptor::Decimal },
        TypeDescriptor::String => quote! { ::autoroute::TypeDescriptor::String },
        TypeDescriptor::DateTime => quote! { ::autoroute::TypeDescriptor::DateTime },
        TypeDescriptor::Uuid => quote! { ::autoroute::TypeDescriptor::Uuid },
        TypeDescriptor::Enum(name) => quote! { ::autoroute::TypeDescriptor::enumeration(#name) },
        TypeDescriptor::Object(name) => quote! { ::autoroute::TypeDescriptor::object(#name) },
        TypeDescriptor::Nullable(inner) => {
            let inner = type_tokens(inner);
            quote! { ::autoroute::TypeDescriptor::nullable(#inner) }
        }
        TypeDescriptor::Array(inner) => {
            let inner = type_tokens(inner);
            quote! { ::autoroute::TypeDescriptor::array(#inner) }
        }
        TypeDescriptor::Tuple(items) => {
            let items = items.iter().map(type_tokens);
            quote! { ::autoroute::TypeDescriptor::Tuple(::std::vec![#(#items),*]) }
        }
    }
}
