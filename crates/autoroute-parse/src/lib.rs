//! Shared parsing utilities for autoroute proc macros.
//!
//! This crate turns an impl block into the [`MethodCandidate`]s the convention
//! engine consumes: method names, parameter names and types, and any explicit
//! `#[route(...)]` / `#[param(...)]` metadata.

use autoroute_core::{
    BindingSource, ExistingSelector, HttpVerb, MethodCandidate, ParameterInfo, TypeDescriptor,
};
use heck::ToUpperCamelCase;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{FnArg, GenericArgument, Ident, ImplItem, ImplItemFn, ItemImpl, Pat, PathArguments, Type};

/// Per-method `#[route(...)]` metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteAttrs {
    /// `#[route(skip)]`: not an endpoint.
    pub skip: bool,
    /// One selector per `#[route(path = ..., method = ...)]` attribute.
    pub selectors: Vec<ExistingSelector>,
}

/// Per-parameter `#[param(...)]` metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamAttrs {
    pub binding: Option<BindingSource>,
    /// `#[param(scalar)]`: treat a named type (usually an enum) as a simple value.
    pub scalar: bool,
}

/// Parse `#[route(...)]` attributes from a method.
pub fn parse_route_attrs(attrs: &[syn::Attribute]) -> syn::Result<RouteAttrs> {
    let mut result = RouteAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("route") {
            continue;
        }

        let mut selector = ExistingSelector::default();
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                result.skip = true;
                Ok(())
            } else if meta.path.is_ident("path") {
                let value: syn::LitStr = meta.value()?.parse()?;
                selector.template = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("method") {
                let value: syn::LitStr = meta.value()?.parse()?;
                let verb: HttpVerb = value
                    .value()
                    .parse()
                    .map_err(|e| syn::Error::new_spanned(&value, e))?;
                selector.verb = Some(verb);
                Ok(())
            } else {
                Err(meta.error(
                    "unknown attribute\n\
                     \n\
                     Valid attributes: path, method, skip\n\
                     \n\
                     Examples:\n\
                     - #[route(method = \"PUT\")]\n\
                     - #[route(path = \"api/[controller]/{id}/[action]\")]\n\
                     - #[route(skip)]",
                ))
            }
        })?;

        if !selector.is_empty() {
            result.selectors.push(selector);
        }
    }

    Ok(result)
}

/// Parse `#[param(...)]` attributes from a parameter.
pub fn parse_param_attrs(attrs: &[syn::Attribute]) -> syn::Result<ParamAttrs> {
    let mut result = ParamAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("param") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let binding = if meta.path.is_ident("query") {
                BindingSource::Query
            } else if meta.path.is_ident("path") {
                BindingSource::Path
            } else if meta.path.is_ident("body") {
                BindingSource::Body
            } else if meta.path.is_ident("header") {
                BindingSource::Header
            } else if meta.path.is_ident("scalar") {
                result.scalar = true;
                return Ok(());
            } else {
                return Err(meta.error(
                    "unknown attribute\n\
                     \n\
                     Valid attributes: query, path, body, header, scalar\n\
                     \n\
                     Examples:\n\
                     - #[param(query)]\n\
                     - #[param(header)]\n\
                     - #[param(scalar)] for enums bound from path or query",
                ));
            };

            if result.binding.is_some_and(|existing| existing != binding) {
                return Err(meta.error("conflicting binding sources on one parameter"));
            }
            result.binding = Some(binding);
            Ok(())
        })?;
    }

    Ok(result)
}

/// Describe a Rust type for the parameter classifier.
pub fn type_descriptor(ty: &Type) -> TypeDescriptor {
    match ty {
        Type::Reference(r) => type_descriptor(&r.elem),
        Type::Paren(p) => type_descriptor(&p.elem),
        Type::Group(g) => type_descriptor(&g.elem),
        Type::Slice(s) => TypeDescriptor::array(type_descriptor(&s.elem)),
        Type::Array(a) => TypeDescriptor::array(type_descriptor(&a.elem)),
        Type::Tuple(t) => TypeDescriptor::Tuple(t.elems.iter().map(type_descriptor).collect()),
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return TypeDescriptor::object(type_name(ty));
            };
            let ident = segment.ident.to_string();
            let inner = first_type_argument(&segment.arguments);

            match (ident.as_str(), inner) {
                ("Option", Some(inner)) => TypeDescriptor::nullable(type_descriptor(inner)),
                (
                    "Vec" | "VecDeque" | "LinkedList" | "HashSet" | "BTreeSet" | "IndexSet",
                    Some(inner),
                ) => TypeDescriptor::array(type_descriptor(inner)),
                ("Box" | "Arc" | "Rc" | "Cow", Some(inner)) => type_descriptor(inner),
                ("bool", _) => TypeDescriptor::Bool,
                ("char", _) => TypeDescriptor::Char,
                (
                    "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
                    | "u128" | "usize",
                    _,
                ) => TypeDescriptor::Integer,
                ("NonZeroU32" | "NonZeroU64" | "NonZeroUsize" | "NonZeroI32" | "NonZeroI64", _) => {
                    TypeDescriptor::Integer
                }
                ("f32" | "f64", _) => TypeDescriptor::Float,
                ("Decimal" | "BigDecimal", _) => TypeDescriptor::Decimal,
                ("String" | "str", _) => TypeDescriptor::String,
                ("Uuid", _) => TypeDescriptor::Uuid,
                (
                    "DateTime" | "NaiveDate" | "NaiveDateTime" | "NaiveTime" | "Date" | "Time"
                    | "OffsetDateTime" | "PrimitiveDateTime" | "SystemTime" | "Instant"
                    | "Duration",
                    _,
                ) => TypeDescriptor::DateTime,
                _ => TypeDescriptor::object(ident),
            }
        }
        other => TypeDescriptor::object(type_name(other)),
    }
}

fn first_type_argument(args: &PathArguments) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = args {
        return args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        });
    }
    None
}

fn type_name(ty: &Type) -> String {
    ty.to_token_stream().to_string()
}

/// Parse one method into a candidate.
///
/// Returns `None` for methods that are not endpoints: associated functions
/// without a `self` receiver, names starting with `_`, and `#[route(skip)]`.
pub fn parse_method(type_name: &str, method: &ImplItemFn) -> syn::Result<Option<MethodCandidate>> {
    let has_receiver = method
        .sig
        .inputs
        .iter()
        .any(|arg| matches!(arg, FnArg::Receiver(_)));
    let name = method.sig.ident.unraw().to_string();
    if !has_receiver || name.starts_with('_') {
        return Ok(None);
    }

    let route = parse_route_attrs(&method.attrs)?;
    if route.skip {
        return Ok(None);
    }

    let mut candidate = MethodCandidate::new(type_name, name.to_upper_camel_case());
    candidate.selectors = route.selectors;

    for arg in &method.sig.inputs {
        let FnArg::Typed(pat_type) = arg else {
            continue;
        };
        let param_name = match pat_type.pat.as_ref() {
            Pat::Ident(pat_ident) => pat_ident.ident.unraw().to_string(),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "unsupported parameter pattern\n\
                     \n\
                     autoroute needs a plain parameter name to build routes.\n\
                     Use: id: u64\n\
                     Not: (a, b): (u64, u64) or &id: &u64",
                ));
            }
        };

        let attrs = parse_param_attrs(&pat_type.attrs)?;
        let ty = if attrs.scalar {
            TypeDescriptor::enumeration(scalar_name(&pat_type.ty))
        } else {
            type_descriptor(&pat_type.ty)
        };

        let mut param = ParameterInfo::new(param_name, ty);
        param.binding = attrs.binding;
        candidate.parameters.push(param);
    }

    Ok(Some(candidate))
}

fn scalar_name(ty: &Type) -> String {
    match ty {
        Type::Reference(r) => scalar_name(&r.elem),
        Type::Path(p) => p
            .path
            .segments
            .last()
            .map(|s| s.ident.to_string())
            .unwrap_or_else(|| type_name(ty)),
        other => type_name(other),
    }
}

/// Extract candidates for every endpoint method in an impl block.
pub fn extract_candidates(impl_block: &ItemImpl, type_name: &str) -> syn::Result<Vec<MethodCandidate>> {
    let mut candidates = Vec::new();

    for item in &impl_block.items {
        if let ImplItem::Fn(method) = item
            && let Some(candidate) = parse_method(type_name, method)?
        {
            candidates.push(candidate);
        }
    }

    Ok(candidates)
}

/// Get the type name from an impl block
pub fn get_impl_name(impl_block: &ItemImpl) -> syn::Result<Ident> {
    if let Type::Path(type_path) = impl_block.self_ty.as_ref()
        && let Some(segment) = type_path.path.segments.last()
    {
        return Ok(segment.ident.clone());
    }
    Err(syn::Error::new_spanned(
        &impl_block.self_ty,
        "Expected a simple type name",
    ))
}

/// Remove `#[route]` and `#[param]` helper attributes so the impl block compiles.
pub fn strip_helper_attrs(impl_block: &mut ItemImpl) {
    for item in &mut impl_block.items {
        if let ImplItem::Fn(method) = item {
            method.attrs.retain(|attr| !attr.path().is_ident("route"));
            for arg in &mut method.sig.inputs {
                if let FnArg::Typed(pat_type) = arg {
                    pat_type.attrs.retain(|attr| !attr.path().is_ident("param"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_type_descriptors() {
        let cases: Vec<(Type, TypeDescriptor)> = vec![
            (parse_quote!(u64), TypeDescriptor::Integer),
            (parse_quote!(&str), TypeDescriptor::String),
            (parse_quote!(String), TypeDescriptor::String),
            (parse_quote!(uuid::Uuid), TypeDescriptor::Uuid),
            (parse_quote!(chrono::DateTime<Utc>), TypeDescriptor::DateTime),
            (parse_quote!(Option<i32>), TypeDescriptor::nullable(TypeDescriptor::Integer)),
            (parse_quote!(Vec<u8>), TypeDescriptor::array(TypeDescriptor::Integer)),
            (parse_quote!(&[String]), TypeDescriptor::array(TypeDescriptor::String)),
            (parse_quote!([f64; 3]), TypeDescriptor::array(TypeDescriptor::Float)),
            (parse_quote!(Cow<'a, str>), TypeDescriptor::String),
            (parse_quote!(Box<CreateUserDto>), TypeDescriptor::object("CreateUserDto")),
            (
                parse_quote!((i32, String)),
                TypeDescriptor::Tuple(vec![TypeDescriptor::Integer, TypeDescriptor::String]),
            ),
            (parse_quote!(CreateUserDto), TypeDescriptor::object("CreateUserDto")),
            (
                parse_quote!(HashMap<String, String>),
                TypeDescriptor::object("HashMap"),
            ),
        ];
        for (ty, expected) in cases {
            assert_eq!(type_descriptor(&ty), expected, "{}", type_name(&ty));
        }
    }

    #[test]
    fn test_extract_candidates() {
        let impl_block: ItemImpl = parse_quote! {
            impl UserService {
                pub fn new() -> Self { Self }
                pub fn get(&self, id: u64) -> u64 { id }
                pub async fn update_editor_async(&self, id: Uuid, editor_id: Uuid, input: CreateUserDto) {}
                fn _helper(&self) {}
                #[route(skip)]
                pub fn internal(&self) {}
            }
        };

        let candidates = extract_candidates(&impl_block, "UserService").unwrap();
        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates[0].declaring_type, "UserService");
        assert_eq!(candidates[0].method_name, "Get");
        assert_eq!(candidates[0].parameters[0].name, "id");
        assert_eq!(candidates[0].parameters[0].ty, TypeDescriptor::Integer);

        assert_eq!(candidates[1].method_name, "UpdateEditorAsync");
        let names: Vec<_> = candidates[1].parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["id", "editor_id", "input"]);
        assert_eq!(
            candidates[1].parameters[2].ty,
            TypeDescriptor::object("CreateUserDto")
        );
    }

    #[test]
    fn test_route_attrs() {
        let method: ImplItemFn = parse_quote! {
            #[route(method = "put", path = "api/[controller]/{id}/[action]")]
            #[route(method = "POST")]
            pub fn rename(&self, id: u64) {}
        };
        let candidate = parse_method("UserService", &method).unwrap().unwrap();
        assert_eq!(
            candidate.selectors,
            vec![
                ExistingSelector::template("api/[controller]/{id}/[action]").with_verb(HttpVerb::Put),
                ExistingSelector::verb(HttpVerb::Post),
            ]
        );
    }

    #[test]
    fn test_route_attr_rejects_unknown_verb() {
        let method: ImplItemFn = parse_quote! {
            #[route(method = "FETCH")]
            pub fn load(&self) {}
        };
        let err = parse_method("UserService", &method).unwrap_err();
        assert!(err.to_string().contains("Unknown HTTP verb"));
    }

    #[test]
    fn test_route_attr_rejects_unknown_key() {
        let method: ImplItemFn = parse_quote! {
            #[route(verb = "GET")]
            pub fn load(&self) {}
        };
        let err = parse_method("UserService", &method).unwrap_err();
        assert!(err.to_string().contains("Valid attributes: path, method, skip"));
    }

    #[test]
    fn test_param_attrs() {
        let method: ImplItemFn = parse_quote! {
            pub fn create(
                &self,
                #[param(header)] tenant: String,
                #[param(query)] input: CreateUserDto,
                #[param(scalar)] status: Status,
            ) {}
        };
        let candidate = parse_method("UserService", &method).unwrap().unwrap();
        assert_eq!(candidate.parameters[0].binding, Some(BindingSource::Header));
        assert_eq!(candidate.parameters[1].binding, Some(BindingSource::Query));
        assert_eq!(candidate.parameters[2].binding, None);
        assert_eq!(candidate.parameters[2].ty, TypeDescriptor::enumeration("Status"));
    }

    #[test]
    fn test_param_attrs_conflict() {
        let method: ImplItemFn = parse_quote! {
            pub fn create(&self, #[param(query, body)] input: CreateUserDto) {}
        };
        assert!(parse_method("UserService", &method).is_err());
    }

    #[test]
    fn test_unsupported_pattern() {
        let method: ImplItemFn = parse_quote! {
            pub fn create(&self, (a, b): (u32, u32)) {}
        };
        let err = parse_method("UserService", &method).unwrap_err();
        assert!(err.to_string().contains("unsupported parameter pattern"));
    }

    #[test]
    fn test_raw_identifiers() {
        let method: ImplItemFn = parse_quote! {
            pub fn r#move(&self, r#type: String) {}
        };
        let candidate = parse_method("UserService", &method).unwrap().unwrap();
        assert_eq!(candidate.method_name, "Move");
        assert_eq!(candidate.parameters[0].name, "type");
    }

    #[test]
    fn test_strip_helper_attrs() {
        let mut impl_block: ItemImpl = parse_quote! {
            impl UserService {
                #[route(method = "PUT")]
                #[inline]
                pub fn rename(&self, #[param(path)] id: u64) {}
            }
        };
        strip_helper_attrs(&mut impl_block);
        let ImplItem::Fn(method) = &impl_block.items[0] else {
            panic!("expected a method");
        };
        assert_eq!(method.attrs.len(), 1);
        assert!(method.attrs[0].path().is_ident("inline"));
        let FnArg::Typed(param) = &method.sig.inputs[1] else {
            panic!("expected a typed parameter");
        };
        assert!(param.attrs.is_empty());
    }

    #[test]
    fn test_get_impl_name() {
        let impl_block: ItemImpl = parse_quote! { impl crate::services::UserService {} };
        assert_eq!(get_impl_name(&impl_block).unwrap(), "UserService");
    }
}
