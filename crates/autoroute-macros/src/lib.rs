//! Proc macros for autoroute.
//!
//! `#[dynamic_api]` turns an impl block into a [`DynamicApi`] implementation
//! so the service can be handed to an `ApiRegistry`.
//!
//! [`DynamicApi`]: https://docs.rs/autoroute/latest/autoroute/trait.DynamicApi.html

use proc_macro::TokenStream;
use syn::{ItemImpl, parse_macro_input};

mod dynamic_api;
mod tokens;

/// Expose an impl block's methods as conventional endpoints.
///
/// # Basic Usage
///
/// ```ignore
/// use autoroute::dynamic_api;
///
/// #[dynamic_api]
/// impl UserService {
///     // PUT api/users/{id}
///     pub fn update(&self, id: u64, input: UpdateUserDto) { /* ... */ }
/// }
/// ```
///
/// # Declaring Type Override
///
/// ```ignore
/// // Routes are built from "AccountService" instead of the Rust type name.
/// #[dynamic_api(name = "AccountService")]
/// impl LegacyAccounts { /* ... */ }
/// ```
///
/// # Explicit Route Metadata
///
/// ```ignore
/// #[dynamic_api]
/// impl UserService {
///     // Pin the verb, keep the conventional template
///     #[route(method = "PUT")]
///     pub fn rename(&self, id: u64, name: String) { /* ... */ }
///
///     // Tokens are substituted: api/users/{id}/activate
///     #[route(method = "POST", path = "api/[controller]/{id}/[action]")]
///     pub fn activate(&self, id: u64) { /* ... */ }
///
///     // Not an endpoint
///     #[route(skip)]
///     pub fn cache_key(&self) -> String { /* ... */ }
///
///     // Explicit binding sources are never overridden
///     pub fn import(&self, #[param(header)] tenant: String, file: Upload) { /* ... */ }
/// }
/// ```
///
/// Methods without a `self` receiver, and methods whose name starts with `_`,
/// are not exposed.
///
/// # Generated Items
/// - the original impl block, with `#[route]` and `#[param]` removed
/// - `impl DynamicApi for T`, listing one `MethodCandidate` per exposed method
#[proc_macro_attribute]
pub fn dynamic_api(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as dynamic_api::DynamicApiArgs);
    let impl_block = parse_macro_input!(item as ItemImpl);

    match dynamic_api::expand_dynamic_api(args, impl_block) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
