//! Example user service resolved into a route table.
//!
//! Run with `RUST_LOG=debug` to see each endpoint as it is resolved.

#![allow(dead_code, unused_variables)]

use autoroute::prelude::*;
use autoroute::ConventionError;

// --- Domain types ---

pub struct Uuid;

pub struct CreateUserDto {
    pub name: String,
    pub email: String,
}

pub struct UserService;

#[dynamic_api]
impl UserService {
    pub fn get(&self, id: Uuid) {}

    pub fn get_by_ids(&self, ids: Vec<Uuid>) {}

    pub async fn get_list_async(&self, skip: u32, take: u32) {}

    pub fn create(&self, input: CreateUserDto) {}

    pub fn update_batch(&self, inputs: Vec<CreateUserDto>) {}

    pub fn delete(&self, id: Uuid) {}

    pub async fn revoke_async(&self, id: Uuid) {}

    pub async fn get_editors_async(&self, id: Uuid) {}

    pub async fn create_editor_async(&self, id: Uuid, editor_id: Uuid) {}

    pub async fn update_editor_async(&self, id: Uuid, editor_id: Uuid, input: CreateUserDto) {}

    #[route(
        method = "PUT",
        path = "api/[controller]/{id:guid}/[action]/{editor_id}/my-editor/{subeditor_id}"
    )]
    pub async fn update_editor_my_name_async(
        &self,
        id: Uuid,
        editor_id: Uuid,
        subeditor_id: Uuid,
        input: CreateUserDto,
    ) {
    }
}

pub struct BookService;

#[dynamic_api]
impl BookService {
    pub async fn get_current_user_books_async(&self) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ConventionConfig::default();
    let registry = ApiRegistry::new()
        .register::<UserService>()
        .register::<BookService>();

    let actions = match registry.resolve_checked(&config) {
        Ok(actions) => actions,
        Err(err @ ConventionError::DuplicateRoute { .. }) => {
            tracing::error!(%err, "route table has collisions");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    for action in &actions {
        for endpoint in &action.endpoints {
            println!(
                "{:<7} /{:<70} {}::{}",
                endpoint.verb.as_str(),
                endpoint.template,
                action.declaring_type,
                action.method_name
            );
        }
    }

    let spec = OpenApiBuilder::new()
        .title("User API")
        .version("1.0.0")
        .add_registry(&registry, &config)?
        .build();
    println!("{}", serde_json::to_string_pretty(&spec)?);

    Ok(())
}
