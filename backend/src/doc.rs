//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user endpoints from the inbound layer together
//! with the `User` and `UserDraft` schemas. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` exports it for tooling.

use utoipa::OpenApi;

use crate::domain::{User, UserDraft};

/// OpenAPI document for the user records API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User records API",
        description = "Create, fetch and update user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
    ),
    components(schemas(User, UserDraft)),
    tags(
        (name = "users", description = "Operations related to users")
    )
)]
pub struct ApiDoc;
