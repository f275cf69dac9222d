//! Users API handlers.
//!
//! ```text
//! POST /users        {"first_name":"John","last_name":"Doe","email":"john@example.com"}
//! GET  /users/{id}
//! PUT  /users/{id}   {"first_name":"Jane","last_name":"Doe","email":"jane@example.com"}
//! ```
//!
//! Bodies are decoded by hand rather than through `web::Json` so malformed
//! input produces the same plain-text 400 as every other validation failure.

use actix_web::{HttpResponse, get, post, put, web};
use tracing::{Instrument, debug, error, info};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Error, ErrorCode, Lookup, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const INVALID_ID: &str = "Invalid user ID";
const INVALID_BODY: &str = "Failed to parse user data";
const NOT_FOUND: &str = "User not found";
const CREATE_FAILED: &str = "Failed to create user";
const FETCH_FAILED: &str = "Failed to fetch user";
const UPDATE_FAILED: &str = "Failed to update user";

fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    raw.parse::<UserId>().map_err(|err| {
        debug!(error = %err, "rejected user id");
        Error::with_cause(ErrorCode::InvalidRequest, INVALID_ID, err)
    })
}

fn decode_draft(body: &[u8]) -> ApiResult<UserDraft> {
    serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "rejected user payload");
        Error::with_cause(ErrorCode::InvalidRequest, INVALID_BODY, err)
    })
}

fn store_failure(prefix: &str, user_id: Option<UserId>, err: UserPersistenceError) -> Error {
    match user_id {
        Some(id) => error!(user_id = %id, error = %err, "{prefix}"),
        None => error!(error = %err, "{prefix}"),
    }
    Error::with_cause(ErrorCode::InternalError, prefix, err)
}

fn not_found(user_id: UserId) -> Error {
    info!(user_id = %user_id, "user not found");
    Error::not_found(NOT_FOUND)
}

/// Create a user; the store assigns its identity.
///
/// Any `id` in the body is ignored. Unknown fields are ignored and missing
/// fields default to empty strings.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserDraft,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed body", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let span = state.operation_span("create_user");
    async move {
        let draft = decode_draft(&body)?;
        let user = state
            .users
            .create(&draft)
            .await
            .map_err(|err| store_failure(CREATE_FAILED, None, err))?;
        info!(user_id = %user.id, "user created");
        Ok(HttpResponse::Created().json(user))
    }
    .instrument(span)
    .await
}

/// Fetch a user by identity.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identity")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Malformed id", body = String, content_type = "text/plain"),
        (status = 404, description = "No such user", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let span = state.operation_span("get_user");
    async move {
        let id = parse_user_id(&path)?;
        match state
            .users
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(FETCH_FAILED, Some(id), err))?
        {
            Lookup::Found(user) => Ok(web::Json(user)),
            Lookup::NotFound => Err(not_found(id)),
        }
    }
    .instrument(span)
    .await
}

/// Overwrite a user's fields; the path id wins over any id in the body.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identity")),
    request_body = UserDraft,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Malformed id or body", body = String, content_type = "text/plain"),
        (status = 404, description = "No such user", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let span = state.operation_span("update_user");
    async move {
        let id = parse_user_id(&path)?;
        let user = User::new(id, decode_draft(&body)?);
        match state
            .users
            .update(&user)
            .await
            .map_err(|err| store_failure(UPDATE_FAILED, Some(id), err))?
        {
            Lookup::Found(updated) => {
                info!(user_id = %id, "user updated");
                Ok(web::Json(updated))
            }
            Lookup::NotFound => Err(not_found(id)),
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests;
