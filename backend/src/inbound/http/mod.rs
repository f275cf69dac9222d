//! HTTP inbound adapter exposing the user REST endpoints.

use actix_web::web;

pub mod error;
pub mod state;
pub mod users;

pub use error::ApiResult;

/// Register the user routes on an actix application or scope.
///
/// `POST /users`, `GET /users/{id}` and `PUT /users/{id}`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::configure_routes;
///
/// let _app = App::new().configure(configure_routes);
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::get_user)
        .service(users::update_user);
}
