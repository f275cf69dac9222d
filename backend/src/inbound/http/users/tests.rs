//! Handler tests driving a real actix application against repository doubles.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use tracing::Span;

use crate::domain::ports::{
    InMemoryUserRepository, MockUserRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Lookup, User, UserId};
use crate::inbound::http::configure_routes;
use crate::inbound::http::state::HttpState;

fn test_app(
    repo: Arc<dyn UserRepository>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(repo, Span::none())))
        .configure(configure_routes)
}

fn john() -> Value {
    json!({"first_name": "John", "last_name": "Doe", "email": "john@example.com"})
}

fn jane() -> Value {
    json!({"first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"})
}

async fn body_text(response: actix_web::dev::ServiceResponse) -> String {
    let bytes = actix_test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[actix_web::test]
async fn create_get_update_scenario() {
    let app = actix_test::init_service(test_app(Arc::new(InMemoryUserRepository::new()))).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(john())
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_body: Value = actix_test::read_body_json(created).await;
    assert_eq!(
        created_body,
        json!({"id": 1, "first_name": "John", "last_name": "Doe", "email": "john@example.com"})
    );

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users/1").to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched_body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(fetched_body, created_body);

    let updated = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/1")
            .set_json(jane())
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated_body: Value = actix_test::read_body_json(updated).await;
    assert_eq!(updated_body.get("first_name"), Some(&json!("Jane")));
    assert_eq!(updated_body.get("id"), Some(&json!(1)));
}

#[actix_web::test]
async fn create_ignores_body_id_and_unknown_fields() {
    let app = actix_test::init_service(test_app(Arc::new(InMemoryUserRepository::new()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "id": 42,
                "first_name": "John",
                "last_name": "Doe",
                "email": "john@example.com",
                "role": "admin"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .expect("content type")
        .to_str()
        .expect("ascii header")
        .to_owned();
    assert!(content_type.starts_with("application/json"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("id"), Some(&json!(1)));
    assert!(body.get("role").is_none());
}

#[rstest]
#[case("/users/999")]
#[case("/users/0")]
#[actix_web::test]
async fn get_unknown_user_is_not_found(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(Arc::new(InMemoryUserRepository::new()))).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "User not found");
}

#[actix_web::test]
async fn update_unknown_user_is_not_found() {
    let app = actix_test::init_service(test_app(Arc::new(InMemoryUserRepository::new()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/999")
            .set_json(jane())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "User not found");
}

#[rstest]
#[case("abc")]
#[case("1.5")]
#[case("9223372036854775808")]
#[actix_web::test]
async fn malformed_ids_never_reach_the_repository(#[case] raw_id: &str) {
    // A mock without expectations panics on any call.
    let app = actix_test::init_service(test_app(Arc::new(MockUserRepository::new()))).await;
    let uri = format!("/users/{raw_id}");

    let get = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(get.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(get).await.starts_with("Invalid user ID"));

    let put = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(jane())
            .to_request(),
    )
    .await;
    assert_eq!(put.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(put).await.starts_with("Invalid user ID"));
}

#[rstest]
#[case("not json")]
#[case("{\"first_name\": 7}")]
#[case("null")]
#[case("")]
#[actix_web::test]
async fn malformed_bodies_are_rejected(#[case] payload: &'static str) {
    let app = actix_test::init_service(test_app(Arc::new(MockUserRepository::new()))).await;

    let create = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload(payload)
            .to_request(),
    )
    .await;
    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_text(create)
            .await
            .starts_with("Failed to parse user data: ")
    );

    let update = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/1")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload(payload)
            .to_request(),
    )
    .await;
    assert_eq!(update.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_text(update)
            .await
            .starts_with("Failed to parse user data: ")
    );
}

#[actix_web::test]
async fn update_uses_path_id_over_body_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .withf(|user: &User| user.id == UserId::new(5) && user.first_name == "Jane")
        .times(1)
        .returning(|user| Ok(Lookup::Found(user.clone())));
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/5")
            .set_json(json!({"id": 77, "first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("id"), Some(&json!(5)));
}

#[actix_web::test]
async fn create_store_failure_is_internal_error_with_text() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .returning(|_| Err(UserPersistenceError::query("duplicate key value")));
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(john())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Failed to create user: user repository query failed: duplicate key value"
    );
}

#[actix_web::test]
async fn get_store_failure_is_internal_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .returning(|_| Err(UserPersistenceError::connection("pool timed out")));
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users/1").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(response).await,
        "Failed to fetch user: user repository connection failed: pool timed out"
    );
}

#[actix_web::test]
async fn update_store_failure_is_internal_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .times(1)
        .returning(|_| Err(UserPersistenceError::query("relation \"users\" does not exist")));
    let app = actix_test::init_service(test_app(Arc::new(repo))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/1")
            .set_json(jane())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body_text(response)
            .await
            .starts_with("Failed to update user: ")
    );
}

#[actix_web::test]
async fn repeated_update_yields_same_record() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let app = actix_test::init_service(test_app(repo.clone())).await;
    actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(john())
            .to_request(),
    )
    .await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/users/1")
                .set_json(jane())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        bodies.push(body);
    }

    assert_eq!(bodies.first(), bodies.get(1));
    assert_eq!(repo.len(), 1);
}
