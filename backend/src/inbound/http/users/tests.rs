//! Tests for users API handlers.

use super::*;
use crate::domain::ports::{MockUserRepository, UserPersistenceError, UserRepository};
use crate::inbound::http::configure;
use crate::test_support::InMemoryUserRepository;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

#[fixture]
fn repo() -> Arc<InMemoryUserRepository> {
    Arc::new(InMemoryUserRepository::default())
}

fn test_app(
    repository: Arc<dyn UserRepository>,
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
        .app_data(web::Data::new(HttpState::from_repository(repository)))
        .configure(configure)
}

async fn seed(repo: &InMemoryUserRepository, username: &str, email: &str) -> User {
    let draft = UserDraft::try_from_strings(username, email).expect("valid draft");
    repo.insert(&draft).await.expect("seed insert")
}

fn error_code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_user_with_location(repo: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"username": "alice", "email": "a@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/users/1")
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"Id": 1, "Username": "alice", "Email": "a@x.com"}));
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[case::missing_email(json!({"username": "alice"}))]
#[case::wrong_type(json!({"username": 7, "email": "a@x.com"}))]
#[case::not_an_object(json!(["alice", "a@x.com"]))]
#[actix_web::test]
async fn create_rejects_incomplete_bodies_without_writing(
    repo: Arc<InMemoryUserRepository>,
    #[case] payload: Value,
) {
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_code(&body), Some("invalid_request"));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Invalid request")
    );
    assert!(repo.is_empty());
}

#[rstest]
#[actix_web::test]
async fn create_rejects_malformed_json(repo: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repo.is_empty());
}

#[rstest]
#[case("", "a@x.com", "username", "empty_username")]
#[case("alice", "not-an-email", "email", "invalid_email")]
#[actix_web::test]
async fn create_reports_invalid_fields(
    repo: Arc<InMemoryUserRepository>,
    #[case] username: &str,
    #[case] email: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"username": username, "email": email}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let details = body.get("details").expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
    assert!(repo.is_empty());
}

#[rstest]
#[actix_web::test]
async fn create_with_taken_email_is_a_conflict(repo: Arc<InMemoryUserRepository>) {
    seed(&repo, "alice", "a@x.com").await;
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"username": "mallory", "email": "a@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_code(&body), Some("conflict"));
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn list_returns_users_in_id_order(repo: Arc<InMemoryUserRepository>) {
    seed(&repo, "alice", "a@x.com").await;
    seed(&repo, "bob", "b@x.com").await;
    let app = actix_test::init_service(test_app(repo)).await;

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(
        body,
        json!([
            {"Id": 1, "Username": "alice", "Email": "a@x.com"},
            {"Id": 2, "Username": "bob", "Email": "b@x.com"}
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn list_of_empty_table_is_an_empty_array(repo: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(repo)).await;

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!([]));
}

#[rstest]
#[case::absent("/users/42", StatusCode::NOT_FOUND, "not_found")]
#[case::non_numeric("/users/abc", StatusCode::BAD_REQUEST, "invalid_request")]
#[case::fractional("/users/1.5", StatusCode::BAD_REQUEST, "invalid_request")]
#[case::overflow("/users/99999999999999999999", StatusCode::BAD_REQUEST, "invalid_request")]
#[case::zero("/users/0", StatusCode::NOT_FOUND, "not_found")]
#[case::negative("/users/-1", StatusCode::NOT_FOUND, "not_found")]
#[case::unknown_email("/users/email/nobody@x.com", StatusCode::NOT_FOUND, "not_found")]
#[actix_web::test]
async fn lookups_report_errors(
    repo: Arc<InMemoryUserRepository>,
    #[case] uri: &str,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(repo)).await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_code(&body), Some(code));
}

#[rstest]
#[actix_web::test]
async fn get_by_email_returns_matching_user(repo: Arc<InMemoryUserRepository>) {
    seed(&repo, "alice", "a@x.com").await;
    seed(&repo, "bob", "b@x.com").await;
    let app = actix_test::init_service(test_app(repo)).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/email/b@x.com")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({"Id": 2, "Username": "bob", "Email": "b@x.com"}));
}

#[rstest]
#[actix_web::test]
async fn update_overwrites_and_echoes_body(repo: Arc<InMemoryUserRepository>) {
    let user = seed(&repo, "alice", "a@x.com").await;
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::put()
        .uri("/users/1")
        .set_json(json!({"username": "alicia", "email": "alicia@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"username": "alicia", "email": "alicia@x.com"}));

    let stored = repo
        .find_by_id(user.id())
        .await
        .expect("lookup")
        .expect("still present");
    assert_eq!(stored.username(), "alicia");
    assert_eq!(stored.email(), "alicia@x.com");
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_user_succeeds_without_creating(repo: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::put()
        .uri("/users/77")
        .set_json(json!({"username": "ghost", "email": "g@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(repo.is_empty());
}

#[rstest]
#[actix_web::test]
async fn update_with_non_integer_id_is_rejected(repo: Arc<InMemoryUserRepository>) {
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::put()
        .uri("/users/three")
        .set_json(json!({"username": "alice", "email": "a@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let details = body.get("details").expect("details present");
    assert_eq!(details.get("value").and_then(Value::as_str), Some("three"));
    assert!(repo.is_empty());
}

#[rstest]
#[case::update_zero(
    actix_test::TestRequest::put()
        .uri("/users/0")
        .set_json(json!({"username": "ghost", "email": "g@x.com"}))
)]
#[case::update_negative(
    actix_test::TestRequest::put()
        .uri("/users/-3")
        .set_json(json!({"username": "ghost", "email": "g@x.com"}))
)]
#[case::delete_zero(actix_test::TestRequest::delete().uri("/users/0"))]
#[case::delete_negative(actix_test::TestRequest::delete().uri("/users/-1"))]
#[actix_web::test]
async fn mutations_of_unassigned_ids_are_no_ops(
    repo: Arc<InMemoryUserRepository>,
    #[case] request: actix_test::TestRequest,
) {
    let user = seed(&repo, "alice", "a@x.com").await;
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let stored = repo
        .find_by_id(user.id())
        .await
        .expect("lookup")
        .expect("still present");
    assert_eq!(stored, user);
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[case::malformed("{\"username\": ")]
#[case::missing_email("{\"username\": \"alicia\"}")]
#[case::wrong_type("{\"username\": \"alicia\", \"email\": 7}")]
#[actix_web::test]
async fn update_rejects_bad_bodies_without_writing(
    repo: Arc<InMemoryUserRepository>,
    #[case] payload: &'static str,
) {
    let user = seed(&repo, "alice", "a@x.com").await;
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::put()
        .uri("/users/1")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_code(&body), Some("invalid_request"));
    let stored = repo
        .find_by_id(user.id())
        .await
        .expect("lookup")
        .expect("still present");
    assert_eq!(stored, user);
}

#[rstest]
#[actix_web::test]
async fn update_to_taken_email_is_a_conflict(repo: Arc<InMemoryUserRepository>) {
    seed(&repo, "alice", "a@x.com").await;
    let bob = seed(&repo, "bob", "b@x.com").await;
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::put()
        .uri("/users/2")
        .set_json(json!({"username": "bob", "email": "a@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_code(&body), Some("conflict"));
    let stored = repo
        .find_by_id(bob.id())
        .await
        .expect("lookup")
        .expect("still present");
    assert_eq!(stored.email(), "b@x.com");
}

#[rstest]
#[actix_web::test]
async fn delete_removes_user_and_confirms(repo: Arc<InMemoryUserRepository>) {
    seed(&repo, "alice", "a@x.com").await;
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::delete().uri("/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": DELETED_MESSAGE}));
    assert!(repo.is_empty());
}

#[rstest]
#[actix_web::test]
async fn delete_of_missing_user_still_confirms(repo: Arc<InMemoryUserRepository>) {
    seed(&repo, "alice", "a@x.com").await;
    let app = actix_test::init_service(test_app(repo.clone())).await;

    let request = actix_test::TestRequest::delete()
        .uri("/users/9")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[case::connection(UserPersistenceError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE)]
#[case::query(UserPersistenceError::query("syntax error"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn store_failures_surface_as_server_errors(
    #[case] failure: UserPersistenceError,
    #[case] status: StatusCode,
) {
    let mut repository = MockUserRepository::new();
    repository
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Err(failure.clone()));
    let app = actix_test::init_service(test_app(Arc::new(repository))).await;

    let request = actix_test::TestRequest::get().uri("/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(
        !body.to_string().contains("syntax error"),
        "internal detail must not reach clients"
    );
}

#[rstest]
#[case::connection(UserPersistenceError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE)]
#[case::query(UserPersistenceError::query("syntax error"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn update_failures_surface_as_server_errors(
    #[case] failure: UserPersistenceError,
    #[case] status: StatusCode,
) {
    let mut repository = MockUserRepository::new();
    repository
        .expect_update()
        .times(1)
        .returning(move |_, _| Err(failure.clone()));
    let app = actix_test::init_service(test_app(Arc::new(repository))).await;

    let request = actix_test::TestRequest::put()
        .uri("/users/1")
        .set_json(json!({"username": "alice", "email": "a@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(!body.to_string().contains("syntax error"));
}

#[rstest]
#[case::connection(UserPersistenceError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE)]
#[case::query(UserPersistenceError::query("syntax error"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn delete_failures_surface_as_server_errors(
    #[case] failure: UserPersistenceError,
    #[case] status: StatusCode,
) {
    let mut repository = MockUserRepository::new();
    repository
        .expect_delete()
        .times(1)
        .returning(move |_| Err(failure.clone()));
    let app = actix_test::init_service(test_app(Arc::new(repository))).await;

    let request = actix_test::TestRequest::delete().uri("/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(!body.to_string().contains("syntax error"));
}

#[rstest]
fn request_converts_into_validated_draft() {
    let draft = UserDraft::try_from(UserRequest {
        username: "alice".into(),
        email: "a@x.com".into(),
    })
    .expect("valid request");

    assert_eq!(draft.username().as_ref(), "alice");
    assert_eq!(draft.email().as_ref(), "a@x.com");
}
