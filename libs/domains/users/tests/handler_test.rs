//! Handler tests for the Users domain
//!
//! These drive the `/users` router end to end over an in-memory database:
//! - Request deserialization and validation
//! - Response envelope shape and messages
//! - HTTP status codes

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn app() -> (TestDatabase, Router) {
    let db = TestDatabase::new().await;
    let service = UserService::new(SqlUserRepository::new(db.connection()));
    (db, handlers::router(service))
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_ping() {
    let (_db, app) = app().await;

    let response = app.oneshot(get("/ping")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["estado"], "satisfactorio");
    assert_eq!(body["mensaje"], "pong!!!");
}

#[tokio::test]
async fn test_add_user_returns_201() {
    let (_db, app) = app().await;

    let response = app
        .oneshot(post_json(json!({
            "username": "igor",
            "email": "igorchipana@upeu.edu.pe"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["estado"], "satisfactorio");
    assert_eq!(body["mensaje"], "igorchipana@upeu.edu.pe fue agregado!!!");
}

#[tokio::test]
async fn test_add_user_rejects_invalid_payloads() {
    let (_db, app) = app().await;

    for payload in [
        json!({}),
        json!({ "email": "igorchipana@upeu.edu.pe" }),
        json!({ "username": "igor" }),
        json!({ "username": "", "email": "igorchipana@upeu.edu.pe" }),
    ] {
        let response = app.clone().oneshot(post_json(payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body, json!({ "estado": "falló", "mensaje": "Carga inválida." }));
    }
}

#[tokio::test]
async fn test_add_user_rejects_non_object_json() {
    let (_db, app) = app().await;

    for payload in [
        json!(["igor", "igorchipana@upeu.edu.pe"]),
        json!("igor"),
        json!(null),
        json!({ "username": ["igor"], "email": "igorchipana@upeu.edu.pe" }),
    ] {
        let response = app.clone().oneshot(post_json(payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body, json!({ "estado": "falló", "mensaje": "Carga inválida." }));
    }

    // Nothing was stored
    let list = app.oneshot(get("/")).await.unwrap();
    let body: Value = json_body(list.into_body()).await;
    assert!(body["data"]["users"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_user_rejects_non_json_body() {
    let (_db, app) = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["mensaje"], "Carga inválida.");
}

#[tokio::test]
async fn test_add_user_duplicate_email() {
    let (_db, app) = app().await;
    let payload = json!({ "username": "igor", "email": "igorchipana@upeu.edu.pe" });

    let first = app.clone().oneshot(post_json(payload.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.clone().oneshot(post_json(payload)).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(second.into_body()).await;
    assert_eq!(body["estado"], "falló");
    assert_eq!(body["mensaje"], "Lo siento, ese email ya existe.");

    // Still exactly one row
    let list = app.oneshot(get("/")).await.unwrap();
    let body: Value = json_body(list.into_body()).await;
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_single_user() {
    let (db, app) = app().await;
    let repo = SqlUserRepository::new(db.connection());
    let user = repo
        .create(NewUser::new("cesar", "cesarpareja@upeu.edu.pe"))
        .await
        .unwrap();

    let response = app
        .oneshot(get(&format!("/{}", user.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<UserData> = json_body(response.into_body()).await;
    assert_eq!(body.status, Status::Success);
    let data = body.data.unwrap();
    assert_eq!(data.id, user.id);
    assert_eq!(data.username, "cesar");
    assert_eq!(data.email, "cesarpareja@upeu.edu.pe");
}

#[tokio::test]
async fn test_get_single_user_not_found() {
    let (_db, app) = app().await;

    for uri in ["/999", "/blah", "/-1"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["estado"], "falló");
        assert_eq!(body["mensaje"], "El usuario no existe");
    }
}

#[tokio::test]
async fn test_list_users_in_insertion_order() {
    let (db, app) = app().await;
    let repo = SqlUserRepository::new(db.connection());
    repo.create(NewUser::new("cesar", "cesarpareja@upeu.edu.pe"))
        .await
        .unwrap();
    repo.create(NewUser::new("igor", "igorchipana@upeu.edu.pe"))
        .await
        .unwrap();

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Envelope<UsersList> = json_body(response.into_body()).await;
    assert_eq!(body.status, Status::Success);
    let users = body.data.unwrap().users;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "cesar");
    assert_eq!(users[0].email, "cesarpareja@upeu.edu.pe");
    assert_eq!(users[1].username, "igor");
    assert_eq!(users[1].email, "igorchipana@upeu.edu.pe");
}

#[tokio::test]
async fn test_list_users_empty() {
    let (_db, app) = app().await;

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"]["users"], json!([]));
}

#[tokio::test]
async fn test_router_works_with_in_memory_repository() {
    let app = handlers::router(UserService::new(InMemoryUserRepository::new()));

    let created = app
        .clone()
        .oneshot(post_json(json!({ "username": "igor", "email": "igor@upeu.edu.pe" })))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
