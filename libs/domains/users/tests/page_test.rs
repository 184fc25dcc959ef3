//! Tests for the HTML index page

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use http_body_util::BodyExt;
use test_utils::TestDatabase;
use tower::ServiceExt;

async fn html_body(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn app() -> (TestDatabase, Router) {
    let db = TestDatabase::new().await;
    let service = UserService::new(SqlUserRepository::new(db.connection()));
    (db, pages::router(service).unwrap())
}

fn post_form(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_index_without_users() {
    let (_db, app) = app().await;

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = html_body(response.into_body()).await;
    assert!(html.contains("All Users"));
    assert!(html.contains("<p>No hay usuarios!</p>"));
}

#[tokio::test]
async fn test_index_with_users() {
    let (db, app) = app().await;
    let repo = SqlUserRepository::new(db.connection());
    repo.create(NewUser::new("zannier", "zanniervargas@upeu.edu.pe"))
        .await
        .unwrap();
    repo.create(NewUser::new("jeffrey", "jeffreyvargas@upeu.edu.pe"))
        .await
        .unwrap();

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let html = html_body(response.into_body()).await;
    assert!(html.contains("All Users"));
    assert!(!html.contains("<p>No hay usuarios!</p>"));
    assert!(html.contains("zannier"));
    assert!(html.contains("jeffrey"));
}

#[tokio::test]
async fn test_form_post_adds_user_and_redirects() {
    let (_db, app) = app().await;

    let response = app
        .clone()
        .oneshot(post_form("username=leandro&email=leandroburgos%40upeu.edu.pe"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let page = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = html_body(page.into_body()).await;
    assert!(!html.contains("<p>No hay usuarios!</p>"));
    assert!(html.contains("leandro"));
    assert!(html.contains("leandroburgos@upeu.edu.pe"));
}

#[tokio::test]
async fn test_form_post_failure_still_redirects() {
    let (_db, app) = app().await;

    // Missing email: nothing is stored, the visitor is sent back anyway
    let response = app
        .clone()
        .oneshot(post_form("username=leandro"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let page = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = html_body(page.into_body()).await;
    assert!(html.contains("<p>No hay usuarios!</p>"));
}
