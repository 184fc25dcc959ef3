use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_helpers::{PayloadRejection, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::envelope::{Envelope, Status};
use crate::error::UserResult;
use crate::messages;
use crate::models::{CreateUser, UserData, UsersList};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Path the JSON router is nested under
pub const BASE_PATH: &str = "/users";

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(ping, add_user, get_user, list_users),
    components(schemas(CreateUser, UserData, UsersList, Status)),
    tags((name = TAG, description = "User directory endpoints"))
)]
pub struct ApiDoc;

/// Create the users router. Mount it under [`BASE_PATH`].
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(add_user))
        .route("/ping", get(ping))
        .route("/{id}", get(get_user))
        .with_state(shared_service)
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/ping",
    tag = TAG,
    responses((status = 200, description = "Service is alive"))
)]
async fn ping() -> Json<Envelope> {
    Json(Envelope::success(messages::PONG))
}

/// Add a user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User added"),
        (status = 400, description = "Invalid payload, or the insert failed (e.g. duplicate email)")
    )
)]
async fn add_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    payload: Result<ValidatedJson<CreateUser>, PayloadRejection>,
) -> UserResult<(StatusCode, Json<Envelope>)> {
    let ValidatedJson(input) = payload?;
    let user = service.add_user(input.try_into()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(messages::user_added(&user.email))),
    ))
}

/// Get a single user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID; non-numeric values are treated as unknown")),
    responses(
        (status = 200, description = "User found", body = UserData),
        (status = 404, description = "User does not exist")
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<Json<Envelope<UserData>>> {
    let user = service.find_user(&id).await?;
    Ok(Json(Envelope::with_data(messages::USER_FOUND, user.into())))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses((status = 200, description = "All users in ascending id order", body = UsersList))
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Envelope<UsersList>>> {
    let users = service
        .list_users()
        .await?
        .into_iter()
        .map(UserData::from)
        .collect();

    Ok(Json(Envelope::with_data(
        messages::USERS_LISTED,
        UsersList { users },
    )))
}
