use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::UserResult;
use crate::models::{UserData, UserForm};
use crate::repository::UserRepository;
use crate::service::UserService;
use crate::templates::TemplateEngine;

struct PageState<R: UserRepository> {
    service: UserService<R>,
    templates: TemplateEngine,
}

/// Router for the HTML index page, mounted at the application root.
///
/// Fails only if the page templates cannot be compiled.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> UserResult<Router> {
    let state = Arc::new(PageState {
        service,
        templates: TemplateEngine::new()?,
    });

    Ok(Router::new()
        .route("/", get(index).post(submit))
        .with_state(state))
}

async fn index<R: UserRepository>(
    State(state): State<Arc<PageState<R>>>,
) -> UserResult<Html<String>> {
    let users: Vec<UserData> = state
        .service
        .list_users()
        .await?
        .into_iter()
        .map(UserData::from)
        .collect();

    Ok(Html(state.templates.render_index(&users)?))
}

/// Insert from the form, then send the browser back to the listing.
/// Failures are logged and otherwise invisible to the visitor.
async fn submit<R: UserRepository>(
    State(state): State<Arc<PageState<R>>>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Response {
    match form {
        Ok(Form(form)) => match state.service.add_user(form.into()).await {
            Ok(user) => info!(user_id = user.id, "Added user from index form"),
            Err(e) => warn!(error = %e, "Index form submission was not stored"),
        },
        Err(rejection) => warn!(error = %rejection, "Unreadable index form submission"),
    }

    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
