//! Handlebars rendering for the HTML index page.

use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{UserError, UserResult};
use crate::models::UserData;

const INDEX_TEMPLATE_NAME: &str = "index";

/// Template engine for the server-rendered pages
#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

#[derive(Serialize)]
struct IndexContext<'a> {
    users: &'a [UserData],
}

impl TemplateEngine {
    /// Create a template engine with every page template registered
    pub fn new() -> UserResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string(INDEX_TEMPLATE_NAME, INDEX_HTML_TEMPLATE)
            .map_err(|e| UserError::Template(format!("Failed to register index: {e}")))?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Render the index page: the add-user form followed by the user table
    pub fn render_index(&self, users: &[UserData]) -> UserResult<String> {
        debug!(count = users.len(), "Rendering index page");

        self.handlebars
            .render(INDEX_TEMPLATE_NAME, &IndexContext { users })
            .map_err(|e| UserError::Template(e.to_string()))
    }
}

const INDEX_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>Usuarios</title>
</head>
<body>
  <h1>All Users</h1>
  <hr>
  <form action="/" method="POST">
    <input name="username" type="text" placeholder="Ingrese un nombre de usuario" required>
    <input name="email" type="email" placeholder="Ingrese un email" required>
    <input type="submit" value="Enviar">
  </form>
  <br>
  {{#if users}}
  <table>
    <thead>
      <tr><th>ID</th><th>Username</th><th>Email</th></tr>
    </thead>
    <tbody>
      {{#each users}}
      <tr><td>{{id}}</td><td>{{username}}</td><td>{{email}}</td></tr>
      {{/each}}
    </tbody>
  </table>
  {{else}}
  <p>No hay usuarios!</p>
  {{/if}}
</body>
</html>
"#;
