//! Users Domain
//!
//! A minimal user directory: add users, fetch one by id, list them all.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  Handlers / Pages    │  ← JSON endpoints under /users, HTML index at /
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │       Service        │  ← Presence checks, id parsing, seeding
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │      Repository      │  ← Trait + in-memory and SeaORM implementations
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │   Models / Entity    │  ← Records, DTOs, response envelope
//! └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let app = axum::Router::new().nest(handlers::BASE_PATH, handlers::router(service));
//! ```

pub mod entity;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod pages;
pub mod repository;
pub mod service;
pub mod sql;
pub mod templates;

// Re-export commonly used types
pub use envelope::{Envelope, Status};
pub use error::{UserError, UserResult};
pub use models::{CreateUser, NewUser, User, UserData, UserForm, UsersList};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{SEED_USERS, UserService};
pub use sql::SqlUserRepository;
pub use templates::TemplateEngine;
