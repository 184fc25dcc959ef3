use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// Users inserted by the `seed-db` command, in insertion order
pub const SEED_USERS: [(&str, &str); 2] = [
    ("igor", "igorchipana@upeu.edu.pe"),
    ("cesar", "cesarpareja@upeu.edu.pe"),
];

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Add a user. Both fields must be non-empty.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn add_user(&self, input: NewUser) -> UserResult<User> {
        input.ensure_present()?;
        self.repository.create(input).await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i32) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// Look up a user from a raw path segment. Anything that is not an
    /// integer id is reported as not found.
    pub async fn find_user(&self, raw_id: &str) -> UserResult<User> {
        let id = raw_id
            .parse::<i32>()
            .map_err(|_| UserError::NotFound(raw_id.to_string()))?;
        self.get_user(id).await
    }

    /// List all users in ascending id order
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Insert the fixed seed users in a single transaction
    pub async fn seed(&self) -> UserResult<Vec<User>> {
        let users = SEED_USERS
            .iter()
            .map(|(username, email)| NewUser::new(*username, *email))
            .collect();
        self.repository.create_batch(users).await
    }
}
