use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a single user in its own transaction
    async fn create(&self, user: NewUser) -> UserResult<User>;

    /// Insert several users atomically: either all of them are stored or none
    async fn create_batch(&self, users: Vec<NewUser>) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// All users, ordered by ascending id
    async fn list(&self) -> UserResult<Vec<User>>;
}

#[derive(Debug)]
struct InMemoryState {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryState {
    fn email_taken(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email == email)
    }

    fn insert(&mut self, input: NewUser) -> User {
        let user = User {
            id: self.next_id,
            username: input.username,
            email: input.email,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.users.insert(user.id, user.clone());
        user
    }
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut state = self.state.write().await;

        if state.email_taken(&user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let user = state.insert(user);
        tracing::info!(user_id = user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn create_batch(&self, users: Vec<NewUser>) -> UserResult<Vec<User>> {
        let mut state = self.state.write().await;

        // Check the whole batch up front so a failure leaves nothing behind
        for (i, user) in users.iter().enumerate() {
            let repeated_in_batch = users[..i].iter().any(|u| u.email == user.email);
            if repeated_in_batch || state.email_taken(&user.email) {
                return Err(UserError::DuplicateEmail(user.email.clone()));
            }
        }

        let created: Vec<User> = users.into_iter().map(|u| state.insert(u)).collect();
        tracing::info!(count = created.len(), "Created users in batch");
        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }
}
