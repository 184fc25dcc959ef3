use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryOrder,
    SqlErr, TransactionTrait,
};
use tracing::{error, info, warn};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UserRepository,
};

/// SeaORM-backed repository. Works against PostgreSQL and SQLite.
#[derive(Clone)]
pub struct SqlUserRepository {
    db: DatabaseConnection,
}

impl SqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self) -> UserResult<DatabaseTransaction> {
        self.db.begin().await.map_err(insert_failed)
    }

    async fn finish<T>(txn: DatabaseTransaction, outcome: UserResult<T>) -> UserResult<T> {
        match outcome {
            Ok(value) => {
                txn.commit().await.map_err(insert_failed)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}

fn insert_failed(err: DbErr) -> UserError {
    error!(error = %err, "Insert failed");
    UserError::InsertFailed(err.to_string())
}

/// Classify an insert failure. Unique violations become `DuplicateEmail`.
fn insert_error(err: DbErr, email: &str) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail(email.to_string()),
        _ => insert_failed(err),
    }
}

async fn insert_one(txn: &DatabaseTransaction, input: NewUser) -> UserResult<User> {
    let email = input.email.clone();
    let active_model: entity::ActiveModel = input.into();

    let model = active_model
        .insert(txn)
        .await
        .map_err(|e| insert_error(e, &email))?;

    Ok(model.into())
}

async fn insert_all(txn: &DatabaseTransaction, inputs: Vec<NewUser>) -> UserResult<Vec<User>> {
    let mut created = Vec::with_capacity(inputs.len());
    for input in inputs {
        created.push(insert_one(txn, input).await?);
    }
    Ok(created)
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        let txn = self.begin().await?;
        let outcome = insert_one(&txn, user).await;
        let user = Self::finish(txn, outcome).await?;

        info!(user_id = user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn create_batch(&self, users: Vec<NewUser>) -> UserResult<Vec<User>> {
        let txn = self.begin().await?;

        let outcome = insert_all(&txn, users).await;
        let created = Self::finish(txn, outcome).await?;
        info!(count = created.len(), "Created users in batch");
        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
