//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each operation is a single parameterised statement:
//! - create: `INSERT INTO users (first_name, last_name, email) VALUES ($1, $2, $3) RETURNING id`
//! - find_by_id: `SELECT id, first_name, last_name, email FROM users WHERE id = $1`
//! - update: `UPDATE users SET first_name = $1, last_name = $2, email = $3 WHERE id = $4`

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{Instrument, Span, error, info};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Lookup, User, UserDraft, UserId};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;
use super::user_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the [`UserRepository`] port.
///
/// Log events are emitted inside the span supplied at construction, so the
/// caller decides where repository diagnostics are attached.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    span: Span,
}

impl DieselUserRepository {
    /// Create a repository over `pool`, logging within `span`.
    pub fn new(pool: DbPool, span: Span) -> Self {
        Self { pool, span }
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(users::table)
            .values(NewUserRow::from(draft))
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(User::new(UserId::new(id), draft.clone()))
    }

    async fn select(&self, id: UserId) -> Result<Lookup<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_i64())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(User::from).into())
    }

    async fn overwrite(&self, user: &User) -> Result<Lookup<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(users::table.find(user.id.as_i64()))
            .set(UserChangeset::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            Ok(Lookup::NotFound)
        } else {
            Ok(Lookup::Found(user.clone()))
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        async {
            match self.insert(draft).await {
                Ok(user) => {
                    info!(op = "users.create", user_id = %user.id, "user created");
                    Ok(user)
                }
                Err(err) => {
                    error!(op = "users.create", error = %err, "failed to create user");
                    Err(err)
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Lookup<User>, UserPersistenceError> {
        async {
            match self.select(id).await {
                Ok(Lookup::Found(user)) => {
                    info!(op = "users.find_by_id", user_id = %id, "user fetched");
                    Ok(Lookup::Found(user))
                }
                Ok(Lookup::NotFound) => {
                    info!(op = "users.find_by_id", user_id = %id, "user not found");
                    Ok(Lookup::NotFound)
                }
                Err(err) => {
                    error!(op = "users.find_by_id", user_id = %id, error = %err, "failed to fetch user");
                    Err(err)
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }

    async fn update(&self, user: &User) -> Result<Lookup<User>, UserPersistenceError> {
        let id = user.id;
        async {
            match self.overwrite(user).await {
                Ok(Lookup::Found(updated)) => {
                    info!(op = "users.update", user_id = %id, "user updated");
                    Ok(Lookup::Found(updated))
                }
                Ok(Lookup::NotFound) => {
                    info!(op = "users.update", user_id = %id, "no user to update");
                    Ok(Lookup::NotFound)
                }
                Err(err) => {
                    error!(op = "users.update", user_id = %id, error = %err, "failed to update user");
                    Err(err)
                }
            }
        }
        .instrument(self.span.clone())
        .await
    }
}
