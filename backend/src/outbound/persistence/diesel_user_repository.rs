//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Role, User, UserAccount, UserId};

use super::diesel_error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn ctors() -> ErrorConstructors<UserPersistenceError> {
    ErrorConstructors {
        connection: |message| UserPersistenceError::connection(message),
        query: |message| UserPersistenceError::query(message),
        unique_violation: |constraint| {
            UserPersistenceError::query(format!("unique constraint {constraint} violated"))
        },
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, &ctors())
}

fn diesel_error(error: DieselError) -> UserPersistenceError {
    map_diesel_error(error, &ctors())
}

/// Convert a stored row into an account, rejecting rows the domain cannot
/// represent.
fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let email = Email::new(&row.email).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored email failed validation");
        UserPersistenceError::query(format!("stored email is invalid: {err}"))
    })?;
    let role = row.role.parse::<Role>().map_err(|err| {
        warn!(user_id = %row.id, role = %row.role, "unrecognised stored role");
        UserPersistenceError::query(format!("stored role is invalid: {err}"))
    })?;
    let user = User::new(UserId::from_uuid(row.id), email, role).with_avatar(row.avatar);
    Ok(UserAccount::new(user, row.password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let user = account.user();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            password_hash: account.password_hash(),
            role: user.role().as_str(),
            avatar: user.avatar(),
        };
        match diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Err(
                UserPersistenceError::duplicate_email(user.email().as_ref()),
            ),
            Err(other) => Err(diesel_error(other)),
        }
    }

    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = UserUpdate {
            password_hash: account.password_hash(),
            avatar: account.user().avatar(),
        };
        let updated = diesel::update(users::table.find(account.user().id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(updated > 0)
    }
}
