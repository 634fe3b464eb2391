//! User persistence against PostgreSQL.

use crate::error::AppError;
use crate::model::{User, UserPayload};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgRow;
use sqlx::{Executor, PgPool, Postgres, Row, Statement};
use std::future::Future;
use std::time::Duration;

const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id";
const SELECT_USERS: &str = "SELECT id, name, email FROM users ORDER BY id DESC";
const SELECT_USER: &str = "SELECT id, name, email FROM users WHERE id = $1";
const UPDATE_USER: &str = "UPDATE users SET name = $1, email = $2 WHERE id = $3";
const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// The persistence operations behind the user routes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert and return the id the database assigned (always > 0).
    async fn insert(&self, user: &UserPayload) -> Result<u32, AppError>;
    /// All users, highest id first.
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn find(&self, id: u32) -> Result<Option<User>, AppError>;
    /// Overwrite name and email. A missing id is not an error.
    async fn update(&self, id: u32, user: &UserPayload) -> Result<(), AppError>;
    /// A missing id is not an error.
    async fn delete(&self, id: u32) -> Result<(), AppError>;
    async fn ping(&self) -> Result<(), AppError>;
}

/// [`UserStore`] over a shared pool. Each call holds one pooled connection for its duration
/// and returns it on drop, including when the deadline cancels the call.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgUserStore {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        PgUserStore {
            pool,
            statement_timeout,
        }
    }

    async fn acquire(&self) -> Result<PoolConnection<Postgres>, AppError> {
        self.pool.acquire().await.map_err(AppError::Connection)
    }

    async fn within_deadline<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>> + Send,
    {
        tokio::time::timeout(self.statement_timeout, fut)
            .await
            .map_err(|_| AppError::DeadlineExceeded)?
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &UserPayload) -> Result<u32, AppError> {
        self.within_deadline(async {
            let mut conn = self.acquire().await?;
            tracing::debug!(sql = INSERT_USER, "query");
            let stmt = (&mut *conn)
                .prepare(INSERT_USER)
                .await
                .map_err(AppError::StatementPrepare)?;
            let row = stmt
                .query()
                .bind(&user.name)
                .bind(&user.email)
                .fetch_optional(&mut *conn)
                .await
                .map_err(AppError::StatementExecute)?
                .ok_or_else(|| AppError::ResultExtraction("insert returned no row".into()))?;
            let id: i32 = row
                .try_get("id")
                .map_err(|e| AppError::ResultExtraction(e.to_string()))?;
            u32::try_from(id)
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| AppError::ResultExtraction(format!("database assigned id {}", id)))
        })
        .await
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.within_deadline(async {
            let mut conn = self.acquire().await?;
            tracing::debug!(sql = SELECT_USERS, "query");
            let rows = sqlx::query(SELECT_USERS)
                .fetch_all(&mut *conn)
                .await
                .map_err(AppError::StatementExecute)?;
            rows.iter().map(row_to_user).collect()
        })
        .await
    }

    async fn find(&self, id: u32) -> Result<Option<User>, AppError> {
        let Some(key) = column_id(id) else {
            return Ok(None);
        };
        self.within_deadline(async {
            let mut conn = self.acquire().await?;
            tracing::debug!(sql = SELECT_USER, id, "query");
            let row = sqlx::query(SELECT_USER)
                .bind(key)
                .fetch_optional(&mut *conn)
                .await
                .map_err(AppError::StatementExecute)?;
            row.as_ref().map(row_to_user).transpose()
        })
        .await
    }

    async fn update(&self, id: u32, user: &UserPayload) -> Result<(), AppError> {
        let Some(key) = column_id(id) else {
            return Ok(());
        };
        self.within_deadline(async {
            let mut conn = self.acquire().await?;
            tracing::debug!(sql = UPDATE_USER, id, "query");
            let stmt = (&mut *conn)
                .prepare(UPDATE_USER)
                .await
                .map_err(AppError::StatementPrepare)?;
            stmt.query()
                .bind(&user.name)
                .bind(&user.email)
                .bind(key)
                .execute(&mut *conn)
                .await
                .map_err(AppError::StatementExecute)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: u32) -> Result<(), AppError> {
        let Some(key) = column_id(id) else {
            return Ok(());
        };
        self.within_deadline(async {
            let mut conn = self.acquire().await?;
            tracing::debug!(sql = DELETE_USER, id, "query");
            let stmt = (&mut *conn)
                .prepare(DELETE_USER)
                .await
                .map_err(AppError::StatementPrepare)?;
            stmt.query()
                .bind(key)
                .execute(&mut *conn)
                .await
                .map_err(AppError::StatementExecute)?;
            Ok(())
        })
        .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.within_deadline(async {
            crate::store::ping(&self.pool)
                .await
                .map_err(AppError::Connection)
        })
        .await
    }
}

/// `users.id` is a SERIAL (int4); ids past `i32::MAX` can never be stored.
fn column_id(id: u32) -> Option<i32> {
    i32::try_from(id).ok()
}

fn row_to_user(row: &PgRow) -> Result<User, AppError> {
    let id: i32 = row.try_get("id").map_err(AppError::Scan)?;
    let id = u32::try_from(id).map_err(|e| AppError::Scan(sqlx::Error::Decode(Box::new(e))))?;
    Ok(User {
        id,
        name: row.try_get("name").map_err(AppError::Scan)?,
        email: row.try_get("email").map_err(AppError::Scan)?,
    })
}
