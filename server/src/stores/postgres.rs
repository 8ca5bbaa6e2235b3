//! Postgres store implementations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Selected at startup when `DATABASE_URL` is set. The pool is created
//! here and migrations run before the server accepts traffic.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use time::OffsetDateTime;

use super::{PostPage, PostPatch, PostRecord, PostStore, StoreError, UserRecord, UserStore};

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
}

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(db_max_connections())
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => {
                if other
                    .as_database_error()
                    .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
                {
                    Self::Conflict(other.to_string())
                } else {
                    Self::Backend(other.to_string())
                }
            }
        }
    }
}

type PostRow = (i64, String, String, i64, OffsetDateTime);

fn to_post(row: PostRow) -> PostRecord {
    let (id, title, content, author_id, created_at) = row;
    PostRecord { id, title, content, author_id, created_at }
}

pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list(&self, page: u32, page_size: u32) -> Result<PostPage, StoreError> {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, author_id, created_at
             FROM posts
             ORDER BY id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(PostPage {
            items: rows.into_iter().map(to_post).collect(),
            total: total.unsigned_abs(),
        })
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        page: u32,
        page_size: u32,
    ) -> Result<PostPage, StoreError> {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, author_id, created_at
             FROM posts
             WHERE author_id = $1
             ORDER BY id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(author_id)
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(PostPage {
            items: rows.into_iter().map(to_post).collect(),
            total: total.unsigned_abs(),
        })
    }

    async fn get(&self, id: i64) -> Result<PostRecord, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, author_id, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(to_post).ok_or(StoreError::NotFound)
    }

    async fn create(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<PostRecord, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (title, content, author_id)
             VALUES ($1, $2, $3)
             RETURNING id, title, content, author_id, created_at",
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(to_post(row))
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<PostRecord, StoreError> {
        // author_id is never in the SET list: ownership is immutable.
        let row = sqlx::query_as::<_, PostRow>(
            "UPDATE posts
             SET title = COALESCE($2, title), content = COALESCE($3, content)
             WHERE id = $1
             RETURNING id, title, content, author_id, created_at",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .fetch_optional(&self.pool)
        .await?;

        row.map(to_post).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

type UserRow = (i64, String, String, String);

fn to_user(row: UserRow) -> UserRecord {
    let (id, email, name, password_hash) = row;
    UserRecord { id, email, name, password_hash }
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(to_user))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(to_user))
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, email, name, password_hash",
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(to_user(row))
    }
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "postgres_test.rs"]
mod tests;
