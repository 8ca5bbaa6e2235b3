//! Post and user store collaborators.
//!
//! DESIGN
//! ======
//! The auth/session core consumes these as trait objects: route
//! handlers and services never know which backing they talk to.
//! `memory` backs tests and DATABASE_URL-less development; `postgres`
//! is the production backing. Both honor the same contract, pinned by
//! the memory store's tests: ids are sequential, listings are newest
//! first, and pagination reports the pre-slice total.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use session::UserRef;
use time::OffsetDateTime;

/// Failure surfaced by a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A stored post. `author_id` is immutable after creation and is the
/// sole basis for ownership decisions.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One page of a listing plus the total count across all pages.
#[derive(Clone, Debug)]
pub struct PostPage {
    pub items: Vec<PostRecord>,
    pub total: u64,
}

/// Fields a post update may change. `author_id` is deliberately not
/// representable here.
#[derive(Clone, Debug, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Server-side user record. The only place a password hash lives.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl UserRecord {
    /// Client-safe view: the hash is stripped, never serialized.
    #[must_use]
    pub fn to_ref(&self) -> UserRef {
        UserRef { id: self.id, name: self.name.clone(), email: self.email.clone() }
    }
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Page through all posts, newest first. `page` is 1-based.
    async fn list(&self, page: u32, page_size: u32) -> Result<PostPage, StoreError>;

    /// Page through one author's posts, newest first.
    async fn list_by_author(
        &self,
        author_id: i64,
        page: u32,
        page_size: u32,
    ) -> Result<PostPage, StoreError>;

    async fn get(&self, id: i64) -> Result<PostRecord, StoreError>;

    async fn create(&self, title: &str, content: &str, author_id: i64)
    -> Result<PostRecord, StoreError>;

    async fn update(&self, id: i64, patch: PostPatch) -> Result<PostRecord, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError>;

    /// Create a user. Fails with [`StoreError::Conflict`] if the email
    /// is already registered.
    async fn create(&self, email: &str, password_hash: &str, name: &str)
    -> Result<UserRecord, StoreError>;
}
