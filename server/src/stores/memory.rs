//! In-memory store implementations.
//!
//! Back tests and DATABASE_URL-less development. Sequential ids and
//! newest-first ordering match the Postgres backing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{PostPage, PostPatch, PostRecord, PostStore, StoreError, UserRecord, UserStore};

fn page_slice(mut items: Vec<PostRecord>, page: u32, page_size: u32) -> PostPage {
    let total = items.len() as u64;
    let page = page.max(1);
    // Widened before multiplying: page * page_size can exceed u32.
    let skip = u64::from(page - 1) * u64::from(page_size);
    let items = match usize::try_from(skip) {
        Ok(skip) if skip < items.len() => {
            items.drain(skip..).take(page_size as usize).collect()
        }
        _ => Vec::new(),
    };
    PostPage { items, total }
}

#[derive(Default)]
struct PostsInner {
    posts: BTreeMap<i64, PostRecord>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryPostStore {
    inner: RwLock<PostsInner>,
}

impl MemoryPostStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self, page: u32, page_size: u32) -> Result<PostPage, StoreError> {
        let inner = self.inner.read().await;
        // BTreeMap iterates ascending; listings are newest (highest id) first.
        let items: Vec<PostRecord> = inner.posts.values().rev().cloned().collect();
        Ok(page_slice(items, page, page_size))
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        page: u32,
        page_size: u32,
    ) -> Result<PostPage, StoreError> {
        let inner = self.inner.read().await;
        let items: Vec<PostRecord> = inner
            .posts
            .values()
            .rev()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        Ok(page_slice(items, page, page_size))
    }

    async fn get(&self, id: i64) -> Result<PostRecord, StoreError> {
        let inner = self.inner.read().await;
        inner.posts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<PostRecord, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let post = PostRecord {
            id: inner.next_id,
            title: title.to_owned(),
            content: content.to_owned(),
            author_id,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<PostRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.posts.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[derive(Default)]
struct UsersInner {
    users: BTreeMap<i64, UserRecord>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<UsersInner>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == email) {
            return Err(StoreError::Conflict(format!("email already registered: {email}")));
        }
        inner.next_id += 1;
        let user = UserRecord {
            id: inner.next_id,
            email: email.to_owned(),
            name: name.to_owned(),
            password_hash: password_hash.to_owned(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
