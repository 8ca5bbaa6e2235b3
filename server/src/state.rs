//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State`
//! extractor. It holds the two collaborator stores as trait objects,
//! so handlers never know whether they talk to Postgres or the
//! in-memory backing; there is no shared mutable session state here —
//! each request decodes its own session from its own cookie.

use std::sync::Arc;

use crate::stores::{PostStore, UserStore};

/// Shared application state. Clone is required by Axum; both fields
/// are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    #[must_use]
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }
}
