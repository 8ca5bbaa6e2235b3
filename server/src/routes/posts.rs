//! Post listing, reading, and mutation.
//!
//! DESIGN
//! ======
//! The route-level guard has already run by the time these handlers
//! execute; what remains here is the per-resource ownership gate. Every
//! mutating handler recomputes `can_mutate` from the request's own
//! decoded cookie — the rendered edit/delete controls are a hint, never
//! an authorization.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use session::guard::{self, AccessDecision};
use session::{Session, gate};

use crate::error::ApiError;
use crate::routes::guard::{AuthenticatedUser, CurrentSession};
use crate::state::AppState;
use crate::stores::{PostPatch, PostRecord};
use crate::validate;

/// Listing page size, fixed across the app.
const PAGE_SIZE: u32 = 6;

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: PostRecord,
    pub author: Option<AuthorView>,
    /// Whether the requesting session may edit/delete this post.
    /// Rendering hint only; mutations re-check server-side.
    pub can_edit: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub posts: Vec<PostView>,
    pub page: u32,
    pub total_pages: u64,
    pub total: u64,
}

#[derive(Deserialize)]
pub struct CreatePostBody {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdatePostBody {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Resolve author display info for a page of posts, one lookup per
/// distinct author.
async fn authors_for(
    state: &AppState,
    items: &[PostRecord],
) -> Result<HashMap<i64, AuthorView>, ApiError> {
    let mut authors = HashMap::new();
    for post in items {
        if authors.contains_key(&post.author_id) {
            continue;
        }
        if let Some(user) = state.users.find_by_id(post.author_id).await? {
            authors.insert(post.author_id, AuthorView { id: user.id, name: user.name });
        }
    }
    Ok(authors)
}

fn listing_view(
    state_authors: &HashMap<i64, AuthorView>,
    items: Vec<PostRecord>,
    total: u64,
    page: u32,
    session: &Session,
) -> ListingView {
    let posts = items
        .into_iter()
        .map(|post| {
            let author = state_authors
                .get(&post.author_id)
                .map(|a| AuthorView { id: a.id, name: a.name.clone() });
            let can_edit = gate::can_mutate(session, post.author_id);
            PostView { post, author, can_edit }
        })
        .collect();
    ListingView { posts, page, total_pages: total.div_ceil(u64::from(PAGE_SIZE)), total }
}

/// `GET /posts` — public paginated listing, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<ListingView>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let result = state.posts.list(page, PAGE_SIZE).await?;
    let authors = authors_for(&state, &result.items).await?;
    Ok(Json(listing_view(&authors, result.items, result.total, page, &session)))
}

/// `GET /posts/{id}` — single post, with the viewer's edit capability.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<PostView>, ApiError> {
    let post = state.posts.get(id).await?;
    let authors = authors_for(&state, std::slice::from_ref(&post)).await?;
    let author = authors
        .get(&post.author_id)
        .map(|a| AuthorView { id: a.id, name: a.name.clone() });
    let can_edit = gate::can_mutate(&session, post.author_id);
    Ok(Json(PostView { post, author, can_edit }))
}

/// `GET /posts/create` — the guarded create-form route. Reaching it at
/// all means the guard allowed it.
pub async fn create_form() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// `POST /posts/create` — create a post owned by the session user.
///
/// The author is always the authenticated user; a client-supplied
/// author id would not be trusted and is not even accepted.
pub async fn create(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<CreatePostBody>,
) -> Result<impl IntoResponse, ApiError> {
    validate::check(
        &validate::POST_RULES,
        &[("title", Some(body.title.as_str())), ("content", Some(body.content.as_str()))],
    )?;

    let post = state.posts.create(&body.title, &body.content, user.id).await?;
    tracing::info!(post_id = post.id, author_id = user.id, "post created");

    let author = Some(AuthorView { id: user.id, name: user.name });
    Ok((StatusCode::CREATED, Json(PostView { post, author, can_edit: true })))
}

/// `PUT /posts/{id}` — edit a post. Ownership re-checked here from the
/// cookie-decoded session, regardless of what the client rendered.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentSession(session): CurrentSession,
    Json(body): Json<UpdatePostBody>,
) -> Result<Json<PostView>, ApiError> {
    let post = state.posts.get(id).await?;
    if !gate::can_mutate(&session, post.author_id) {
        return Err(ApiError::Authorization);
    }

    validate::check(
        &validate::POST_RULES,
        &[("title", body.title.as_deref()), ("content", body.content.as_deref())],
    )?;

    let patch = PostPatch { title: body.title, content: body.content };
    let post = state.posts.update(id, patch).await?;
    tracing::info!(post_id = post.id, "post updated");

    let authors = authors_for(&state, std::slice::from_ref(&post)).await?;
    let author = authors
        .get(&post.author_id)
        .map(|a| AuthorView { id: a.id, name: a.name.clone() });
    let can_edit = gate::can_mutate(&session, post.author_id);
    Ok(Json(PostView { post, author, can_edit }))
}

/// `DELETE /posts/{id}` — delete a post, same ownership rule.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    CurrentSession(session): CurrentSession,
) -> Result<StatusCode, ApiError> {
    let post = state.posts.get(id).await?;
    if !gate::can_mutate(&session, post.author_id) {
        return Err(ApiError::Authorization);
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /posts/user/{id}` — a user's own listing.
///
/// Anonymous requests never get here (guard). A signed-in user asking
/// for someone else's listing is redirected to the general listing:
/// not a 404, and never another user's private view.
pub async fn user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<PageQuery>,
    CurrentSession(session): CurrentSession,
) -> Result<Response, ApiError> {
    match guard::decide_user_scope(&session, user_id) {
        AccessDecision::RedirectTo(target) => {
            tracing::debug!(requested = user_id, target, "user listing scope redirect");
            Ok(Redirect::temporary(target).into_response())
        }
        AccessDecision::Allow => {
            let user = state.users.find_by_id(user_id).await?.ok_or(ApiError::NotFound)?;
            let page = query.page.unwrap_or(1).max(1);
            let result = state.posts.list_by_author(user_id, page, PAGE_SIZE).await?;
            let authors = authors_for(&state, &result.items).await?;
            let listing = listing_view(&authors, result.items, result.total, page, &session);
            let body = serde_json::json!({
                "user": { "id": user.id, "name": user.name },
                "listing": listing,
            });
            Ok(Json(body).into_response())
        }
    }
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;
