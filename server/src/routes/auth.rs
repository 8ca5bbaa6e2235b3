//! Login, registration, and logout.
//!
//! DESIGN
//! ======
//! Login writes the same `user-storage` cookie the client store
//! persists, via the shared codec, so either side's write decodes
//! identically on the next request; concurrent writers are
//! last-write-wins by contract. Registration returns the new user
//! without signing them in (the original flow lands on the login
//! page next, and a fresh cookie would bounce it straight home).
//!
//! The cookie is deliberately not `HttpOnly`/`Secure`: the client
//! store rehydrates from it in script. Known gap, kept as-is.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use session::codec::{self, COOKIE_MAX_AGE_SECONDS, COOKIE_NAME};
use session::{Session, UserRef};
use time::Duration;

use crate::error::ApiError;
use crate::services::account::{self, AccountError};
use crate::state::AppState;
use crate::validate;

/// Session cookie with its standard attributes: whole site, 30 days,
/// same-site strict.
fn session_cookie(session: &Session) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, codec::encode(session)))
        .path("/")
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(COOKIE_MAX_AGE_SECONDS))
        .build()
}

/// Expired cookie: logout must leave nothing replayable behind.
fn expired_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .build()
}

fn map_account_error(err: AccountError) -> ApiError {
    match err {
        AccountError::EmailTaken => ApiError::Validation("Email already registered".to_owned()),
        // Which one happened is logged, never surfaced: the response
        // must not reveal whether the email has an account.
        AccountError::UnknownUser | AccountError::BadPassword => {
            tracing::debug!(reason = %err, "login rejected");
            ApiError::Authentication
        }
        AccountError::Credential(e) => ApiError::Storage(e.to_string()),
        AccountError::Store(e) => e.into(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    pub name: String,
    /// Present only when the form renders a confirmation field.
    #[serde(default)]
    pub confirm_password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// `POST /register` — create an account.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError> {
    validate::check(
        &validate::REGISTRATION_RULES,
        &[
            ("name", Some(body.name.as_str())),
            ("email", Some(body.email.as_str())),
            ("password", Some(body.password.as_str())),
            ("confirmPassword", body.confirm_password.as_deref()),
        ],
    )?;

    let user = account::register(state.users.as_ref(), &body.email, &body.password, &body.name)
        .await
        .map_err(map_account_error)?;

    tracing::info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "user": user }))))
}

/// `POST /login` — verify credentials and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
    validate::check(
        &validate::LOGIN_RULES,
        &[("email", Some(body.email.as_str())), ("password", Some(body.password.as_str()))],
    )?;

    let user: UserRef = account::login(state.users.as_ref(), &body.email, &body.password)
        .await
        .map_err(map_account_error)?;

    tracing::info!(user_id = user.id, "login");
    let session = Session::authenticated(user.clone());
    let jar = jar.add(session_cookie(&session));
    Ok((jar, Json(serde_json::json!({ "user": user }))))
}

/// `POST /logout` — expire the session cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(expired_cookie());
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
