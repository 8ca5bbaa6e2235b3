//! Registration and login over the user store.
//!
//! ERROR HANDLING
//! ==============
//! `UnknownUser` and `BadPassword` are distinct variants so the server
//! can log which one happened, but the HTTP layer collapses both into
//! one generic "invalid credentials" response; the split must never
//! reach a client, since it would reveal which emails have accounts.

use session::UserRef;

use crate::services::credential::{self, CredentialError};
use crate::stores::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("email already registered")]
    EmailTaken,
    #[error("no account for that email")]
    UnknownUser,
    #[error("wrong password")]
    BadPassword,
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create an account and return the client-safe user.
///
/// # Errors
///
/// `EmailTaken` if the email is already registered; otherwise
/// credential or store failures.
pub async fn register(
    users: &dyn UserStore,
    email: &str,
    password: &str,
    name: &str,
) -> Result<UserRef, AccountError> {
    if users.find_by_email(email).await?.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let password_hash = credential::hash_password(password)?;

    // The store enforces uniqueness too; a concurrent registration
    // between the check above and this insert still conflicts.
    let record = users.create(email, &password_hash, name).await.map_err(|e| match e {
        StoreError::Conflict(_) => AccountError::EmailTaken,
        other => AccountError::Store(other),
    })?;

    Ok(record.to_ref())
}

/// Verify credentials and return the client-safe user.
///
/// # Errors
///
/// `UnknownUser` for an unregistered email, `BadPassword` for a wrong
/// password; both are surfaced identically to clients.
pub async fn login(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<UserRef, AccountError> {
    let record = users
        .find_by_email(email)
        .await?
        .ok_or(AccountError::UnknownUser)?;

    if !credential::verify_password(password, &record.password_hash)? {
        return Err(AccountError::BadPassword);
    }

    Ok(record.to_ref())
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
