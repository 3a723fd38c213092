//! Demo signup/login endpoints.
//!
//! Credentials are stored and compared as plaintext on purpose: this is a
//! throwaway demo flow, called out as such in the project docs. Do not reuse
//! it anywhere that matters.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_email, validate_password};
use crate::store::{DocumentStore, ACCOUNTS};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub ok: bool,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub name: String,
    pub email: String,
}

fn validate_signup(payload: &AuthPayload) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_email(&payload.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_password(&payload.password) {
        errors.add("password", e);
    }
    errors.finish()
}

// The password length rule applies to new accounts only. At login any
// password, however short, goes to the credential match and misses with a
// 401 rather than a validation error.
fn validate_login(payload: &AuthPayload) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_email(&payload.email) {
        errors.add("email", e);
    }
    errors.finish()
}

fn require_store(state: &AppState) -> Result<&Arc<dyn DocumentStore>, ApiError> {
    state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Database not configured"))
}

/// Register a new account
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthPayload>,
) -> Result<Json<SignupResponse>, ApiError> {
    validate_signup(&payload)?;
    let store = require_store(&state)?;

    // Existence check then insert; not atomic, a concurrent identical
    // signup can slip through. Accepted for the demo flow.
    let existing = store
        .find(ACCOUNTS, &json!({"email": payload.email}))
        .await?;
    if !existing.is_empty() {
        return Err(ApiError::conflict("User already exists"));
    }

    let name = payload
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| local_part(&payload.email).to_string());

    let user_id = store
        .insert(
            ACCOUNTS,
            json!({
                "name": name,
                "email": payload.email,
                "password": payload.password,
            }),
        )
        .await?;

    info!(email = %payload.email, "Account created");

    Ok(Json(SignupResponse { ok: true, user_id }))
}

/// Log into an existing account
///
/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthPayload>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_login(&payload)?;
    let store = require_store(&state)?;

    let account = store
        .find_one(
            ACCOUNTS,
            &json!({"email": payload.email, "password": payload.password}),
        )
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    // Echo back only name and email, never the password
    Ok(Json(LoginResponse {
        ok: true,
        name: field(&account, "name"),
        email: field(&account, "email"),
    }))
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

fn field(document: &serde_json::Value, key: &str) -> String {
    document
        .get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string()
}
