/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /login` - exchange credentials for a bearer token
/// - `POST /register` - create an account and issue a token immediately
/// - `GET /profile` - return the current principal (bearer required)
/// - `POST /logout` - revoke the presented token (bearer required)
/// - `POST /refresh` - rotate the presented token (bearer required)
///
/// Validation failures and credential mismatches are expected outcomes
/// and are answered with the auth envelope directly; only collaborator
/// failures propagate as `ApiError`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::AuthEnvelope,
    validation::first_error,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use taskpad_shared::{
    auth::{jwt, password, session::AuthSession},
    models::{
        revoked_token::RevokedToken,
        user::{CreateUser, User},
    },
};
use validator::Validate;

/// Login request
///
/// Absent fields deserialize as empty strings, so a missing field is
/// answered with its validation message rather than a body rejection.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "The email must be a valid email address"))]
    pub email: String,

    /// Password
    #[validate(length(min = 7, message = "The password must be at least 7 characters"))]
    pub password: String,
}

/// Field declaration order for the surfaced first error
const LOGIN_FIELDS: &[&str] = &["email", "password"];

/// Register request
///
/// Absent fields deserialize as empty strings, same as `LoginRequest`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(
        min = 1,
        max = 50,
        message = "The name must be between 1 and 50 characters"
    ))]
    pub name: String,

    /// Email address, must not already be registered
    #[validate(email(message = "The email must be a valid email address"))]
    pub email: String,

    /// Password, must match the confirmation
    ///
    /// The mismatch check runs before the length check, so a short,
    /// mismatched password reports the mismatch.
    #[validate(
        must_match(
            other = "password_confirmation",
            message = "The password confirmation does not match"
        ),
        length(min = 7, message = "The password must be at least 7 characters")
    )]
    pub password: String,

    /// Password repeated
    #[validate(length(min = 1, message = "The password confirmation field is required"))]
    pub password_confirmation: String,
}

const REGISTER_FIELDS: &[&str] = &["name", "email", "password", "password_confirmation"];

/// Login endpoint
///
/// # Responses
///
/// - `422` validation failure, empty-credential envelope with the first
///   error message
/// - `401` unknown email or wrong password, same empty envelope with
///   message "Unauthorized"
/// - `200` success envelope with token, ttl, and the user record
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    if let Err(errors) = req.validate() {
        let body = AuthEnvelope::denied(first_error(&errors, LOGIN_FIELDS));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let user = match User::find_by_email(&state.db, &req.email).await? {
        Some(user) => user,
        None => return Ok(unauthorized()),
    };

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Ok(unauthorized());
    }

    token_response("User successfully logged in", &state, &user)
}

/// Register endpoint
///
/// Creates the account and issues a token for it in the same request;
/// the new user does not have to log in separately.
///
/// # Responses
///
/// - `422` validation failure (including an already-taken email)
/// - `200` success envelope with token, ttl, and the created user
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Response> {
    if let Err(errors) = req.validate() {
        let body = AuthEnvelope::denied(first_error(&errors, REGISTER_FIELDS));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    // Email uniqueness is a validation outcome, not a conflict error
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        let body = AuthEnvelope::denied("The email has already been taken");
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    token_response("User successfully registered", &state, &user)
}

/// Profile endpoint
///
/// Returns the current principal's user record verbatim (with the
/// password hash redacted by the model's serialization).
pub async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    Ok(Json(user))
}

/// Logout endpoint
///
/// Revokes the presented token. Repeating the call with the same token
/// is rejected by the middleware before it reaches this handler, so
/// from the caller's perspective logout always reports success.
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> ApiResult<Json<serde_json::Value>> {
    RevokedToken::revoke(&state.db, session.token_id, session.expires_at).await?;

    Ok(Json(json!({ "message": "Successfully logged out" })))
}

/// Refresh endpoint
///
/// Revokes the presented token and issues a fresh one for the same
/// principal. Responds with the same shape as a successful login.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> ApiResult<Response> {
    let user = User::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    RevokedToken::revoke(&state.db, session.token_id, session.expires_at).await?;

    token_response("User successfully logged in", &state, &user)
}

/// 401 with the empty-credential envelope
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthEnvelope::denied("Unauthorized")),
    )
        .into_response()
}

/// Issues a fresh token for the user and builds the success envelope
fn token_response(message: &str, state: &AppState, user: &User) -> ApiResult<Response> {
    let ttl = state.token_ttl();
    let claims = jwt::Claims::new(user.id, chrono::Duration::seconds(ttl));
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    let body = AuthEnvelope::granted(message, access_token, ttl, user);
    Ok((StatusCode::OK, Json(body)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation_rules() {
        let req = RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "secret12".to_string(),
            password_confirmation: "secret12".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "secret12".to_string(),
            password_confirmation: "different".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, REGISTER_FIELDS),
            "The password confirmation does not match"
        );
    }

    #[test]
    fn test_password_mismatch_surfaces_before_length() {
        // Short AND mismatched; the mismatch message must win
        let req = RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "x".to_string(),
            password_confirmation: "secret12".to_string(),
        };

        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, REGISTER_FIELDS),
            "The password confirmation does not match"
        );
    }

    #[test]
    fn test_register_first_error_prefers_name() {
        // Everything is wrong; the name error must surface
        let req = RegisterRequest {
            name: String::new(),
            email: "nope".to_string(),
            password: "x".to_string(),
            password_confirmation: String::new(),
        };

        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, REGISTER_FIELDS),
            "The name must be between 1 and 50 characters"
        );
    }

    #[test]
    fn test_login_validation_rules() {
        let req = LoginRequest {
            email: "ann@x.com".to_string(),
            password: "secret12".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret12".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, LOGIN_FIELDS),
            "The email must be a valid email address"
        );

        let req = LoginRequest {
            email: "ann@x.com".to_string(),
            password: "short".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            first_error(&errors, LOGIN_FIELDS),
            "The password must be at least 7 characters"
        );
    }
}
