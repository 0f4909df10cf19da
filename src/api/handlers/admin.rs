//! Admin login, session, and security-info endpoints.
//!
//! The guard keeps exactly one session slot. A request is only treated as the
//! admin when it presents the token issued at login, either as the
//! `tutorgate_session` cookie or as a bearer token.

use anyhow::{Context, anyhow};
use axum::{
    Json,
    extract::Extension,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, COOKIE, InvalidHeaderValue, RETRY_AFTER, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::error;

use super::types::{LoginRequest, LoginResponse, SessionResponse};
use crate::guard::{AuthOutcome, Guard, GuardError, SecurityInfo};

pub const SESSION_COOKIE_NAME: &str = "tutorgate_session";
const RETRY_MESSAGE: &str = "Unable to reach the login service, please try again";

/// Shared handler state: the single guard instance plus cookie settings.
#[derive(Debug)]
pub struct AdminState {
    guard: Mutex<Guard>,
    cookie_secure: bool,
}

impl AdminState {
    #[must_use]
    pub fn new(guard: Guard, cookie_secure: bool) -> Self {
        Self {
            guard: Mutex::new(guard),
            cookie_secure,
        }
    }
}

/// Run `op` against the guard on the blocking pool.
///
/// Guard calls hash passwords and touch the store, so they stay off the
/// async workers. The lock is taken inside the blocking task.
async fn run_guard<T, F>(state: &Arc<AdminState>, op: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut Guard) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let mut guard = state
            .guard
            .lock()
            .map_err(|_| anyhow!("guard lock poisoned"))?;
        op(&mut guard)
    })
    .await
    .context("guard task failed")?
}

#[utoipa::path(
    post,
    path = "/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, or a one-time code is required", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = LoginResponse),
        (status = 429, description = "Too many failed attempts", body = LoginResponse),
        (status = 500, description = "Internal error, retry", body = LoginResponse)
    ),
    tag = "admin"
)]
pub async fn login(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AdminState>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    let origin = extract_client_ip(&headers);
    let LoginRequest {
        username,
        password,
        one_time_code,
    } = request;

    let outcome = run_guard(&state, move |guard| {
        let outcome = guard.authenticate(
            &username,
            &password,
            one_time_code.as_deref(),
            origin.as_deref(),
        )?;
        Ok((outcome, guard.config().session_ttl_seconds()))
    })
    .await;

    let (outcome, ttl_seconds) = match outcome {
        Ok(result) => result,
        Err(err) => {
            error!("Login failed with internal error: {err:#}");
            return internal_error();
        }
    };

    let response = outcome.response();
    let mut body = LoginResponse {
        success: response.success,
        message: response.message,
        require_one_time_code: response.require_one_time_code,
        session_token: None,
    };

    match outcome {
        AuthOutcome::Authenticated(session) => {
            let mut response_headers = HeaderMap::new();
            match session_cookie(&session.session_id, ttl_seconds, state.cookie_secure) {
                Ok(cookie) => {
                    response_headers.insert(SET_COOKIE, cookie);
                }
                Err(err) => error!("Failed to build session cookie: {err}"),
            }
            body.session_token = Some(session.session_id);
            (StatusCode::OK, response_headers, Json(body)).into_response()
        }
        AuthOutcome::CodeRequired => (StatusCode::OK, Json(body)).into_response(),
        AuthOutcome::Rejected(GuardError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
        AuthOutcome::Rejected(GuardError::RateLimited { minutes }) => {
            let mut response_headers = HeaderMap::new();
            response_headers.insert(RETRY_AFTER, HeaderValue::from(minutes.max(0) * 60));
            (StatusCode::TOO_MANY_REQUESTS, response_headers, Json(body)).into_response()
        }
        AuthOutcome::Rejected(GuardError::StorageCorrupt { .. }) => internal_error(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/admin/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "admin"
)]
pub async fn session(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AdminState>>,
) -> impl IntoResponse {
    // Missing tokens are treated as "no session" to avoid leaking auth state.
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let result = run_guard(&state, move |guard| {
        if guard.session_token_matches(&token)? && guard.is_authenticated()? {
            session_response(guard).map(Some)
        } else {
            Ok(None)
        }
    })
    .await;

    match result {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to lookup session: {err:#}");
            internal_error()
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/admin/session/extend",
    responses(
        (status = 200, description = "Session extended", body = SessionResponse),
        (status = 401, description = "No live session for this token")
    ),
    tag = "admin"
)]
pub async fn extend(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AdminState>>,
) -> impl IntoResponse {
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let result = run_guard(&state, move |guard| {
        if guard.session_token_matches(&token)? && guard.extend_session()? {
            session_response(guard).map(Some)
        } else {
            Ok(None)
        }
    })
    .await;

    match result {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => StatusCode::UNAUTHORIZED.into_response(),
        Err(err) => {
            error!("Failed to extend session: {err:#}");
            internal_error()
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/admin/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "admin"
)]
pub async fn logout(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AdminState>>,
) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        let result = run_guard(&state, move |guard| {
            if guard.session_token_matches(&token)? {
                guard.logout()
            } else {
                Ok(())
            }
        })
        .await;
        if let Err(err) = result {
            error!("Failed to delete session: {err:#}");
        }
    }

    // Always clear the cookie, even if the session record was missing.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(state.cookie_secure) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}

#[utoipa::path(
    get,
    path = "/v1/admin/security",
    responses(
        (status = 200, description = "Lockout, session and login-stage snapshot", body = SecurityInfo)
    ),
    tag = "admin"
)]
pub async fn security(Extension(state): Extension<Arc<AdminState>>) -> impl IntoResponse {
    match run_guard(&state, |guard| guard.security_info()).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(err) => {
            error!("Failed to read security info: {err:#}");
            internal_error()
        }
    }
}

fn session_response(guard: &Guard) -> anyhow::Result<SessionResponse> {
    Ok(SessionResponse {
        authenticated: true,
        username: guard.config().credentials().username().to_string(),
        session_time_remaining: guard.session_time_remaining()?,
    })
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": RETRY_MESSAGE })),
    )
        .into_response()
}

/// Build an `HttpOnly` cookie carrying the session token.
fn session_cookie(
    token: &str,
    ttl_seconds: i64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie =
        format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let value = headers.get(COOKIE)?.to_str().ok()?;
    value.split(';').find_map(|pair| {
        let (key, val) = pair.trim().split_once('=')?;
        (key.trim() == SESSION_COOKIE_NAME && !val.trim().is_empty())
            .then(|| val.trim().to_string())
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Client IP from common proxy headers; recorded as the attempt origin.
fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if forwarded.is_some() {
        return forwarded.map(str::to_string);
    }
    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
