//! Bearer-token authorization gate applied in front of every route.
//!
//! Requests are classified as public, admin, or team-scoped. This is the
//! sole authorization checkpoint: handlers trust the identity attached to
//! the request extensions unconditionally.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::AppError, state::SharedState};

/// Paths reachable without any credential.
const PUBLIC_PATHS: [&str; 2] = ["/activate", "/healthcheck"];
/// Documentation prefixes, served unauthenticated.
const DOC_PREFIXES: [&str; 2] = ["/docs", "/api-doc"];
/// Namespace gated on the admin bearer.
const ADMIN_PREFIX: &str = "/admin/";

/// Team identity resolved by the authorization gate.
#[derive(Debug, Clone)]
pub struct TeamId(pub String);

/// Marker attached to requests authenticated with the admin bearer.
#[derive(Debug, Clone, Copy)]
pub struct AdminScope;

impl<S: Send + Sync> FromRequestParts<S> for TeamId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TeamId>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("unauthorized".into()))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AdminScope {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminScope>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("unauthorized".into()))
    }
}

/// Classify the request and reject unauthorized calls before they reach
/// business logic.
pub async fn bearer_auth(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if is_public_path(&path) {
        return next.run(request).await;
    }

    let bearer = match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
    {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => return AppError::Unauthorized("missing bearer token".into()).into_response(),
    };

    if path.starts_with(ADMIN_PREFIX) {
        {
            let credentials = state.credentials().lock().await;
            if !credentials.admin_configured() {
                return AppError::ServiceUnavailable("admin bearer not configured".into())
                    .into_response();
            }
            if !credentials.is_admin_bearer(&bearer) {
                return AppError::Unauthorized("invalid admin bearer".into()).into_response();
            }
        }
        request.extensions_mut().insert(AdminScope);
        return next.run(request).await;
    }

    let team_id = {
        let credentials = state.credentials().lock().await;
        credentials.resolve_team(&bearer).map(str::to_string)
    };
    let Some(team_id) = team_id else {
        return AppError::Unauthorized("invalid bearer token".into()).into_response();
    };

    request.extensions_mut().insert(TeamId(team_id));
    next.run(request).await
}

fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || DOC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}
