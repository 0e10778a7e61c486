//! HTTP handlers for the token endpoints.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};

use super::error::AppError;
use super::origin::ClientOrigin;
use super::routes::AppState;
use crate::api::{SigninQuery, TOKENS_NOT_PROVIDED, USER_ID_NOT_PROVIDED};
use crate::{Notifier, SessionRepository, TokenPair, UserRepository};

/// Issue a token pair for a user.
///
/// POST /signin?userID=<id>
pub async fn signin<U, S, N>(
    State(state): State<AppState<U, S, N>>,
    ClientOrigin(origin): ClientOrigin,
    query: Result<Query<SigninQuery>, QueryRejection>,
) -> Result<Json<TokenPair>, AppError>
where
    U: UserRepository + 'static,
    S: SessionRepository + Clone + 'static,
    N: Notifier + 'static,
{
    let user_id = query
        .ok()
        .and_then(|Query(q)| q.user_id)
        .filter(|id| !id.is_empty())
        .ok_or(AppError::BadRequest(USER_ID_NOT_PROVIDED))?;

    let pair = state.service.issue(&user_id, &origin).await?;
    Ok(Json(pair))
}

/// Validate a token pair and rotate it.
///
/// POST /refresh
pub async fn refresh<U, S, N>(
    State(state): State<AppState<U, S, N>>,
    ClientOrigin(origin): ClientOrigin,
    body: Result<Json<TokenPair>, JsonRejection>,
) -> Result<Json<TokenPair>, AppError>
where
    U: UserRepository + 'static,
    S: SessionRepository + Clone + 'static,
    N: Notifier + 'static,
{
    let Json(pair) = body
        .ok()
        .filter(|Json(p)| !p.access_token.is_empty() && !p.refresh_token.is_empty())
        .ok_or(AppError::BadRequest(TOKENS_NOT_PROVIDED))?;

    let rotated = state.service.validate_and_refresh(&pair, &origin).await?;
    Ok(Json(rotated))
}
