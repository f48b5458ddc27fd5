use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use scamsmart_core::scores::Player;
use std::sync::Arc;
use tracing::warn;

pub const SECRET_HEADER: &str = "X-ScamSmart-Secret";
pub const USER_HEADER: &str = "X-ScamSmart-User";
pub const NAME_HEADER: &str = "X-ScamSmart-Name";

const MAX_IDENTITY_LEN: usize = 128;

pub async fn require_secret(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // No configured secret means the service runs open.
    let secret = match &state.api_secret {
        Some(s) => s,
        None => return Ok(next.run(req).await),
    };

    let header = req
        .headers()
        .get(SECRET_HEADER)
        .and_then(|h| h.to_str().ok());

    match header {
        Some(val) if val == secret => Ok(next.run(req).await),
        Some(_) => {
            warn!("⛔ Auth Failed: Invalid Secret provided from {:?}", req.uri());
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            warn!("⛔ Auth Failed: Missing Header from {:?}", req.uri());
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// The authenticated player, taken from the identity headers.
#[derive(Debug, Clone)]
pub struct Caller(pub Player);

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_text(&parts.headers, USER_HEADER).ok_or_else(|| {
            AppError::Unauthorized(format!("missing {} header", USER_HEADER))
        })?;
        if id.len() > MAX_IDENTITY_LEN {
            return Err(AppError::Validation("user id too long".into()));
        }

        let mut player = Player::new(id);
        player.name = header_text(&parts.headers, NAME_HEADER)
            .map(|n| n.chars().take(MAX_IDENTITY_LEN).collect());
        Ok(Caller(player))
    }
}
