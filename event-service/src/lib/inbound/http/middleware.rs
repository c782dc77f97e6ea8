use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::Session;
use crate::domain::session::models::AUTH_COOKIE;
use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Authorization context attached to the request after a gate passes.
///
/// Downstream handlers read the acting user and granted tier from here;
/// the audit log's acting-user field comes from this and nowhere else.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Acting user's email.
    pub user: String,
    pub session: Session,
    /// Tier this request was granted.
    pub access: Role,
}

/// Extract the presented token from the `Authorization` header or the
/// named auth cookie. The header takes precedence when both are present.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(http::header::AUTHORIZATION) {
        // The token is sent raw, without a Bearer prefix
        if let Ok(raw) = value.to_str() {
            return Some(raw.trim().to_string());
        }
    }

    let jar = CookieJar::from_headers(headers);
    jar.get(AUTH_COOKIE).map(|cookie| cookie.value().to_string())
}

/// Gate: any valid session may pass.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, req, next, None).await
}

/// Gate: user tier or higher.
pub async fn require_user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, req, next, Some(Role::User)).await
}

/// Gate: staff tier or higher.
pub async fn require_staff(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, req, next, Some(Role::Staff)).await
}

/// Gate: admin tier only.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(state, req, next, Some(Role::Admin)).await
}

/// Resolve the session and enforce the required tier.
///
/// The session is always resolved through the store, so the comparison
/// uses the live user's role; the signed claim in the token plays no part
/// on this path. No token or no session is `Unauthenticated`; a session
/// with an insufficient role is `Forbidden`. Both are terminal.
async fn gate(
    state: AppState,
    mut req: Request,
    next: Next,
    tier: Option<Role>,
) -> Result<Response, ApiError> {
    let token =
        extract_token(req.headers()).ok_or_else(|| ApiError::from(AuthError::Unauthenticated))?;

    let session = state
        .auth
        .resolve(&token)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::from(AuthError::Unauthenticated))?;

    let access = match tier {
        Some(tier) => {
            if !session.user.role.satisfies(tier) {
                tracing::warn!(
                    user = %session.email,
                    role = %session.user.role,
                    required = %tier,
                    "Denied by role gate"
                );
                return Err(AuthError::Forbidden.into());
            }
            tier
        }
        None => session.user.role,
    };

    let context = AuthContext {
        user: session.email.clone(),
        session,
        access,
    };
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
