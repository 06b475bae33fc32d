use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::Role,
    error::AppError,
};

/// Identity taken from a verified bearer token. The user row is not re-read,
/// so a role change takes effect when the next token is issued.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    AnyRole,
    Staff,
    AdminOnly,
}

impl AccessPolicy {
    pub fn permits(self, role: Role) -> bool {
        match (self, role) {
            (AccessPolicy::AnyRole, _) => true,
            (AccessPolicy::Staff, Role::Trainer | Role::Admin) => true,
            (AccessPolicy::Staff, Role::Member) => false,
            (AccessPolicy::AdminOnly, Role::Admin) => true,
            (AccessPolicy::AdminOnly, Role::Member | Role::Trainer) => false,
        }
    }
}

fn authorize(
    state: &AppState,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    policy: AccessPolicy,
) -> Result<CurrentUser, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let claims = state.service_context.token_issuer.verify(bearer.token())?;

    if !policy.permits(claims.role) {
        tracing::debug!("User {} with role {} denied by {:?}", claims.sub, claims.role, policy);
        return Err(AppError::Forbidden("insufficient role".to_string()));
    }

    Ok(CurrentUser {
        user_id: claims.sub,
        role: claims.role,
    })
}

pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authorize(&state, bearer, AccessPolicy::AnyRole)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub async fn require_staff(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authorize(&state, bearer, AccessPolicy::Staff)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authorize(&state, bearer, AccessPolicy::AdminOnly)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
