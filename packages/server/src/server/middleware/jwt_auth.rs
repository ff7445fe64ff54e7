use crate::common::auth::{AuthenticatedUser, Subject};
use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
///
/// Resolves the request's `Subject` from the Authorization header and adds it
/// to request extensions. A missing or invalid token yields
/// `Subject::Anonymous`, never a partially-populated user.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let subject = extract_subject(&request, &jwt_service);

    match &subject {
        Subject::Authenticated(user) => debug!(
            "Authenticated user: {} (role: {:?}, staff: {}, superuser: {})",
            user.user_id, user.role, user.is_staff, user.is_superuser
        ),
        Subject::Anonymous => debug!("No valid authentication token"),
    }

    request.extensions_mut().insert(subject);
    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_subject(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Subject {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        // Handle both "Bearer <token>" and raw token
        .map(|auth| auth.strip_prefix("Bearer ").unwrap_or(auth));

    token
        .and_then(|token| jwt_service.verify_token(token).ok())
        .map(|claims| Subject::Authenticated(AuthenticatedUser::from(claims)))
        .unwrap_or_default()
}
