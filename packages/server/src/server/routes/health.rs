use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    policy: PolicyHealth,
    content: ContentCounts,
}

#[derive(Serialize)]
pub struct PolicyHealth {
    status: String,
    roles: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unreachable_permissions: Vec<String>,
}

#[derive(Serialize)]
pub struct ContentCounts {
    authors: usize,
    books: usize,
    posts: usize,
    comments: usize,
}

/// Health check endpoint
///
/// 200 once roles are provisioned. A policy with only public-read kinds
/// still serves anonymous reads and staff, so it reports degraded with a
/// 200. A completely empty policy is 503.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let policy = state.registry.snapshot();
    let has_public = policy.public_kinds().next().is_some();

    let (status_code, status, policy_status) = if policy.is_populated() {
        (StatusCode::OK, "healthy", "ok")
    } else if has_public {
        (StatusCode::OK, "degraded", "public_only")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "unprovisioned")
    };

    let policy_health = PolicyHealth {
        status: policy_status.to_string(),
        roles: policy.roles().count(),
        unreachable_permissions: policy
            .unreachable_permissions()
            .iter()
            .map(|p| p.to_string())
            .collect(),
    };

    let content = ContentCounts {
        authors: state.authors.len().await,
        books: state.books.len().await,
        posts: state.posts.len().await,
        comments: state.comments.len().await,
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            policy: policy_health,
            content,
        }),
    )
}
