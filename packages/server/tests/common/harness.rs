//! Test harness wiring the real router to in-memory state.

use std::sync::{Arc, Once};

use axum::Router;
use shelfgate::common::auth::{bootstrap, AuthenticatedUser, Policy, PolicyRegistry};
use shelfgate::domains::auth::JwtService;
use shelfgate::server::{build_app, AppState};

static TRACING: Once = Once::new();

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct TestHarness {
    pub state: AppState,
    pub jwt_service: Arc<JwtService>,
}

impl TestHarness {
    /// Harness with the default groups seeded.
    pub fn new() -> Self {
        let registry = PolicyRegistry::new();
        bootstrap::seed_default_groups(&registry);
        Self::from_registry(registry)
    }

    #[allow(dead_code)]
    pub fn with_policy(policy: Policy) -> Self {
        Self::from_registry(PolicyRegistry::with_policy(policy))
    }

    /// Harness whose registry was never provisioned.
    #[allow(dead_code)]
    pub fn unprovisioned() -> Self {
        Self::from_registry(PolicyRegistry::new())
    }

    fn from_registry(registry: PolicyRegistry) -> Self {
        init_tracing();
        let jwt_service = Arc::new(JwtService::new("test_secret", "shelfgate-test".to_string()));
        let state = AppState::new(Arc::new(registry), jwt_service.clone());
        Self { state, jwt_service }
    }

    pub fn app(&self) -> Router {
        build_app(self.state.clone())
    }

    pub fn token_for(&self, user: &AuthenticatedUser) -> String {
        self.jwt_service
            .create_token(user)
            .expect("Failed to create test token")
    }
}
