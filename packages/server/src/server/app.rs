//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::common::auth::{AuthorizationGate, HasAuthContext, PolicyRegistry};
use crate::domains::auth::JwtService;
use crate::domains::authors::{edges as authors, Author};
use crate::domains::books::{edges as books, Book};
use crate::domains::comments::{edges as comments, Comment};
use crate::domains::posts::{edges as posts, Post};
use crate::kernel::ContentStore;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{health_handler, me_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PolicyRegistry>,
    pub jwt_service: Arc<JwtService>,
    pub authors: ContentStore<Author>,
    pub books: ContentStore<Book>,
    pub posts: ContentStore<Post>,
    pub comments: ContentStore<Comment>,
}

impl AppState {
    pub fn new(registry: Arc<PolicyRegistry>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            registry,
            jwt_service,
            authors: ContentStore::new(),
            books: ContentStore::new(),
            posts: ContentStore::new(),
            comments: ContentStore::new(),
        }
    }
}

impl HasAuthContext for AppState {
    fn gate(&self) -> AuthorizationGate {
        self.registry.gate()
    }
}

/// Build the Axum application router
///
/// The registry must already be provisioned; an empty one denies every
/// non-staff request.
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let jwt_service = state.jwt_service.clone();

    Router::new()
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/posts/:id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/:id",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route("/me", get(me_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
