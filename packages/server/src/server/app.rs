//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use extraction::OpenAiExtractor;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::domains::auth::{AuthService, JwtService};
use crate::domains::cases::{CasesService, PostgresCaseStore, CASE_FILE_SIZE_LIMIT};
use crate::server::graphql::create_schema;
use crate::server::middleware::jwt_auth_middleware;
#[cfg(debug_assertions)]
use crate::server::routes::graphql_playground;
use crate::server::routes::{
    delete_case_handler, get_case_handler, graphql_handler, health_handler, import_case_handler,
    login_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub cases: Arc<CasesService>,
    pub auth: Arc<AuthService>,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    // Create GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        config.jwt_access_token_ttl,
    ));

    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; case imports will fail until it is configured");
    }

    // Extraction pipeline with a bounded upstream call
    let extractor = Arc::new(OpenAiExtractor::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        Duration::from_secs(config.openai_timeout_secs),
    ));

    let store = Arc::new(PostgresCaseStore::new(pool.clone()));
    let cases = Arc::new(CasesService::new(store, extractor));
    let auth = Arc::new(AuthService::new(pool.clone(), jwt_service.clone()));

    let app_state = AxumAppState {
        db_pool: pool,
        cases,
        auth,
        jwt_service: jwt_service.clone(),
    };

    // CORS: explicit origins when configured, permissive otherwise
    // (development)
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new().allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
    .allow_methods([Method::GET, Method::POST, Method::DELETE])
    .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = jwt_service.clone();

    // Build router
    #[allow(unused_mut)]
    let mut router = Router::new().route("/graphql", post(graphql_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route("/graphql", get(graphql_playground));
    }

    router
        .route("/auth/login", post(login_handler))
        .route("/cases/import", post(import_case_handler))
        .route(
            "/cases/:id",
            get(get_case_handler).delete(delete_case_handler),
        )
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        // Leave headroom for multipart framing around the file cap
        .layer(DefaultBodyLimit::max(CASE_FILE_SIZE_LIMIT + 64 * 1024))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State (schema for GraphQL handlers)
        .with_state(schema)
}
