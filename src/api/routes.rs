use std::path::PathBuf;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    middleware::{make_span_with_request_id, request_id_middleware},
};

use super::{handlers, pages, AppState};

/// Web-facing options that do not belong in request state
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Directory served under `/static`
    pub static_dir: Option<PathBuf>,
    /// Allowed CORS origins; empty disables CORS
    pub allowed_origins: Vec<String>,
}

impl RouterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            static_dir: Some(config.static_dir.clone()),
            allowed_origins: config.cors_origins(),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState, options: &RouterOptions) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        // Pages
        .route("/", get(pages::index))
        .route("/login", get(pages::login_form).post(pages::login))
        .route("/register", get(pages::register_form).post(pages::register))
        .route("/logout", get(pages::logout))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact_form).post(pages::contact))
        .nest("/api", api_routes());

    if let Some(dir) = &options.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    if let Some(cors) = build_cors_layer(&options.allowed_origins) {
        router = router.layer(cors);
    }

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
    )
}

/// JSON routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recommend", post(handlers::recommend))
        .route("/movies", get(handlers::list_movies))
        .route("/movie/:movie_id", get(handlers::get_movie))
        .route("/search", get(handlers::search_movies))
        .route("/admin/reload", post(handlers::reload_catalog))
}

fn build_cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([ACCEPT, CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_disabled_without_origins() {
        assert!(build_cors_layer(&[]).is_none());
        assert!(build_cors_layer(&["bad\norigin".to_string()]).is_none());
    }

    #[test]
    fn test_cors_enabled_with_valid_origin() {
        assert!(build_cors_layer(&["http://localhost:3000".to_string()]).is_some());
    }
}
