mod auth;
mod diet;
mod error;
mod recipes;
mod system;
mod validation;

pub use error::{ApiError, ErrorCode, ErrorResponse};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login));

    // Fully open CORS, credentials included: this is a demo backend meant
    // to be called straight from any frontend origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(tower_http::cors::AllowMethods::mirror_request())
        .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(system::root))
        .route("/test", get(system::probe))
        .nest("/auth", auth_routes)
        .route("/diet/plan", post(diet::diet_plan))
        .route("/recipes/search", post(recipes::search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::Config;
    use crate::mealdb::MealDbClient;
    use crate::store::MemoryStore;
    use std::time::Duration;

    /// State backed by an in-memory store and a recipe client pointed at an
    /// unroutable address (port 9, discard), so lookups fail fast.
    pub(crate) fn state_with_store() -> Arc<AppState> {
        let recipes =
            MealDbClient::new("http://127.0.0.1:9/api", Duration::from_millis(200)).unwrap();
        Arc::new(AppState::new(
            Config::default(),
            Some(Arc::new(MemoryStore::new())),
            recipes,
        ))
    }

    pub(crate) fn state_without_store() -> Arc<AppState> {
        let recipes =
            MealDbClient::new("http://127.0.0.1:9/api", Duration::from_millis(200)).unwrap();
        Arc::new(AppState::new(Config::default(), None, recipes))
    }
}
