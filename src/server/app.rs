use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{
    auth, groups, health, history, ingredients, pests, products, recommendations,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState { db };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // API routes
        .nest("/api", api_routes())
        // Add middleware
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Login
        .route("/login", post(auth::login))
        // Pest catalog
        .route("/pests", get(pests::list_pests))
        .route("/pests", post(pests::create_pest))
        .route("/pests/:id", get(pests::get_pest))
        .route("/pests/:id", put(pests::update_pest))
        .route("/pests/:id", delete(pests::delete_pest))
        .route("/pests/:id/solutions", get(pests::list_solutions))
        // Active ingredient catalog
        .route("/ingredients", get(ingredients::list_ingredients))
        .route("/ingredients", post(ingredients::create_ingredient))
        .route("/ingredients/:c_id", put(ingredients::update_ingredient))
        .route("/ingredients/:c_id", delete(ingredients::delete_ingredient))
        // Trade product catalog
        .route("/products", get(products::list_products))
        .route("/products", post(products::create_product))
        .route("/products/:id", put(products::update_product))
        .route("/products/:id", delete(products::delete_product))
        // IRAC group reference data
        .route("/groups", get(groups::list_groups))
        // Rotation engine and drill-down
        .route(
            "/users/:user_id/plots/:plot_name/pests/:pest_id/moa-recommendations",
            get(recommendations::get_moa_recommendations),
        )
        .route(
            "/moa/:g_id/pests/:pest_id/ingredients",
            get(recommendations::list_ingredients_for_moa),
        )
        .route(
            "/ingredients/:c_id/products",
            get(recommendations::list_products_for_ingredient),
        )
        // Usage ledger
        .route("/usage-history", post(history::record_application))
        .route("/usage-history/:user_id", get(history::list_user_history))
}
