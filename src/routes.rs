// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo da API.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Clientes
        .route(
            "/api/customers",
            post(handlers::customer::create_customer).patch(handlers::customer::update_customer),
        )
        .route(
            "/api/customers/{id}",
            get(handlers::customer::find_customer).delete(handlers::customer::delete_customer),
        )
        // Créditos
        .route(
            "/api/credits",
            post(handlers::credit::create_credit).get(handlers::credit::list_credits),
        )
        .route("/api/credits/{credit_code}", get(handlers::credit::find_credit))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
