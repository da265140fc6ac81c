use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod products;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, users, products and API docs.
///
/// Collection routes answer with and without the trailing slash.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let upload_limit = state.max_upload_bytes;

    let user_routes = Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/", get(users::list).post(users::create))
        .route("/users/:id", get(users::get).put(users::update).delete(users::delete));

    let product_routes = Router::new()
        .route("/products", get(products::list).post(products::create))
        .route("/products/", get(products::list).post(products::create))
        .route("/products/:id", get(products::get).put(products::update).delete(products::delete))
        .route(
            "/products/:id/upload_image",
            post(products::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        );

    Router::new()
        .route("/health", get(health))
        .merge(user_routes)
        .merge(product_routes)
        .merge(SwaggerUi::new("/apidocs").url("/apispec_1.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
