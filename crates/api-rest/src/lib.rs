//! # API REST
//!
//! REST API implementation for Pharma Tools.
//!
//! Handles:
//! - HTTP endpoints with axum (drug search, self-medication questions and scoring)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for wire types and `pharma-core` for the domain logic.

#![warn(rust_2018_idioms)]

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    DrugDto, HealthRes, QuestionDto, QuestionsRes, ScoreReq, ScoreRes, SubstanceDto,
    TriggeredRiskDto,
};
use pharma_core::DrugCatalog;

/// Application state shared across REST API handlers.
///
/// Holds only read-only data; handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<DrugCatalog>,
}

impl AppState {
    pub fn new(catalog: DrugCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::search,
        handlers::questions,
        handlers::score,
    ),
    components(schemas(
        HealthRes,
        DrugDto,
        SubstanceDto,
        QuestionDto,
        QuestionsRes,
        ScoreReq,
        ScoreRes,
        TriggeredRiskDto,
    ))
)]
pub struct ApiDoc;

/// Builds the full router, Swagger UI included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/search", get(handlers::search))
        .route(
            "/api/automedication/questions/:substance",
            get(handlers::questions),
        )
        .route("/api/automedication/score", post(handlers::score))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the API until the process stops.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
