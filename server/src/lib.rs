use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use parking_lot::{Mutex, RwLock};
use search_core::corpus::{ingest, read_documents, InputDoc};
use search_core::{DocId, Document, DocumentStatus, RequestStats, SearchError, SearchServer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Documents loaded at startup (JSON/JSONL file or directory)
    pub docs: Option<String>,
    pub stop_words: String,
    /// Required in `X-ADMIN-TOKEN` to add documents; adding is refused when unset
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub status: DocumentStatus,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<Document>,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
    pub id: DocId,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub id: DocId,
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub document_count: usize,
    pub no_result_requests: usize,
}

/// Queries take the read lock, ingestion the write lock, so a query never
/// sees a half-added document.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<RwLock<SearchServer>>,
    pub stats: Arc<Mutex<RequestStats>>,
    pub admin_token: Option<String>,
}

type ApiError = (StatusCode, String);

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let mut search = SearchServer::with_stop_words(&config.stop_words)?;
    if let Some(docs) = &config.docs {
        ingest(&mut search, read_documents(docs)?);
    }
    let app_state = AppState {
        search: Arc::new(RwLock::new(search)),
        stats: Arc::new(Mutex::new(RequestStats::new())),
        admin_token: config.admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/match", get(match_handler))
        .route("/doc/:ordinal", get(doc_handler))
        .route("/stats", get(stats_handler))
        .route("/documents", post(add_document))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let results = state.search.read().find_top_documents_by_status(&params.q, params.status).map_err(api_error)?;
    state.stats.lock().record(results.len());
    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), results }))
}

pub async fn match_handler(State(state): State<AppState>, Query(params): Query<MatchParams>) -> Result<Json<MatchResponse>, ApiError> {
    let (words, status) = state.search.read().match_document(&params.q, params.id).map_err(api_error)?;
    Ok(Json(MatchResponse { id: params.id, words, status }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(ordinal): Path<usize>) -> Result<Json<serde_json::Value>, ApiError> {
    let id = state.search.read().document_id(ordinal).map_err(api_error)?;
    Ok(Json(serde_json::json!({ "ordinal": ordinal, "id": id })))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let document_count = state.search.read().document_count();
    let no_result_requests = state.stats.lock().no_result_requests();
    Json(StatsResponse { document_count, no_result_requests })
}

async fn add_document(State(state): State<AppState>, headers: HeaderMap, Json(doc): Json<InputDoc>) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    authorize(&state, &headers)?;
    state.search.write().add_document(doc.id, &doc.text, doc.status, &doc.ratings).map_err(api_error)?;
    tracing::info!(doc_id = doc.id, "document added");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": doc.id }))))
}

fn api_error(err: SearchError) -> ApiError {
    let status = match err {
        SearchError::Validation(_) => StatusCode::BAD_REQUEST,
        SearchError::DuplicateId(_) => StatusCode::CONFLICT,
        SearchError::IndexOutOfRange { .. } | SearchError::UnknownDocument(_) => StatusCode::NOT_FOUND,
    };
    (status, err.to_string())
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
