use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use parking_lot::{Mutex, RwLock};
use search_core::{DocId, Document, DocumentStatus, RequestWindow, SearchEngine, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
}

#[derive(Deserialize)]
pub struct NewDocument {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Document>,
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

/// The engine has no internal locking; writers take the lock exclusively.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<SearchEngine>>,
    pub requests: Arc<Mutex<RequestWindow>>,
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn build_app(stop_words: &str) -> Result<Router> {
    let engine = SearchEngine::from_stop_words_text(stop_words)?;
    let app_state = AppState {
        engine: Arc::new(RwLock::new(engine)),
        requests: Arc::new(Mutex::new(RequestWindow::new())),
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
        .route("/stats", get(stats_handler))
        .route("/documents", get(list_handler).post(add_handler))
        .route("/documents/:doc_id", axum::routing::delete(remove_handler))
        .route("/documents/:doc_id/words", get(words_handler))
        .route("/documents/:doc_id/match", get(match_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

fn to_http(err: SearchError) -> (StatusCode, String) {
    let status = match err {
        SearchError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        SearchError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, err.to_string())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<Json<SearchResponse>> {
    let start = std::time::Instant::now();
    let status = params.status.unwrap_or(DocumentStatus::Actual);
    let results = state
        .engine
        .read()
        .find_top_documents_by_status(&params.q, status)
        .map_err(to_http)?;
    state.requests.lock().notify(!results.is_empty());

    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }))
}

async fn add_handler(State(state): State<AppState>, Json(doc): Json<NewDocument>) -> ApiResult<StatusCode> {
    let status = doc.status.unwrap_or(DocumentStatus::Actual);
    state
        .engine
        .write()
        .add_document(doc.id, &doc.text, status, &doc.ratings)
        .map_err(|err| {
            tracing::warn!(doc_id = doc.id, error = %err, "rejected document");
            to_http(err)
        })?;
    tracing::debug!(doc_id = doc.id, %status, "added document");
    Ok(StatusCode::CREATED)
}

async fn remove_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> StatusCode {
    state.engine.write().remove_document(doc_id);
    StatusCode::NO_CONTENT
}

async fn list_handler(State(state): State<AppState>) -> Json<Vec<DocId>> {
    Json(state.engine.read().iter().copied().collect())
}

async fn words_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> ApiResult<Json<BTreeMap<String, f64>>> {
    let engine = state.engine.read();
    let freqs = engine.get_word_frequencies(doc_id).map_err(to_http)?;
    Ok(Json(freqs.clone()))
}

async fn match_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
    Query(params): Query<MatchParams>,
) -> ApiResult<Json<MatchResponse>> {
    let (words, status) = state
        .engine
        .read()
        .match_document(&params.q, doc_id)
        .map_err(to_http)?;
    Ok(Json(MatchResponse { id: doc_id, words, status }))
}

async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let document_count = state.engine.read().document_count();
    let no_result_requests = state.requests.lock().no_result_count();
    Json(StatsResponse { document_count, no_result_requests })
}
