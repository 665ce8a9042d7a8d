use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderValue, StatusCode}, routing::get, Json, Router};
use questions_core::{load_corpus, Engine, RankOptions, ScoredFile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_MATCHES: usize = 100;

#[derive(Deserialize)]
pub struct AskParams {
    pub q: String,
    #[serde(default = "default_n")]
    pub files: usize,
    #[serde(default = "default_n")]
    pub sentences: usize,
    #[serde(default)]
    pub highlight: bool,
}
fn default_n() -> usize { 1 }

#[derive(Serialize)]
pub struct AskResponse {
    pub query: String,
    pub terms: Vec<String>,
    pub took_s: f64,
    pub files: Vec<ScoredFile>,
    pub sentences: Vec<SentenceHit>,
}

#[derive(Serialize)]
pub struct SentenceHit {
    pub text: String,
    pub idf_sum: f64,
    pub density: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn build_app(corpus_dir: &str, ext: Option<&str>) -> Result<Router> {
    // Rank the document pool once at startup
    let corpus = load_corpus(corpus_dir, ext)?;
    let engine = Engine::new(corpus)?;
    let app_state = AppState { engine: Arc::new(engine) };

    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ask", get(ask_handler))
        .route("/docs", get(docs_handler))
        .route("/doc/:name", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn ask_handler(State(state): State<AppState>, Query(params): Query<AskParams>) -> Result<Json<AskResponse>, ApiError> {
    let start = std::time::Instant::now();
    let opts = RankOptions {
        file_matches: params.files.min(MAX_MATCHES),
        sentence_matches: params.sentences.min(MAX_MATCHES),
    };
    let answer = state.engine.ask(&params.q, &opts).map_err(|e| {
        tracing::warn!(error = %e, "ask failed");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(serde_json::json!({ "error": e.to_string() })))
    })?;

    let terms: Vec<String> = answer.query.iter().map(String::from).collect();
    let sentences = answer
        .sentences
        .into_iter()
        .map(|s| {
            let highlighted = if params.highlight { Some(highlight_terms(&s.text, &terms)) } else { None };
            SentenceHit { text: s.text, idf_sum: s.idf_sum, density: s.density, highlighted }
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(took_s = elapsed.as_secs_f64(), "answered query");
    Ok(Json(AskResponse { query: params.q, terms, took_s: elapsed.as_secs_f64(), files: answer.files, sentences }))
}

pub async fn docs_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.engine.corpus().keys().cloned().collect())
}

pub async fn doc_handler(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<serde_json::Value>, ApiError> {
    match state.engine.corpus().get(&name) {
        Some(text) => Ok(Json(serde_json::json!({
            "name": name,
            "tokens": state.engine.file_words().get(&name).map_or(0, |w| w.len()),
            "text": text,
        }))),
        None => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))),
    }
}

/// Any origin unless `allowed` names at least one valid origin.
fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let origins = allowed.map(parse_origins).unwrap_or_default();
    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(origins))
    }
}

fn parse_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty()).filter_map(|s| s.parse().ok()).collect()
}

/// Wrap whole-word, case-insensitive occurrences of `terms` in `<em>`.
fn highlight_terms(text: &str, terms: &[String]) -> String {
    if terms.is_empty() {
        return text.to_string();
    }
    let mut sorted: Vec<&str> = terms.iter().map(String::as_str).collect();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.len()));
    let alternation = sorted.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    match regex::RegexBuilder::new(&format!(r"\b(?:{alternation})\b")).case_insensitive(true).build() {
        Ok(pat) => pat.replace_all(text, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).to_string(),
        Err(_) => text.to_string(),
    }
}
