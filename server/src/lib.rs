use anyhow::Result;
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use telusur_core::batch::read_batch;
use telusur_core::config::EngineConfig;
use telusur_core::{Error, ProcessOutput, SearchOutput, SourceFile};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the current batch of uploaded documents.
    pub upload_dir: PathBuf,
    pub engine: EngineConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub upload_dir: PathBuf,
    pub engine: EngineConfig,
    /// Serializes access to the upload directory between uploads and reads.
    pub store: Arc<Mutex<()>>,
}

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").expect("valid regex");
}

#[derive(Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
}

/// `POST /search` body: a urlencoded form, or JSON when the request says so.
pub struct SearchRequest(pub SearchForm);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for SearchRequest {
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        if is_json {
            let Json(form) = Json::<SearchForm>::from_request(req, state)
                .await
                .map_err(|e| (e.status(), e.body_text()))?;
            Ok(SearchRequest(form))
        } else {
            let Form(form) = Form::<SearchForm>::from_request(req, state)
                .await
                .map_err(|e| (e.status(), e.body_text()))?;
            Ok(SearchRequest(form))
        }
    }
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub stored: Vec<String>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn build_app(config: ServerConfig) -> Result<Router> {
    std::fs::create_dir_all(&config.upload_dir)?;
    // Fail at startup on a bad stemmer name or unreadable data files.
    config.engine.pipeline()?;
    let app_state = AppState { upload_dir: config.upload_dir, engine: config.engine, store: Arc::new(Mutex::new(())) };

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
        .route("/upload", post(upload_handler))
        .route("/process", get(process_handler))
        .route("/search", post(search_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// Replaces the stored batch with the `documents` fields of the form.
pub async fn upload_handler(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult<UploadResponse> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut taken = HashSet::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))? {
        if field.name() != Some("documents") {
            continue;
        }
        let filename = secure_filename(field.file_name().unwrap_or_default());
        let bytes = field.bytes().await.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        if filename.is_empty() {
            continue;
        }
        let filename = unique_filename(filename, &taken);
        taken.insert(filename.clone());
        files.push((filename, bytes.to_vec()));
    }
    if files.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No file uploaded".into()));
    }

    let stored = run_blocking(move || {
        let _guard = state.store.lock();
        replace_batch(&state.upload_dir, &files).map_err(internal)
    })
    .await?;
    tracing::info!(files = stored.len(), "stored uploaded batch");
    Ok(Json(UploadResponse { stored }))
}

pub async fn process_handler(State(state): State<AppState>) -> ApiResult<ProcessOutput> {
    let out = run_blocking(move || {
        let batch = load_batch(&state)?;
        let pipeline = state.engine.pipeline().map_err(|e| error_response(&e))?;
        pipeline.process(&batch).map_err(|e| error_response(&e))
    })
    .await?;
    Ok(Json(out))
}

pub async fn search_handler(State(state): State<AppState>, SearchRequest(form): SearchRequest) -> ApiResult<SearchOutput> {
    let Some(query) = form.query else {
        return Err(error_response(&Error::MissingQuery));
    };
    let out = run_blocking(move || {
        let batch = load_batch(&state)?;
        let pipeline = state.engine.pipeline().map_err(|e| error_response(&e))?;
        pipeline.search(&batch, Some(&query)).map_err(|e| error_response(&e))
    })
    .await?;
    Ok(Json(out))
}

/// Extraction, stemming and store I/O stay off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, (StatusCode, String)>
where
    F: FnOnce() -> Result<T, (StatusCode, String)> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(internal)?
}

fn load_batch(state: &AppState) -> Result<Vec<SourceFile>, (StatusCode, String)> {
    let _guard = state.store.lock();
    read_batch(&state.upload_dir).map_err(|e| error_response(&e))
}

/// Status codes for core failures surfaced to HTTP callers.
pub fn error_response(e: &Error) -> (StatusCode, String) {
    let status = match e {
        Error::MissingQuery => StatusCode::BAD_REQUEST,
        Error::EmptyVocabulary => StatusCode::UNPROCESSABLE_ENTITY,
        _ => {
            tracing::error!(error = %e, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    tracing::error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Appends `_1`, `_2`, ... to the stem until the name is not yet taken.
fn unique_filename(name: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&name) {
        return name;
    }
    let path = Path::new(&name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(&name);
    let ext = path.extension().and_then(|s| s.to_str());
    let mut n = 1;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        };
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Empties the upload directory (files only) and writes the new batch.
fn replace_batch(dir: &Path, files: &[(String, Vec<u8>)]) -> std::io::Result<Vec<String>> {
    std::fs::create_dir_all(dir)?;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            if let Err(e) = std::fs::remove_file(entry.path()) {
                tracing::warn!(path = %entry.path().display(), error = %e, "failed to delete stored file");
            }
        }
    }
    let mut stored = Vec::with_capacity(files.len());
    for (name, bytes) in files {
        std::fs::write(dir.join(name), bytes)?;
        stored.push(name.clone());
    }
    Ok(stored)
}

/// Reduces an uploaded file name to a safe ASCII name without path
/// components, e.g. `../../etc/passwd` becomes `etc_passwd`.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    UNSAFE_FILENAME_CHARS.replace_all(&joined, "").trim_matches(|c| c == '.' || c == '_').to_string()
}
