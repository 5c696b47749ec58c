//! # ll97-server: HTTP Facade
//!
//! Serves the calculator and report renderer to the browser front end:
//!
//! | Route | |
//! |-------|---|
//! | `POST /calculate` | building payload → calculation result JSON |
//! | `POST /generate-report` | building payload (+ chart) → PDF attachment |
//! | `GET /` | `index.html` from the static directory |
//! | `GET /<path>` | any other file under the static directory |
//!
//! Factor tables are loaded once at startup and shared read-only through an
//! `Arc<AppState>`.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Extension},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ll97_core::{calculate, validate_building, CalculationResult, FactorTables};
use ll97_io::{parse_payload, BuildingPayload, Ll97Config};
use ll97_report::{decode_chart_payload, render_report, report_filename};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Largest accepted request body. Chart images make reports sizeable.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub struct AppState {
    pub tables: FactorTables,
    /// Canonical path of the static asset directory.
    pub static_root: PathBuf,
    pub output_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(tables: FactorTables, static_dir: &Path, output_dir: Option<PathBuf>) -> Result<Self> {
        let static_root = fs::canonicalize(static_dir)
            .with_context(|| format!("static directory '{}'", static_dir.display()))?;
        if let Some(dir) = &output_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory '{}'", dir.display()))?;
        }
        Ok(Self {
            tables,
            static_root,
            output_dir,
        })
    }

    /// Load factor tables and directories as described by `config`.
    pub fn from_config(config: &Ll97Config) -> Result<Self> {
        let tables = ll97_io::resolve_factor_tables(
            config.data.emissions_factors.as_deref(),
            config.data.limit_factors.as_deref(),
            config.calc.penalty_rate,
        )?;
        Self::new(
            tables,
            &config.server.static_dir,
            config.server.output_dir.clone(),
        )
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/calculate", post(calculate_handler))
        .route("/generate-report", post(generate_report))
        .fallback(static_file)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(Extension(state))
}

/// A failed request, reported as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}

fn read_payload(body: &[u8]) -> Result<BuildingPayload, ApiError> {
    let text = std::str::from_utf8(body)
        .map_err(|_| ApiError::bad_request("request body is not valid UTF-8"))?;
    parse_payload(text).map_err(|err| ApiError::bad_request(format!("{err:#}")))
}

fn run_calculation(state: &AppState, payload: &BuildingPayload) -> CalculationResult {
    let building = payload.building();
    let usage = payload.usage();
    for issue in validate_building(&state.tables, &building, &usage).issues {
        warn!(building = %building.building_name, "{issue}");
    }
    calculate(&state.tables, &building, &usage)
}

pub async fn calculate_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CalculationResult>, ApiError> {
    let payload = read_payload(&body)?;
    let result = run_calculation(&state, &payload);
    debug!(
        building = %result.building_name,
        periods = result.periods.len(),
        "calculated emissions"
    );
    Ok(Json(result))
}

pub async fn generate_report(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload = read_payload(&body)?;
    let result = run_calculation(&state, &payload);
    let chart = payload
        .chart_image_base64
        .as_deref()
        .and_then(decode_chart_payload);
    let filename = report_filename(&result.building_name);

    let output_dir = state.output_dir.clone();
    let name = filename.clone();
    let pdf = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let pdf = render_report(&result, chart.as_deref())?;
        if let Some(dir) = output_dir {
            // never leave the output directory
            let file = Path::new(&name)
                .file_name()
                .with_context(|| format!("report name '{name}' is not a file name"))?;
            let path = dir.join(file);
            fs::write(&path, &pdf)
                .with_context(|| format!("writing report '{}'", path.display()))?;
            info!(path = %path.display(), "saved report");
        }
        Ok(pdf)
    })
    .await
    .map_err(|err| ApiError::internal(format!("report task failed: {err}")))?
    .map_err(|err| {
        error!("report generation failed: {err:#}");
        ApiError::internal(format!("{err:#}"))
    })?;

    info!(filename = %filename, bytes = pdf.len(), "generated report");
    let disposition = format!("attachment; filename=\"{filename}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

pub async fn index(Extension(state): Extension<Arc<AppState>>) -> Response {
    serve_static(&state.static_root, "index.html")
}

pub async fn static_file(
    Extension(state): Extension<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    serve_static(&state.static_root, uri.path().trim_start_matches('/'))
}

/// Serve `relative` from under `root`, which must be canonical.
pub fn serve_static(root: &Path, relative: &str) -> Response {
    let target = root.join(relative);
    let canonical = match fs::canonicalize(&target) {
        Ok(canonical) => canonical,
        Err(_) => return (StatusCode::NOT_FOUND, "not found").into_response(),
    };
    if !canonical.starts_with(root) {
        return (StatusCode::FORBIDDEN, "invalid path").into_response();
    }
    if !canonical.is_file() {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }
    match fs::read(&canonical) {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&canonical).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "file not readable").into_response(),
    }
}
