//! HTTP trigger surface
//!
//! `GET /` serves a search form. `POST /scrape` takes a form field `term`,
//! runs a full scrape into a temporary CSV file and returns it as a
//! `jobs.csv` attachment. The temporary file is removed before the response
//! is sent, so nothing persists between requests.

use crate::crawler::Coordinator;
use crate::output::CsvSink;
use crate::HarvestError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// File name offered to the client
pub const ATTACHMENT_NAME: &str = "jobs.csv";

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Job Harvest</title>
  </head>
  <body>
    <h1>Job Harvest</h1>
    <h4>Search for jobs and download the results as CSV</h4>
    <form method="POST" action="/scrape">
      <input placeholder="What job do you want?" name="term" />
      <button>Search</button>
    </form>
  </body>
</html>
"#;

/// Shared state of the HTTP server
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
}

/// Form submitted to `POST /scrape`
#[derive(Debug, Deserialize)]
pub struct ScrapeForm {
    #[serde(default)]
    pub term: String,
}

/// Builds the application router
pub fn build_app(coordinator: Arc<Coordinator>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/scrape", post(scrape_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { coordinator })
}

/// Binds `bind` and serves the application until the process exits
pub async fn serve(bind: &str, coordinator: Arc<Coordinator>) -> crate::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(coordinator)).await?;
    Ok(())
}

async fn home_handler() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn scrape_handler(
    State(state): State<AppState>,
    Form(form): Form<ScrapeForm>,
) -> Result<Response, AppError> {
    let artifact = NamedTempFile::new()?;
    let sink = CsvSink::new(artifact.path());

    let report = state.coordinator.scrape(&form.term, &sink).await?;
    let body = tokio::fs::read(&report.output_path).await?;
    artifact.close()?;

    info!(
        "Served {} records for '{}' ({} pages)",
        report.record_count, report.term, report.page_count
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ATTACHMENT_NAME),
            ),
        ],
        body,
    )
        .into_response())
}

/// Error returned by handlers, mapped to a status code
pub struct AppError(HarvestError);

impl<E> From<E> for AppError
where
    E: Into<HarvestError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Scrape request failed: {}", self.0);

        let status = if self.0.is_transport() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, format!("Scrape failed: {}", self.0)).into_response()
    }
}
