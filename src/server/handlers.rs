//! HTTP handlers for the workbench form

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::ops::{self, Operation};
use crate::pdf::pdfium_available;
use crate::server::form::read_request;
use crate::server::html::{self, DownloadLink};
use crate::server::AppState;

/// Menu, or the form of the selected operation
pub async fn index(State(state): State<AppState>) -> Html<String> {
    match state.menu.current() {
        Some(op) => Html(html::form_page(op, None)),
        None => Html(html::menu_page()),
    }
}

pub async fn select(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match Operation::from_slug(&slug) {
        Some(op) => {
            tracing::debug!(operation = op.slug(), "operation selected");
            state.menu.select(op);
            Redirect::to("/").into_response()
        }
        None => (StatusCode::NOT_FOUND, "Unknown operation").into_response(),
    }
}

pub async fn back(State(state): State<AppState>) -> Redirect {
    state.menu.back();
    Redirect::to("/")
}

/// Execute the selected operation on the submitted form
pub async fn run(State(state): State<AppState>, multipart: Multipart) -> Response {
    let Some(operation) = state.menu.current() else {
        return Redirect::to("/").into_response();
    };

    let outcome = match read_request(operation, multipart).await {
        Ok(request) => ops::execute(request, &state.config.tools).await,
        Err(e) => Err(e),
    };

    let artifacts = match outcome {
        Ok(artifacts) => artifacts,
        Err(e) => {
            let status = if e.is_user_error() {
                tracing::warn!(error = %e, operation = operation.slug(), "operation rejected");
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                tracing::warn!(error = ?e, operation = operation.slug(), "operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let page = html::form_page(operation, Some(&e.client_message()));
            return (status, Html(page)).into_response();
        }
    };

    let mut links = Vec::with_capacity(artifacts.len());
    let mut dropped = 0;
    for artifact in artifacts {
        let file_name = artifact.file_name.clone();
        let size = artifact.size();
        match state.store.put(artifact) {
            Some(id) => links.push(DownloadLink {
                id,
                file_name,
                size,
            }),
            None => dropped += 1,
        }
    }

    Html(html::result_page(operation, &links, dropped)).into_response()
}

/// Serve a stored artifact as an attachment
pub async fn download(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(artifact) = state.store.get(&id) else {
        return (
            StatusCode::NOT_FOUND,
            "This download has expired. Please run the operation again.",
        )
            .into_response();
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.file_name.replace(['"', '\\'], "_")
    );
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.data,
    )
        .into_response()
}

/// Liveness report for `/health`
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub pdfium: bool,
    pub stored_artifacts: usize,
    pub stored_bytes: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pdfium: pdfium_available(),
        stored_artifacts: state.store.len(),
        stored_bytes: state.store.total_bytes(),
    })
}
