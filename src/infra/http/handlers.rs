use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use letterpress_api_types::{HistoryResponse, SaveResponse, SavedTemplate, TemplatePayload};
use tracing::debug;

use crate::application::error::ErrorReport;
use crate::application::repos::StoredTemplate;
use crate::domain::document::Document;

use super::HttpState;
use super::error::ApiError;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const SAVED_MESSAGE: &str = "Email configuration saved successfully.";

pub async fn banner() -> &'static str {
    "Letterpress is running"
}

pub async fn health(State(state): State<HttpState>) -> Response {
    match state.templates.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

pub async fn layout(State(state): State<HttpState>) -> Result<Response, ApiError> {
    let skeleton = state.templates.layout_skeleton().await?;
    Ok(html_response(skeleton))
}

pub async fn upload(
    State(state): State<HttpState>,
    payload: Result<Json<TemplatePayload>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(payload) = payload?;
    let document = Document::from_payload(payload);
    let id = state.templates.save(&document).await?;

    Ok(Json(SaveResponse {
        id,
        message: SAVED_MESSAGE.to_string(),
    }))
}

pub async fn history(State(state): State<HttpState>) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state.templates.history().await?;
    let data = history.into_iter().map(saved_template).collect();
    Ok(Json(HistoryResponse { data }))
}

pub async fn render(
    State(state): State<HttpState>,
    payload: Result<Json<TemplatePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let document = Document::from_payload(payload);
    debug!(
        target = "letterpress::http::render",
        title = %document.title,
        blocks = document.len(),
        "rendering template"
    );

    let html = state.templates.render(&document).await?;
    Ok(html_response(html))
}

fn saved_template(stored: StoredTemplate) -> SavedTemplate {
    SavedTemplate {
        id: stored.id,
        saved_at: stored.saved_at,
        template: stored.document.to_payload(),
    }
}

fn html_response(body: String) -> Response {
    ([(CONTENT_TYPE, HTML_CONTENT_TYPE)], body).into_response()
}
