//! Video API handlers.

use axum::body::Body;
use axum::extract::{FromRequest, Multipart, Path, Query, State};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use vidgen_client::{CreateVideoParams, ListVideosParams, ReferenceSource, RequestOptions};
use vidgen_models::{Video, VideoList};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List videos query params, forwarded to the API as-is.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub after: Option<String>,
    pub order: Option<String>,
}

/// List video jobs.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<VideoList>> {
    let params = ListVideosParams {
        limit: query.limit,
        after: query.after,
        order: query.order,
    };
    let list = state.client.list(&params, &RequestOptions::default()).await?;
    Ok(Json(list))
}

/// Create request body (JSON variant).
#[derive(Deserialize)]
pub struct CreateVideoRequest {
    #[serde(default)]
    pub prompt: String,
    pub model: Option<String>,
    pub size: Option<String>,
    /// Accepts a number or a string; normalized to a string.
    pub seconds: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create a video job from a JSON body or a multipart form with an
/// optional reference file.
pub async fn create_video(
    State(state): State<AppState>,
    request: Request<Body>,
) -> ApiResult<Json<Video>> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let params = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?;
        params_from_multipart(multipart).await?
    } else {
        let bytes = axum::body::to_bytes(request.into_body(), state.config.max_body_size)
            .await
            .map_err(|e| ApiError::bad_request(format!("Unreadable request body: {e}")))?;
        let body: CreateVideoRequest = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::bad_request(format!("Malformed JSON: {e}")))?;
        params_from_json(body)
    };

    let video = state.client.create(params, &RequestOptions::default()).await?;
    Ok(Json(video))
}

/// Get one video job.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Video>> {
    let video = state
        .client
        .retrieve(&video_id, &RequestOptions::default())
        .await?;
    Ok(Json(video))
}

/// Delete a video job.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .client
        .delete(&video_id, &RequestOptions::default())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stream the rendered video back to the browser.
pub async fn download_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Response> {
    let content = state
        .client
        .download(&video_id, &RequestOptions::default())
        .await?;

    let content_type = content.content_type.clone();
    let disposition = format!("attachment; filename=\"{}\"", content.filename);
    let stream = content.into_stream()?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

fn params_from_json(body: CreateVideoRequest) -> CreateVideoParams {
    CreateVideoParams {
        prompt: body.prompt,
        model: body.model,
        size: body.size,
        seconds: body.seconds.map(value_to_string),
        reference: None,
        extra: body.extra,
    }
}

async fn params_from_multipart(mut multipart: Multipart) -> ApiResult<CreateVideoParams> {
    let mut params = CreateVideoParams::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "prompt" => params.prompt = read_text(field).await?,
            "model" => params.model = Some(read_text(field).await?),
            "size" => params.size = Some(read_text(field).await?),
            "seconds" => params.seconds = Some(read_text(field).await?),
            "input_reference" | "file" => {
                let filename = field
                    .file_name()
                    .unwrap_or("reference")
                    .to_string();
                let mime_type = field.content_type().map(|m| m.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable file field: {e}")))?
                    .to_vec();
                // Browsers submit an empty file part when no file was
                // picked.
                if !data.is_empty() {
                    params.reference = Some(ReferenceSource::Bytes {
                        data,
                        filename,
                        mime_type,
                    });
                }
            }
            _ => {
                let value = read_text(field).await?;
                params.extra.insert(name, Value::String(value));
            }
        }
    }

    Ok(params)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Unreadable form field: {e}")))
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
