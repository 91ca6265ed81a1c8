//! Video API HTTP client.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use futures::StreamExt;
use vidgen_media::{build_reference, ReferenceMeta};
use vidgen_models::{SizeRuleSet, Video, VideoList};

use crate::config::ClientConfig;
use crate::download::{classify_json_payload, filename_for, DownloadPayload, VideoContent};
use crate::error::{ClientError, ClientResult};
use crate::types::{CreateVideoParams, ListVideosParams, ReferenceSource, RequestOptions};

/// Header carrying the configured beta-feature flag.
const BETA_HEADER: &str = "OpenAI-Beta";

/// Client for the vendor video-generation API.
///
/// Every operation is a pass-through: one HTTP call, no retries, errors
/// forwarded to the caller as-is.
pub struct VideoClient {
    http: Client,
    config: ClientConfig,
}

impl VideoClient {
    /// Create a new video client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a video generation job.
    ///
    /// Size precedence: a label derived from the attached reference,
    /// then the caller's size string coerced to a supported label, then
    /// the model's default. With a reference the request is multipart;
    /// otherwise JSON.
    pub async fn create(
        &self,
        params: CreateVideoParams,
        opts: &RequestOptions,
    ) -> ClientResult<Video> {
        if params.prompt.trim().is_empty() {
            return Err(ClientError::invalid_argument("prompt is required"));
        }

        let model = params
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());
        let rules = SizeRuleSet::for_model(&model);

        let reference = match params.reference {
            Some(source) => Some(self.load_reference(source, rules).await?),
            None => None,
        };

        let size = reference
            .as_ref()
            .and_then(|r| r.size_label)
            .map(str::to_string)
            .or_else(|| {
                params
                    .size
                    .as_deref()
                    .or(self.config.default_size.as_deref())
                    .map(|s| rules.coerce(s).label.to_string())
            })
            .unwrap_or_else(|| rules.default_rule().label.to_string());

        debug!("Creating video: model={}, size={}", model, size);

        let request = match reference {
            Some(reference) => {
                let mut form = Form::new()
                    .text("prompt", params.prompt)
                    .text("model", model)
                    .text("size", size);
                if let Some(seconds) = params.seconds {
                    form = form.text("seconds", seconds);
                }
                for (key, value) in params.extra {
                    let text = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    form = form.text(key, text);
                }
                let part = Part::bytes(reference.bytes.to_vec())
                    .file_name(reference.filename)
                    .mime_str(reference.mime.as_str())?;
                form = form.part("input_reference", part);

                self.request(Method::POST, "/videos", opts).multipart(form)
            }
            None => {
                let mut body = params.extra;
                body.insert("prompt".to_string(), Value::String(params.prompt));
                body.insert("model".to_string(), Value::String(model));
                body.insert("size".to_string(), Value::String(size));
                if let Some(seconds) = params.seconds {
                    body.insert("seconds".to_string(), Value::String(seconds));
                }

                self.request(Method::POST, "/videos", opts).json(&Value::Object(body))
            }
        };

        let response = self.send(request, opts).await?;
        Ok(response.json().await?)
    }

    /// List video generation jobs.
    pub async fn list(
        &self,
        params: &ListVideosParams,
        opts: &RequestOptions,
    ) -> ClientResult<VideoList> {
        let request = self.request(Method::GET, "/videos", opts).query(params);
        let response = self.send(request, opts).await?;
        Ok(response.json().await?)
    }

    /// Retrieve one video generation job.
    pub async fn retrieve(&self, id: &str, opts: &RequestOptions) -> ClientResult<Video> {
        Self::require_id(id)?;
        let request = self.request(Method::GET, &format!("/videos/{id}"), opts);
        let response = self.send(request, opts).await?;
        Ok(response.json().await?)
    }

    /// Delete a video generation job.
    pub async fn delete(&self, id: &str, opts: &RequestOptions) -> ClientResult<()> {
        Self::require_id(id)?;
        let request = self.request(Method::DELETE, &format!("/videos/{id}"), opts);
        self.send(request, opts).await?;
        Ok(())
    }

    /// Download the rendered content of a completed job.
    pub async fn download(&self, id: &str, opts: &RequestOptions) -> ClientResult<VideoContent> {
        Self::require_id(id)?;
        let request = self.request(Method::GET, &format!("/videos/{id}/content"), opts);
        let response = self.send(request, opts).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let payload = if content_type.starts_with("application/json") {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Err(ClientError::EmptyResponse);
            }
            classify_json_payload(serde_json::from_str(&text)?)?
        } else if content_type.starts_with("text/plain") {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Err(ClientError::EmptyResponse);
            }
            DownloadPayload::Base64(text)
        } else if response.content_length() == Some(0) {
            return Err(ClientError::EmptyResponse);
        } else {
            DownloadPayload::Stream(response.bytes_stream().boxed())
        };

        // Base64 bodies carry the transport's content type, not the
        // video's; assume mp4 for those.
        let content_type = match payload {
            DownloadPayload::Base64(_) => "video/mp4".to_string(),
            _ => content_type,
        };
        let filename = filename_for(id, &content_type);

        Ok(VideoContent::new(content_type, filename, payload))
    }

    async fn load_reference(
        &self,
        source: ReferenceSource,
        rules: SizeRuleSet,
    ) -> ClientResult<ReferenceMeta> {
        match source {
            ReferenceSource::Path(path) => {
                let bytes = tokio::fs::read(&path).await?;
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("reference")
                    .to_string();
                Ok(build_reference(bytes, &filename, None, rules)?)
            }
            ReferenceSource::Bytes {
                data,
                filename,
                mime_type,
            } => Ok(build_reference(data, &filename, mime_type.as_deref(), rules)?),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str, opts: &RequestOptions) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(&self.config.api_key);
        if let Some(beta) = &self.config.beta_header {
            request = request.header(BETA_HEADER, beta);
        }
        if let Some(timeout) = opts.timeout {
            request = request.timeout(timeout);
        }
        request.headers(opts.headers.clone())
    }

    async fn send(&self, request: RequestBuilder, opts: &RequestOptions) -> ClientResult<Response> {
        let fut = request.send();
        let response = match opts.cancel.clone() {
            Some(mut signal) => tokio::select! {
                response = fut => response?,
                _ = signal.cancelled() => return Err(ClientError::Cancelled),
            },
            None => fut.await?,
        };
        Self::check_status(response).await
    }

    /// Forwards non-success responses as API errors, detail intact.
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail: Value =
            serde_json::from_str(&body).unwrap_or_else(|_| Value::String(body.clone()));
        let message = detail
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        warn!("Video API error {}: {}", status, message);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
            detail,
        })
    }

    fn require_id(id: &str) -> ClientResult<()> {
        if id.trim().is_empty() {
            return Err(ClientError::invalid_argument("video id is required"));
        }
        Ok(())
    }
}
