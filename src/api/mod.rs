//! Typed client for the job-search backend.
//!
//! Every call is a single request/response exchange. A bearer token from the
//! [`Session`] is attached when present, and any 401 clears the session for
//! every subscriber before the error is returned.

pub mod applications;
pub mod auth;
pub mod jobs;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Reason attached to the forced logout a 401 triggers.
pub const SESSION_EXPIRED: &str = "Session expired";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

/// Whether a 401 means "your session is gone" or "wrong password".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Credentials,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the session's bearer token, if any.
    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Start a request that carries no token (login, signup).
    fn anonymous(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        self.send_as(builder, Auth::Bearer).await
    }

    async fn send_as(&self, builder: RequestBuilder, auth: Auth) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        match status {
            StatusCode::UNAUTHORIZED if auth == Auth::Bearer => {
                self.session.force_logout(SESSION_EXPIRED).await;
                Err(ApiError::Unauthorized)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if auth == Auth::Credentials => {
                Err(ApiError::InvalidCredentials(message))
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(message)),
            StatusCode::CONFLICT => Err(ApiError::Conflict(message)),
            _ => {
                warn!("Request failed with HTTP {status}: {message}");
                Err(ApiError::Status { status, message })
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.send(builder).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Pull a human-readable message out of an error body: a JSON `message` or
/// `error` field, the raw text, or the status reason as a last resort.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(msg) = json.as_str().filter(|m| !m.trim().is_empty()) {
            return msg.to_string();
        }
        for key in ["message", "error"] {
            if let Some(msg) = json[key].as_str().filter(|m| !m.trim().is_empty()) {
                return msg.to_string();
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
