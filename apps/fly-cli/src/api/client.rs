//! HTTP client wrapper for the CI server API

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;

use crate::config::Target;
use crate::error::{CliError, CliResult};
use crate::logging::global_logger;

/// Request timeout applied to every call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for authenticated requests against one target
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl ApiClient {
    /// Build a client for a validated target
    pub fn new(target: &Target) -> CliResult<Self> {
        target.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(target.props.insecure)
            .build()
            .map_err(|e| CliError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: target.api_url()?,
            token: target.token()?.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/v1/teams`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Make an authenticated GET request
    pub async fn get_authenticated(&self, url: &str) -> CliResult<Response> {
        let request = self.client.get(url).bearer_auth(&self.token);
        self.send("GET", url, request).await
    }

    /// Make an authenticated PUT request with JSON body
    pub async fn put_json<T: Serialize>(&self, url: &str, body: &T) -> CliResult<Response> {
        if let Some(logger) = global_logger() {
            if logger.config().is_trace() {
                logger.trace_body("request", &serde_json::to_string(body)?);
            }
        }

        let request = self.client.put(url).bearer_auth(&self.token).json(body);
        self.send("PUT", url, request).await
    }

    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> CliResult<Response> {
        if let Some(logger) = global_logger() {
            logger.debug_request(method, url);
        }

        let started = Instant::now();
        let response = request.send().await?;

        if let Some(logger) = global_logger() {
            logger.debug_response(response.status().as_u16(), started.elapsed().as_millis());
        }

        Ok(response)
    }
}

/// Map an unsuccessful response to a CLI error
pub(crate) async fn response_error(response: Response, action: &str) -> CliError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{} - {}", status, body.trim())
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CliError::AuthenticationFailed(format!("{action}: {detail}"))
        }
        s if s.is_server_error() => CliError::Server(format!("{action}: {detail}")),
        s => CliError::Api {
            status: s.as_u16(),
            message: format!("{action}: {body}"),
        },
    }
}
