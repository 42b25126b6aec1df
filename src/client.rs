use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::creative::{CreatedCreative, Creative};
use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://realtimebidding.googleapis.com/";
const API_VERSION: &str = "v1";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{status}: {message}")]
    Authorization { status: StatusCode, message: String },

    #[error("{status}: {message}")]
    Client { status: StatusCode, message: String },

    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|body| body.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::Authorization { status, message }
            }
            status if status.is_server_error() => ApiError::Server { status, message },
            status => ApiError::Client { status, message },
        }
    }
}

#[async_trait]
pub trait CreativesApi {
    async fn create_creative(
        &self,
        parent: &str,
        creative: &Creative,
    ) -> Result<CreatedCreative, ApiError>;
}

/// Thin client for `buyers.creatives.create`, authorized with an OAuth2
/// access token obtained elsewhere.
pub struct RealTimeBiddingClient {
    http: reqwest::Client,
    endpoint: Url,
    access_token: String,
}

impl RealTimeBiddingClient {
    pub fn new(endpoint: &str, access_token: Option<&str>, timeout: Duration) -> Result<Self> {
        let access_token = access_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingAccessToken)?
            .to_string();

        let mut endpoint = Url::parse(endpoint)
            .map_err(|err| Error::Setup(format!("invalid endpoint '{endpoint}': {err}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::Setup(format!("endpoint '{endpoint}' is not a base URL")));
        }
        // Url::join replaces the last path segment unless the path ends with '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|err| Error::Setup(format!("unable to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            endpoint,
            access_token,
        })
    }

    pub fn creatives_url(&self, parent: &str) -> Result<Url, url::ParseError> {
        self.endpoint
            .join(&format!("{API_VERSION}/{parent}/creatives"))
    }
}

#[async_trait]
impl CreativesApi for RealTimeBiddingClient {
    async fn create_creative(
        &self,
        parent: &str,
        creative: &Creative,
    ) -> Result<CreatedCreative, ApiError> {
        let url = self.creatives_url(parent)?;
        log::debug!("POST {url}");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .header(header::ACCEPT, "application/json")
            .json(creative)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::trace!("response {status} \n{body}");

        if !status.is_success() {
            return Err(ApiError::from_response(status, &body));
        }

        let body: serde_json::Value = serde_json::from_str(&body)?;
        Ok(CreatedCreative::from_body(body)?)
    }
}
