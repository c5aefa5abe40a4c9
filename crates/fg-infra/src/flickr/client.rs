use anyhow::{Context, Result};
use async_trait::async_trait;
use fg_core::config::ApiConfig;
use fg_core::ports::PhotoServicePort;
use fg_core::{FeedError, PageRequest, PhotoDetail, PhotoId, PhotoPage};
use reqwest::Client;
use tracing::debug;

use super::dto::{decode_detail, decode_page};
use super::params::{detail_params, method_for, page_params, Params};

/// Flickr REST client.
///
/// One GET per call, no retries. Classification:
/// - connect/timeout/body errors : `Transport`
/// - non-2xx status              : `Transport` with the status code
/// - unparseable body            : `MalformedPayload`
/// - `stat: "fail"`              : `Service` with the service code
#[derive(Debug, Clone)]
pub struct FlickrPhotoService {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FlickrPhotoService {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_body(&self, params: &Params) -> Result<String, FeedError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Transport {
                status: Some(status.as_u16()),
                message: format!("unexpected HTTP status {status}"),
            });
        }

        response.text().await.map_err(transport_error)
    }
}

fn transport_error(error: reqwest::Error) -> FeedError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    FeedError::Transport {
        status: error.status().map(|s| s.as_u16()),
        message,
    }
}

#[async_trait]
impl PhotoServicePort for FlickrPhotoService {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PhotoPage, FeedError> {
        debug!(
            method = method_for(request),
            query = %request.query,
            page = request.page,
            per_page = request.per_page,
            "Fetching photo page"
        );
        let body = self.get_body(&page_params(&self.api_key, request)).await?;
        decode_page(&body, request.page)
    }

    async fn fetch_detail(&self, id: &PhotoId) -> Result<PhotoDetail, FeedError> {
        if id.trim().is_empty() {
            return Err(FeedError::InvalidRequest("photo id is empty".to_string()));
        }
        debug!(photo_id = %id, "Fetching photo detail");
        let body = self.get_body(&detail_params(&self.api_key, id)).await?;
        decode_detail(&body, id)
    }
}
