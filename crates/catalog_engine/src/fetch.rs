use std::time::Duration;

use bytes::Bytes;
use catalog_core::{Query, ResultItem};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::wire::parse_search_response;
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com/search";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_response_bytes: u64,
    pub max_image_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_response_bytes: 2 * 1024 * 1024,
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Catalog search capability. Dropping the returned future cancels the request.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search(&self, query: &Query) -> Result<Vec<ResultItem>, FetchError>;
}

/// Artwork download capability. Dropping the returned future cancels the request.
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogClient {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestCatalogClient {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// `{base_url}?term=..&media=..&lang=..&limit=..`
    pub fn search_url(&self, query: &Query) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("term", &query.term)
            .append_pair("media", query.category.media_token())
            .append_pair("lang", &query.language)
            .append_pair("limit", &query.limit.to_string());
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }

    /// Reads the whole body, failing as soon as it exceeds `max_bytes`.
    async fn read_limited(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, FetchError> {
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl CatalogClient for ReqwestCatalogClient {
    async fn search(&self, query: &Query) -> Result<Vec<ResultItem>, FetchError> {
        let url = self.search_url(query)?;
        let response = self.get(url).await?;
        let body = Self::read_limited(response, self.settings.max_response_bytes).await?;
        parse_search_response(&body, query.category)
    }
}

#[async_trait::async_trait]
impl ImageFetcher for ReqwestCatalogClient {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError> {
        let parsed =
            Url::parse(url).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let response = self.get(parsed).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !is_image_content_type(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let body = Self::read_limited(response, self.settings.max_image_bytes).await?;
        Ok(Bytes::from(body))
    }
}

fn is_image_content_type(content_type: &str) -> bool {
    let ct = content_type.split(';').next().unwrap_or(content_type).trim();
    let prefix = "image/";
    ct.len() > prefix.len()
        && ct
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
