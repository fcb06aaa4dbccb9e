use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::RestApiConfig;
use crate::error::AppError;
use crate::transport::model::{cookie_header, Cookie, HttpRequest, RawResponse};

/// The single capability the protocol core needs from the network: send one
/// request with the given cookies, headers and body, hand back status,
/// cookies and body. Errors are returned untouched, nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, AppError>;
}

/// reqwest backed transport.
#[derive(Debug, Clone)]
pub struct DcHttpClient {
    client: Client,
}

impl DcHttpClient {
    /// Creates a new instance of the DcHttpClient.
    ///
    /// # Arguments
    ///
    /// * `config` - The REST configuration, only `timeout` is read here.
    ///
    /// # Returns
    ///
    /// A Result containing the DcHttpClient instance or an error.
    pub fn new(config: &RestApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    fn collect_cookies(response: &reqwest::Response) -> Vec<Cookie> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(Cookie::parse)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for DcHttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, AppError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(cookies) = cookie_header(&request.cookies) {
            builder = builder.header(COOKIE, cookies);
        }
        if let Some(body) = request.body {
            debug!("Request body: {} bytes of {}", body.bytes.len(), body.content_type);
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(body.bytes);
        }

        let response = builder.send().await?;
        let status = response.status();
        let cookies = Self::collect_cookies(&response);
        let body = response.bytes().await?.to_vec();

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", String::from_utf8_lossy(&body));
        if !status.is_success() {
            warn!("Request answered with status {}", status);
        }

        Ok(RawResponse {
            status,
            cookies,
            body,
        })
    }
}
