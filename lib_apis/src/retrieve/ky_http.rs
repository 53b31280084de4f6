//! # HTTP Retrieval Utilities
//!
//! This module provides the asynchronous API client every remote surface in
//! this crate is built on. It wraps `reqwest` in `reqwest-middleware` with an
//! exponential-backoff retry layer, applies a bounded per-request timeout and
//! standardises JSON response handling.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE},
    Method, Url,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::error::ApiError;
use super::query::QueryParams;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Default number of retries for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// A standardized container for API responses.
///
/// This struct wraps the deserialized data along with metadata about the
/// HTTP transaction, such as status codes and headers.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The successfully deserialized response body, if any.
    pub data: Option<T>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
    /// The headers returned by the server.
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    /// Converts the response into its data, mapping non-2xx into [`ApiError::Status`].
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Decode(format!(
                "HTTP {} response carried no body",
                self.status
            ))),
            (false, _) => Err(ApiError::from_status(self.status, self.error_body.as_deref())),
        }
    }
}

/// Timeout, retry and header settings for an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Upper bound on a single attempt, including reading the body.
    pub timeout: Duration,
    /// Retries for transient failures (5xx, 408, 429, connection errors).
    pub max_retries: u32,
    /// First backoff interval.
    pub min_backoff: Duration,
    /// Backoff ceiling.
    pub max_backoff: Duration,
    /// An optional Bearer token used for authorization.
    pub auth_token: Option<String>,
    /// Overrides the `User-Agent` header.
    pub user_agent: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            min_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            auth_token: None,
            user_agent: None,
        }
    }
}

impl ClientOptions {
    /// Options with retries disabled and the given timeout.
    pub fn no_retries(timeout: Duration) -> Self {
        Self {
            timeout,
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// A flexible asynchronous HTTP client.
///
/// Built on top of `reqwest_middleware`, it handles base URLs,
/// authentication tokens, timeouts and automatic retries.
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL every request path is appended to.
    base_url: Url,
    /// An optional Bearer token used for authorization.
    auth_token: Option<String>,
}

impl ApiClient {
    /// Creates a new `ApiClient` for `base_url`.
    ///
    /// A trailing `/` is appended to the base path when missing, so an
    /// empty segment list targets `.../api/v3/` and `["ping"]` targets
    /// `.../api/v3/ping`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] when `base_url` is not an absolute
    /// URL and [`ApiError::Client`] when the HTTP client cannot be built.
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().timeout(options.timeout);
        if let Some(agent) = &options.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        let http = builder.build().map_err(|e| ApiError::Client(e.to_string()))?;

        let min = options.min_backoff;
        let max = options.max_backoff.max(min);
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(min, max)
            .build_with_max_retries(options.max_retries);

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            inner: client,
            base_url: url,
            auth_token: options.auth_token,
        })
    }

    /// The normalised base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path and `query` to the query string.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside
    /// an id stay part of that segment. An empty slice resolves to the base
    /// URL itself.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidPath`] for an empty, `.` or `..` segment.
    pub fn build_url(&self, segments: &[&str], query: Option<&QueryParams>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::InvalidPath((*bad).to_string()));
        }
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
                .pop_if_empty()
                .extend(segments);
        }
        if let Some(q) = query {
            q.apply_to(&mut url);
        }
        Ok(url)
    }

    /// Performs a generic HTTP request and handles the response.
    ///
    /// Non-2xx replies are returned as `Ok` with `success == false`; only
    /// failures to build, send or decode are errors at this level.
    ///
    /// # Arguments
    /// * `method` - The HTTP verb (GET, POST, etc.).
    /// * `segments` - Path segments appended to the base URL.
    /// * `query` - Optional query-string parameters.
    /// * `headers` - Optional additional headers for this specific request.
    /// * `body` - Optional serializable object to send as the JSON body.
    pub async fn request<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&QueryParams>,
        headers: Option<HeaderMap>,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let full_url = self.build_url(segments, query)?;
        debug!(method = %method, url = %full_url, "dispatching request");
        let mut req = self.inner.request(method.clone(), full_url.clone());

        if let Some(h) = headers {
            req = req.headers(h);
        }

        if let Some(token) = &self.auth_token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(b) = body {
            let json_body = serde_json::to_string(b).map_err(|e| ApiError::Encode(e.to_string()))?;
            req = req.header(CONTENT_TYPE, "application/json").body(json_body);
        }

        let response = req.send().await.map_err(|e| {
            error!(method = %method, url = %full_url, error = %e, "request failed");
            ApiError::from(e)
        })?;
        let status = response.status();
        let resp_headers = response.headers().clone();

        if status.is_success() {
            let bytes = response.bytes().await?;
            let data = serde_json::from_slice::<T>(&bytes).map_err(|e| {
                warn!(url = %full_url, error = %e, "response body is not valid JSON");
                ApiError::Decode(e.to_string())
            })?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
                headers: resp_headers,
            })
        } else {
            let error_text = response.text().await.ok();
            warn!(url = %full_url, status = status.as_u16(), "non-success status");
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
                headers: resp_headers,
            })
        }
    }

    /// GETs `segments` with `query` and returns the decoded JSON body.
    pub async fn get_json(&self, segments: &[&str], query: Option<&QueryParams>) -> Result<Value, ApiError> {
        self.request::<Value, ()>(Method::GET, segments, query, None, None)
            .await?
            .into_result()
    }

    /// POSTs `body` as JSON to `segments` and returns the decoded JSON body.
    pub async fn post_json<B>(&self, segments: &[&str], body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.request::<Value, B>(Method::POST, segments, None, None, Some(body))
            .await?
            .into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ApiClient::new("https://api.coingecko.com/api/v3", ClientOptions::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.coingecko.com/api/v3/");
        let url = client.build_url(&["simple", "price"], None).unwrap();
        assert_eq!(url.as_str(), "https://api.coingecko.com/api/v3/simple/price");
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = ApiClient::new("api/v3", ClientOptions::default())
            .err()
            .expect("relative base url must be rejected");
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn empty_path_resolves_to_base() {
        let client = ApiClient::new("http://localhost:9009", ClientOptions::default()).unwrap();
        let url = client.build_url(&[], None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9009/");
    }

    #[test]
    fn build_url_appends_query() {
        let client = ApiClient::new("https://api.example.com/v3/", ClientOptions::default()).unwrap();
        let q = QueryParams::new().with("vs_currency", "usd").with("days", 7u32);
        let url = client.build_url(&["coins", "bitcoin", "market_chart"], Some(&q)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v3/coins/bitcoin/market_chart?vs_currency=usd&days=7"
        );
    }

    #[test]
    fn segments_are_encoded_individually() {
        let client = ApiClient::new("https://api.example.com/api/v3", ClientOptions::default()).unwrap();
        let q = QueryParams::new().with("page", 1u32);
        let url = client
            .build_url(&["coins", "bitcoin?page=999#", "tickers"], Some(&q))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/v3/coins/bitcoin%3Fpage=999%23/tickers?page=1"
        );
        assert_eq!(url.query_pairs().count(), 1);

        let url = client.build_url(&["coins", "a/b"], None).unwrap();
        assert_eq!(url.path(), "/api/v3/coins/a%2Fb");
    }

    #[test]
    fn dot_and_empty_segments_are_rejected() {
        let client = ApiClient::new("http://127.0.0.1:9/api/v3/", ClientOptions::default()).unwrap();
        for bad in ["..", ".", ""] {
            let err = client.build_url(&["coins", bad, "admin"], None).unwrap_err();
            assert!(matches!(err, ApiError::InvalidPath(ref s) if s == bad), "got {err:?}");
        }
    }

    #[test]
    fn into_result_maps_failure_to_status_error() {
        let resp: ApiResponse<Value> = ApiResponse {
            data: None,
            error_body: Some(r#"{"error":"invalid vs_currency"}"#.into()),
            status: 400,
            success: false,
            headers: HeaderMap::new(),
        };
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.code(), Some(400));
        assert_eq!(err.to_record().message, "invalid vs_currency");
    }
}
