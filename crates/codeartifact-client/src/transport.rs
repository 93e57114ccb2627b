//! HTTP transport boundary.
//!
//! The client never talks to the network directly. It hands a fully
//! described [`HttpRequest`] to a [`Transport`] and gets back the status,
//! headers and a body stream. [`ReqwestTransport`] is the production
//! implementation; tests substitute their own.

use std::fmt;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Response body as a stream of chunks.
pub type BodyStream = BoxStream<'static, Result<Bytes, ClientError>>;

/// A request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Operation name, for logging.
    pub operation: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Path relative to the endpoint (e.g., `/v1/domain`).
    pub path: &'static str,
    /// Query parameters, in declaration order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON body, if the method carries one.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn body_json(&self) -> Result<Option<serde_json::Value>, ClientError> {
        self.body
            .as_deref()
            .map(serde_json::from_slice)
            .transpose()
            .map_err(Into::into)
    }
}

/// A response as delivered by the transport.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: BodyStream,
}

impl HttpResponse {
    /// Creates a response with a body already in memory.
    #[must_use]
    pub fn from_bytes(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        Self {
            status,
            headers,
            body: stream::once(async move { Ok(body) }).boxed(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns a header value, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Collects the whole body.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the body stream.
    pub async fn bytes(self) -> Result<Bytes, ClientError> {
        let collected = self
            .body
            .try_fold(BytesMut::new(), |mut acc, chunk| async move {
                acc.extend_from_slice(&chunk);
                Ok(acc)
            })
            .await?;
        Ok(collected.freeze())
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Sends requests to the service.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends one request and returns the raw response.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    endpoint: Url,
}

impl ReqwestTransport {
    /// Creates a transport for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL, a TLS file cannot
    /// be read, or the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|_| ClientError::InvalidUrl {
            url: config.endpoint.clone(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: config.endpoint.clone(),
            });
        }

        Ok(Self {
            http: Self::build_http_client(config)?,
            endpoint,
        })
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolves the full URL for a request.
    fn url_for(&self, request: &HttpRequest) -> Url {
        let mut url = self.endpoint.clone();
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}{}", request.path));
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        url
    }

    /// Builds the HTTP client with proper configuration.
    fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent);

        if let Some(ref tls) = config.tls {
            if tls.insecure_skip_verify {
                builder = builder.danger_accept_invalid_certs(true);
            }

            if let Some(ref ca_cert) = tls.ca_cert {
                let cert_pem = std::fs::read(ca_cert).map_err(|e| ClientError::Io {
                    path: ca_cert.clone(),
                    source: e,
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| ClientError::Config {
                    message: format!("Invalid CA certificate: {e}"),
                })?;
                builder = builder.add_root_certificate(cert);
            }

            if let (Some(cert_path), Some(key_path)) = (&tls.client_cert, &tls.client_key) {
                let mut cert_pem = std::fs::read(cert_path).map_err(|e| ClientError::Io {
                    path: cert_path.clone(),
                    source: e,
                })?;
                let key_pem = std::fs::read(key_path).map_err(|e| ClientError::Io {
                    path: key_path.clone(),
                    source: e,
                })?;
                cert_pem.extend_from_slice(&key_pem);

                let identity = reqwest::Identity::from_pem(&cert_pem).map_err(|e| ClientError::Config {
                    message: format!("Invalid client certificate: {e}"),
                })?;
                builder = builder.identity(identity);
            }
        }

        builder.build().map_err(|e| ClientError::Connection {
            url: config.endpoint.clone(),
            source: e,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let url = self.url_for(&request);
        let mut builder = self
            .http
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes_stream().map_err(ClientError::from).boxed();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
