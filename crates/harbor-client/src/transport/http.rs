//! HTTP transport backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use url::Url;

use super::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::config::{AuthInfo, ClientConfig};

/// Transport talking to a Harbor instance over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Creates a new HTTP transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, a certificate cannot be
    /// loaded, or the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use harbor_client::{ClientConfig, HttpTransport};
    ///
    /// let config = ClientConfig::new("https://harbor.example.com");
    /// let transport = HttpTransport::new(&config)?;
    /// # Ok::<(), harbor_client::TransportError>(())
    /// ```
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let base_url = config.api_base();
        Url::parse(&base_url).map_err(|_| TransportError::InvalidUrl {
            url: config.url.clone(),
        })?;

        Ok(Self {
            base_url,
            http: Self::build_http_client(config)?,
        })
    }

    /// Returns the API base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full URL of a request path.
    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse(&raw).map_err(|_| TransportError::InvalidUrl { url: raw })
    }

    /// Builds the HTTP client with proper configuration.
    fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent);

        if let Some(ref tls) = config.tls {
            if tls.insecure_skip_verify {
                builder = builder.danger_accept_invalid_certs(true);
            }

            if let Some(ref ca_cert) = tls.ca_cert {
                let cert_pem = std::fs::read(ca_cert).map_err(|e| TransportError::Io {
                    path: ca_cert.clone(),
                    source: e,
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
                    TransportError::ClientBuild {
                        message: format!("invalid CA certificate: {e}"),
                    }
                })?;
                builder = builder.add_root_certificate(cert);
            }

            if let (Some(ref cert_path), Some(ref key_path)) = (&tls.client_cert, &tls.client_key)
            {
                let mut cert_pem = std::fs::read(cert_path).map_err(|e| TransportError::Io {
                    path: cert_path.clone(),
                    source: e,
                })?;
                let key_pem = std::fs::read(key_path).map_err(|e| TransportError::Io {
                    path: key_path.clone(),
                    source: e,
                })?;
                cert_pem.extend_from_slice(&key_pem);

                let identity = reqwest::Identity::from_pem(&cert_pem).map_err(|e| {
                    TransportError::ClientBuild {
                        message: format!("invalid client certificate: {e}"),
                    }
                })?;
                builder = builder.identity(identity);
            }
        }

        builder.build().map_err(|e| TransportError::ClientBuild {
            message: e.to_string(),
        })
    }
}

/// Creates the `Authorization` header value for the credentials.
fn authorization(auth: &AuthInfo) -> Result<Option<HeaderValue>, TransportError> {
    let value = match auth {
        AuthInfo::None => return Ok(None),
        AuthInfo::Basic { username, password } => {
            let credentials = base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                format!("{username}:{password}"),
            );
            format!("Basic {credentials}")
        }
        AuthInfo::Bearer { token } => format!("Bearer {token}"),
    };

    let mut header = HeaderValue::from_str(&value).map_err(|_| TransportError::InvalidCredentials {
        message: "credentials contain characters not allowed in a header".to_string(),
    })?;
    header.set_sensitive(true);
    Ok(Some(header))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: ApiRequest,
        auth: &AuthInfo,
    ) -> Result<ApiResponse, TransportError> {
        let operation = request.operation;
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .query(&request.query);

        if let Some(value) = authorization(auth)? {
            builder = builder.header(AUTHORIZATION, value);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(
            operation = operation.id,
            method = %request.method,
            path = %request.path,
            "Sending request"
        );

        let response = builder
            .send()
            .await
            .map_err(|source| TransportError::Request {
                operation: operation.id,
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                operation: operation.id,
                url: url.to_string(),
                source,
            })?
            .to_vec();

        tracing::debug!(operation = operation.id, status, "Received response");

        operation.check(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
