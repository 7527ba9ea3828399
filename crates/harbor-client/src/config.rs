//! Configuration types for the Harbor client.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Path prefix of the Harbor v2.0 API.
pub const API_PREFIX: &str = "/api/v2.0";

/// Configuration for a [`HarborClient`](crate::HarborClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Harbor URL (e.g., "<https://harbor.example.com>").
    pub url: String,

    /// Credentials sent with every request.
    pub auth: AuthInfo,

    /// Default timeout of the underlying HTTP client.
    pub timeout: Duration,

    /// TLS configuration for private CAs and mTLS.
    pub tls: Option<TlsConfig>,

    /// User agent string.
    pub user_agent: String,

    /// Options shared by all resource clients.
    pub options: RequestOptions,
}

impl ClientConfig {
    /// Creates a new client configuration for the given Harbor URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use harbor_client::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://harbor.example.com");
    /// assert_eq!(config.url, "https://harbor.example.com");
    /// assert_eq!(config.api_base(), "https://harbor.example.com/api/v2.0");
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: AuthInfo::None,
            timeout: Duration::from_secs(30),
            tls: None,
            user_agent: format!("harbor-client/{}", env!("CARGO_PKG_VERSION")),
            options: RequestOptions::default(),
        }
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthInfo) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the HTTP client timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Sets the request options.
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the API base URL, accepting a configured URL that already
    /// ends in the API prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use harbor_client::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://harbor.example.com/api/v2.0/");
    /// assert_eq!(config.api_base(), "https://harbor.example.com/api/v2.0");
    /// ```
    #[must_use]
    pub fn api_base(&self) -> String {
        let trimmed = self.url.trim_end_matches('/');
        if trimmed.ends_with(API_PREFIX) {
            trimmed.to_string()
        } else {
            format!("{trimmed}{API_PREFIX}")
        }
    }
}

/// Options shared by every request a client issues.
///
/// Read-only once a client has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// First page requested by list operations.
    pub page: i64,

    /// Items per page.
    pub page_size: i64,

    /// Default `q` filter for list operations without their own filter.
    pub query: Option<String>,

    /// Sort expression, e.g. `-creation_time`.
    pub sort: Option<String>,

    /// Timeout applied to each individual request.
    pub timeout: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            query: None,
            sort: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl RequestOptions {
    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the first page.
    #[must_use]
    pub const fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the default query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the sort expression.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Credentials attached to every request.
///
/// The client never inspects these; the transport turns them into an
/// `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthInfo {
    /// Anonymous access.
    None,

    /// Basic authentication (username/password or robot name/secret).
    Basic {
        /// Username.
        username: String,
        /// Password or secret.
        password: String,
    },

    /// Bearer token authentication.
    Bearer {
        /// Token value.
        token: String,
    },
}

impl AuthInfo {
    /// Creates basic authentication.
    ///
    /// # Examples
    ///
    /// ```
    /// use harbor_client::AuthInfo;
    ///
    /// let auth = AuthInfo::basic("admin", "Harbor12345");
    /// assert!(format!("{auth:?}").contains("admin"));
    /// assert!(!format!("{auth:?}").contains("Harbor12345"));
    /// ```
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }
}

impl fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// TLS configuration for private CAs and mTLS connections.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// Path to CA certificate file.
    pub ca_cert: Option<PathBuf>,

    /// Path to client certificate file.
    pub client_cert: Option<PathBuf>,

    /// Path to client private key file.
    pub client_key: Option<PathBuf>,

    /// Whether to skip certificate verification (NOT recommended for production).
    pub insecure_skip_verify: bool,
}

impl TlsConfig {
    /// Creates a new TLS configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ca_cert: None,
            client_cert: None,
            client_key: None,
            insecure_skip_verify: false,
        }
    }

    /// Sets the CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    /// Sets client certificate and key paths for mTLS.
    #[must_use]
    pub fn with_client_cert(mut self, cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        self.client_cert = Some(cert.into());
        self.client_key = Some(key.into());
        self
    }

    /// Enables insecure mode (skips certificate verification).
    ///
    /// # Warning
    ///
    /// This should only be used for testing. Never use in production.
    #[must_use]
    pub const fn insecure(mut self) -> Self {
        self.insecure_skip_verify = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = ClientConfig::new("https://harbor.example.com");
        assert_eq!(config.url, "https://harbor.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.auth, AuthInfo::None);
        assert_eq!(config.options, RequestOptions::default());
    }

    #[test]
    fn test_api_base_appends_prefix_once() {
        assert_eq!(
            ClientConfig::new("https://harbor.example.com/").api_base(),
            "https://harbor.example.com/api/v2.0"
        );
        assert_eq!(
            ClientConfig::new("https://harbor.example.com/api/v2.0").api_base(),
            "https://harbor.example.com/api/v2.0"
        );
    }

    #[test]
    fn test_request_options_defaults() {
        let options = RequestOptions::default();
        assert_eq!(options.page, 1);
        assert_eq!(options.page_size, 10);
        assert!(options.query.is_none());
        assert!(options.sort.is_none());
    }

    #[test]
    fn test_request_options_builders() {
        let options = RequestOptions::default()
            .with_page_size(50)
            .with_sort("-creation_time")
            .with_query("name=~nginx")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(options.page_size, 50);
        assert_eq!(options.sort.as_deref(), Some("-creation_time"));
        assert_eq!(options.query.as_deref(), Some("name=~nginx"));
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bearer_auth_redacted() {
        let auth = AuthInfo::bearer("token123");
        assert!(matches!(&auth, AuthInfo::Bearer { token } if token == "token123"));
        assert!(!format!("{auth:?}").contains("token123"));
    }

    #[test]
    fn test_tls_config() {
        let tls = TlsConfig::new()
            .with_ca_cert("/path/to/ca.crt")
            .with_client_cert("/path/to/client.crt", "/path/to/client.key");

        assert_eq!(tls.ca_cert, Some(PathBuf::from("/path/to/ca.crt")));
        assert_eq!(tls.client_cert, Some(PathBuf::from("/path/to/client.crt")));
        assert_eq!(tls.client_key, Some(PathBuf::from("/path/to/client.key")));
        assert!(!tls.insecure_skip_verify);
    }
}
