//! Configuration types for the service client.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

/// Environment variable naming the endpoint URL.
pub const ENV_ENDPOINT: &str = "CODEARTIFACT_ENDPOINT";
/// Environment variable naming the region, used when no endpoint is set.
pub const ENV_REGION: &str = "CODEARTIFACT_REGION";
/// Environment variable holding a bearer token.
pub const ENV_TOKEN: &str = "CODEARTIFACT_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CODEARTIFACT_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the service client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint URL (e.g., "<https://codeartifact.us-west-2.amazonaws.com>").
    pub endpoint: String,

    /// Authentication configuration.
    pub auth: ClientAuth,

    /// Request timeout.
    pub timeout: Duration,

    /// TLS configuration for private CAs and mTLS.
    pub tls: Option<TlsConfig>,

    /// User agent string.
    pub user_agent: String,

    /// Where request constraints are checked.
    pub validation: ValidationMode,
}

impl ClientConfig {
    /// Creates a new configuration for the given endpoint URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeartifact_client::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://codeartifact.example.com");
    /// assert_eq!(config.endpoint, "https://codeartifact.example.com");
    /// ```
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth: ClientAuth::None,
            timeout: DEFAULT_TIMEOUT,
            tls: None,
            user_agent: format!("codeartifact-client/{}", env!("CARGO_PKG_VERSION")),
            validation: ValidationMode::default(),
        }
    }

    /// Creates a configuration for the public endpoint of a region.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeartifact_client::ClientConfig;
    ///
    /// let config = ClientConfig::for_region("eu-west-1");
    /// assert_eq!(config.endpoint, "https://codeartifact.eu-west-1.amazonaws.com");
    /// ```
    #[must_use]
    pub fn for_region(region: &str) -> Self {
        Self::new(format!("https://codeartifact.{region}.amazonaws.com"))
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `CODEARTIFACT_ENDPOINT` (or `CODEARTIFACT_REGION`),
    /// `CODEARTIFACT_TOKEN` and `CODEARTIFACT_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither endpoint nor region is set, or if the
    /// timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = match (non_empty(ENV_ENDPOINT), non_empty(ENV_REGION)) {
            (Some(endpoint), _) => Self::new(endpoint.trim()),
            (None, Some(region)) => Self::for_region(region.trim()),
            (None, None) => {
                return Err(ClientError::Config {
                    message: format!("set {ENV_ENDPOINT} or {ENV_REGION}"),
                })
            }
        };

        if let Some(token) = non_empty(ENV_TOKEN) {
            config = config.with_auth(ClientAuth::bearer(token.trim()));
        }

        if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
            let seconds = raw.trim().parse::<u64>().map_err(|e| ClientError::Config {
                message: format!("{ENV_TIMEOUT_SECS}={raw}: {e}"),
            })?;
            config = config.with_timeout(Duration::from_secs(seconds));
        }

        Ok(config)
    }

    /// Sets the authentication method.
    #[must_use]
    pub fn with_auth(mut self, auth: ClientAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the request timeout.
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

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets where request constraints are checked.
    #[must_use]
    pub const fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }
}

/// Authentication methods for service access.
#[derive(Clone, Default)]
pub enum ClientAuth {
    /// No authentication (local endpoints and signing proxies).
    #[default]
    None,

    /// Bearer token authentication.
    Bearer {
        /// Token value.
        token: String,
    },
}

impl ClientAuth {
    /// Creates bearer token authentication.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeartifact_client::ClientAuth;
    ///
    /// let auth = ClientAuth::bearer("my-token");
    /// ```
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for ClientAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"<redacted>").finish(),
        }
    }
}

/// Where request constraints are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Validate every request before sending it; invalid requests never
    /// leave the process.
    #[default]
    ClientSide,

    /// Send requests as built and let the service reject invalid ones.
    ServerSide,
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
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_new() {
        let config = ClientConfig::new("https://example.com");
        assert_eq!(config.endpoint, "https://example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.validation, ValidationMode::ClientSide);
        assert!(config.user_agent.starts_with("codeartifact-client/"));
        assert!(matches!(config.auth, ClientAuth::None));
    }

    #[test]
    fn test_for_region() {
        let config = ClientConfig::for_region("us-west-2");
        assert_eq!(config.endpoint, "https://codeartifact.us-west-2.amazonaws.com");
    }

    #[test]
    fn test_from_lookup_endpoint_wins_over_region() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "http://localhost:4566"),
            (ENV_REGION, "us-east-1"),
            (ENV_TOKEN, "tok"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:4566");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(config.auth, ClientAuth::Bearer { ref token } if token == "tok"));
    }

    #[test]
    fn test_from_lookup_region_only() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_REGION, "ap-south-1")])).unwrap();
        assert_eq!(config.endpoint, "https://codeartifact.ap-south-1.amazonaws.com");
        assert!(matches!(config.auth, ClientAuth::None));
    }

    #[test]
    fn test_from_lookup_requires_location() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TOKEN, "tok")])).unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_REGION, "us-east-1"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_bearer_debug_is_redacted() {
        let debug = format!("{:?}", ClientAuth::bearer("s3cr3t"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn test_validation_mode() {
        let config = ClientConfig::new("https://example.com").with_validation(ValidationMode::ServerSide);
        assert_eq!(config.validation, ValidationMode::ServerSide);
    }

    #[test]
    fn test_tls_config() {
        let tls = TlsConfig::new()
            .with_ca_cert("/path/to/ca.crt")
            .with_client_cert("/path/to/client.crt", "/path/to/client.key");

        assert_eq!(tls.ca_cert, Some(PathBuf::from("/path/to/ca.crt")));
        assert_eq!(tls.client_key, Some(PathBuf::from("/path/to/client.key")));
        assert!(!tls.insecure_skip_verify);
    }
}
