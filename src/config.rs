use std::{env, path::PathBuf, time::Duration};

use anyhow::Context;

use crate::cart::SyncPolicy;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
pub const DEFAULT_TOKEN_PATH: &str = ".storefront/session.json";

/// Settings for the reference cart backend.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            host,
            port,
            jwt_secret,
        })
    }
}

/// Settings for the storefront cart client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the cart endpoint paths are appended to.
    pub api_base_url: String,
    /// JSON file holding the persisted `access_token`.
    pub token_path: PathBuf,
    /// `None` keeps the HTTP client's own default (no timeout).
    pub request_timeout: Option<Duration>,
    pub sync_policy: SyncPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            request_timeout: None,
            sync_policy: SyncPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// - `STOREFRONT_API_URL`: base URL (default `http://127.0.0.1:3000/api`)
    /// - `STOREFRONT_TOKEN_PATH`: token file (default `.storefront/session.json`)
    /// - `STOREFRONT_HTTP_TIMEOUT_SECS`: optional request timeout
    /// - `STOREFRONT_CART_SYNC`: `concurrent` (default) or `serialized`
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url =
            env::var("STOREFRONT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token_path = env::var("STOREFRONT_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH));
        let request_timeout = match env::var("STOREFRONT_HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.parse::<u64>()
                    .with_context(|| format!("invalid STOREFRONT_HTTP_TIMEOUT_SECS: {raw}"))?,
            )),
            Err(_) => None,
        };
        let sync_policy = match env::var("STOREFRONT_CART_SYNC") {
            Ok(raw) => raw.parse::<SyncPolicy>()?,
            Err(_) => SyncPolicy::default(),
        };

        Ok(Self {
            api_base_url,
            token_path,
            request_timeout,
            sync_policy,
        })
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.sync_policy = policy;
        self
    }
}
