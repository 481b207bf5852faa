use std::env;

use crate::error::{StoreError, StoreResult};

const DEFAULT_URL: &str = "http://localhost:6334";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Read connection parameters from `QDRANT_URL`, `QDRANT_API_KEY`, and
    /// `QDRANT_TIMEOUT_SECS`.
    pub fn from_env() -> StoreResult<Self> {
        let url = env::var("QDRANT_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let api_key = env::var("QDRANT_API_KEY").ok();

        let timeout_secs = match env::var("QDRANT_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                StoreError::Config(format!("Failed to parse QDRANT_TIMEOUT_SECS: '{raw}'"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            url,
            api_key,
            timeout_secs,
        })
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}
