//! Client for the informational lookup backend.
//!
//! Used only when the user opens the detail panel of a menu item. The
//! backend answers two questions per item ("what is it" and "how is it
//! prepared in <country>") and caches the answers on its side.

mod error;
mod types;

use std::sync::{Arc, RwLock};
use std::time::Duration;

pub use error::LookupError;
pub use types::{FoodInfo, InfoSection, LookupResult, Source};

use types::{LookupEnvelope, LookupRequest};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

/// Request/response client for `POST <backend>/api/food-info`.
///
/// Clones share the backend URL, which can be changed at runtime.
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    base_url: Arc<RwLock<String>>,
    timeout: Duration,
}

impl LookupClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Arc::new(RwLock::new(normalize(base_url.into()))),
            timeout,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_base_url(&self, url: impl Into<String>) {
        let url = normalize(url.into());
        tracing::info!(backend = %url, "lookup backend changed");
        *self.base_url.write().unwrap_or_else(|e| e.into_inner()) = url;
    }

    /// Fetches information about `food_name` as prepared in `country`.
    pub async fn lookup(&self, food_name: &str, country: &str) -> Result<LookupResult, LookupError> {
        let base_url = self.base_url();
        let response = self
            .http
            .post(format!("{base_url}/api/food-info"))
            .timeout(self.timeout)
            .json(&LookupRequest { food_name, country })
            .send()
            .await
            .map_err(|err| classify(err, &base_url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| classify(err, &base_url))?;

        if !status.is_success() {
            let message = serde_json::from_str::<LookupEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| format!("Backend API error: {}", status.as_u16()));
            return Err(LookupError::Backend(message));
        }

        let envelope: LookupEnvelope = serde_json::from_str(&body)?;
        match (envelope.success, envelope.data) {
            (true, Some(info)) => {
                tracing::debug!(food_name, country, cached = envelope.cached, "lookup answered");
                Ok(LookupResult {
                    info,
                    cached: envelope.cached,
                })
            }
            _ => Err(LookupError::Backend(
                envelope
                    .error
                    .unwrap_or_else(|| "Failed to fetch food information".to_string()),
            )),
        }
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn classify(err: reqwest::Error, base_url: &str) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout
    } else if err.is_connect() {
        LookupError::Connect {
            url: base_url.to_string(),
        }
    } else {
        LookupError::Http(err)
    }
}
