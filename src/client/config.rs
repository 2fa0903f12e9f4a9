//! Client configuration read from `SMSRU_*` environment variables.

use std::num::ParseIntError;
use std::time::Duration;

use crate::client::{SmsRuClient, SmsRuClientBuilder, SmsRuError};
use crate::domain::{ApiId, SenderId, ValidationError};

const ENV_PREFIX: &str = "SMSRU";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(String),

    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Settings needed to build a [`SmsRuClient`].
///
/// | variable             | meaning                          |
/// |----------------------|----------------------------------|
/// | `SMSRU_API_ID`       | account `api_id` (required)      |
/// | `SMSRU_SENDER`       | default sender name              |
/// | `SMSRU_BASE_URL`     | service root, `https://sms.ru`   |
/// | `SMSRU_TIMEOUT_SECS` | whole-request timeout in seconds |
/// | `SMSRU_USER_AGENT`   | `User-Agent` header              |
///
/// Values are trimmed, and blank values count as unset.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_id: ApiId,
    pub sender: Option<SenderId>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(&env_name(key))
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_id = get("API_ID").ok_or_else(|| ConfigError::Missing(env_name("API_ID")))?;
        let timeout = match get("TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .parse::<u64>()
                    .map_err(|source| ConfigError::InvalidTimeout {
                        name: env_name("TIMEOUT_SECS"),
                        value,
                        source,
                    })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_id: ApiId::new(api_id)?,
            sender: get("SENDER").and_then(SenderId::optional),
            base_url: get("BASE_URL"),
            timeout,
            user_agent: get("USER_AGENT"),
        })
    }

    /// Turn the configuration into a builder for further tweaks.
    pub fn into_builder(self) -> SmsRuClientBuilder {
        let mut builder = SmsRuClient::builder(self.api_id);
        if let Some(sender) = self.sender {
            builder = builder.sender(sender);
        }
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        builder
    }

    /// Build a client straight from this configuration.
    pub fn build_client(self) -> Result<SmsRuClient, SmsRuError> {
        self.into_builder().build()
    }
}

fn env_name(key: &str) -> String {
    format!("{ENV_PREFIX}_{key}")
}
