use serde::{Deserialize, Serialize};

use crate::{validate_currency_code, ValidationError};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Payment gateways can take a while to answer writes.
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 60_000;

/// Connection settings for a Recurly site.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    pub subdomain: String,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            subdomain: subdomain.into(),
            private_key: None,
            currency: default_currency(),
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
            user_agent: default_user_agent(),
        }
    }

    /// Load from `RECURLY_API_KEY` and `RECURLY_SUBDOMAIN`, plus the optional
    /// `RECURLY_PRIVATE_KEY`, `RECURLY_CURRENCY` and `RECURLY_BASE_URL`.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = read("RECURLY_API_KEY").ok_or(ValidationError::MissingConfig {
            name: "RECURLY_API_KEY",
        })?;
        let subdomain = read("RECURLY_SUBDOMAIN").ok_or(ValidationError::MissingConfig {
            name: "RECURLY_SUBDOMAIN",
        })?;

        let mut config = Self::new(api_key, subdomain);
        config.private_key = read("RECURLY_PRIVATE_KEY");
        if let Some(currency) = read("RECURLY_CURRENCY") {
            config.currency = validate_currency_code(&currency)?;
        }
        config.base_url = read("RECURLY_BASE_URL");

        config.validate()?;
        Ok(config)
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_write_timeout_ms(mut self, write_timeout_ms: u64) -> Self {
        self.write_timeout_ms = write_timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Root URL every request path is appended to, without a trailing slash.
    pub fn server_url(&self) -> String {
        match &self.base_url {
            Some(base_url) => base_url.trim_end_matches('/').to_owned(),
            None => format!("https://{}.recurly.com/v2", self.subdomain),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingConfig { name: "api_key" });
        }
        if self.subdomain.trim().is_empty() && self.base_url.is_none() {
            return Err(ValidationError::MissingConfig { name: "subdomain" });
        }
        if validate_currency_code(&self.currency)? != self.currency {
            return Err(ValidationError::InvalidCurrency {
                value: self.currency.clone(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("currency", &self.currency)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("write_timeout_ms", &self.write_timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_currency() -> String {
    String::from(DEFAULT_CURRENCY)
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

const fn default_write_timeout_ms() -> u64 {
    DEFAULT_WRITE_TIMEOUT_MS
}

fn default_user_agent() -> String {
    format!("recurly-rs/{}", env!("CARGO_PKG_VERSION"))
}
