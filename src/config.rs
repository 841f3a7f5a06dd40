// Process-wide relay configuration
// Loaded once at startup and injected into the gateway client and payload builder

use thiserror::Error;
use url::Url;

pub const DEFAULT_RATING_FIELD_ID: u64 = 33041185023122;
pub const DEFAULT_POSITIVE_FIELD_ID: u64 = 33041276291218;
pub const DEFAULT_IMPROVEMENT_FIELD_ID: u64 = 33041265803026;

/// Errors raised while reading configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{key} is not a valid field id: {value}")]
    InvalidFieldId { key: &'static str, value: String },

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),

    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Numeric identifiers of the three survey custom fields on a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomFieldIds {
    pub rating: u64,
    pub positive: u64,
    pub improvement: u64,
}

impl Default for CustomFieldIds {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING_FIELD_ID,
            positive: DEFAULT_POSITIVE_FIELD_ID,
            improvement: DEFAULT_IMPROVEMENT_FIELD_ID,
        }
    }
}

/// Credentials for the ticketing API: `{admin_email}/token` with the API token
#[derive(Clone)]
pub struct GatewayCredentials {
    pub admin_email: String,
    pub api_token: Option<String>,
}

impl GatewayCredentials {
    pub fn username(&self) -> String {
        format!("{}/token", self.admin_email)
    }
}

// Keeps the token out of logs
impl std::fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("admin_email", &self.admin_email)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub base_url: Url,
    pub credentials: GatewayCredentials,
    pub field_ids: CustomFieldIds,
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
}

impl RelayConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match get("ZENDESK_BASE_URL") {
            Some(url) => parse_url("ZENDESK_BASE_URL", &url)?,
            None => {
                let subdomain =
                    get("ZENDESK_SUBDOMAIN").ok_or(ConfigError::Missing("ZENDESK_SUBDOMAIN"))?;
                parse_url(
                    "ZENDESK_SUBDOMAIN",
                    &format!("https://{}.zendesk.com", subdomain),
                )?
            }
        };

        let admin_email =
            get("ZENDESK_ADMIN_EMAIL").ok_or(ConfigError::Missing("ZENDESK_ADMIN_EMAIL"))?;

        let field_ids = CustomFieldIds {
            rating: field_id(&get, "ZENDESK_RATING_FIELD_ID", DEFAULT_RATING_FIELD_ID)?,
            positive: field_id(&get, "ZENDESK_POSITIVE_FIELD_ID", DEFAULT_POSITIVE_FIELD_ID)?,
            improvement: field_id(
                &get,
                "ZENDESK_IMPROVEMENT_FIELD_ID",
                DEFAULT_IMPROVEMENT_FIELD_ID,
            )?,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        Ok(Self {
            base_url,
            credentials: GatewayCredentials {
                admin_email,
                api_token: get("ZENDESK_TOKEN"),
            },
            field_ids,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            allowed_origin: get("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string()),
        })
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { key, source })
}

fn field_id<G>(get: &G, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidFieldId { key, value: raw }),
        None => Ok(default),
    }
}
