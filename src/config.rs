use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;
use url::Url;

pub const ENV_PROJECT_ENDPOINT: &str = "PROJECT_ENDPOINT";
pub const ENV_MODEL_DEPLOYMENT_NAME: &str = "MODEL_DEPLOYMENT_NAME";
pub const ENV_AGENT_API_KEY: &str = "AGENT_API_KEY";
pub const ENV_SCRAPE_DO_TOKEN: &str = "SCRAPE_DO_TOKEN";
pub const ENV_SCRAPE_PROXY_URL: &str = "SCRAPE_PROXY_URL";
pub const ENV_JOB_SEARCH_URL: &str = "JOB_SEARCH_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

/// Every variable the application reads
const ENV_KEYS: [&str; 7] = [
    ENV_PROJECT_ENDPOINT,
    ENV_MODEL_DEPLOYMENT_NAME,
    ENV_AGENT_API_KEY,
    ENV_SCRAPE_DO_TOKEN,
    ENV_SCRAPE_PROXY_URL,
    ENV_JOB_SEARCH_URL,
    ENV_HTTP_TIMEOUT_SECS,
];

/// Startup configuration failures; all of them are fatal
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set. Add it to your environment or .env file.")]
    Missing(&'static str),

    #[error("{name} has an invalid value `{value}`: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the hosted agent service
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the agent service
    pub endpoint: String,

    /// Model or deployment identifier
    pub model: String,

    /// Optional bearer credential
    pub api_key: Option<String>,

    pub timeout: Duration,
}

/// Settings for the job-listing scraper
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Fetch-proxy token; extraction degrades to a diagnostic when absent
    pub token: Option<String>,

    /// Fetch-proxy base URL
    pub proxy_url: String,

    /// Search results page base URL
    pub search_url: String,

    pub timeout: Duration,
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub scrape: ScrapeConfig,
}

/// Default value for the fetch-proxy base URL
fn default_proxy_url() -> String {
    "http://api.scrape.do/".to_string()
}

/// Default value for the search results page
fn default_search_url() -> String {
    "https://www.indeed.com/jobs".to_string()
}

/// Default per-request timeout in seconds
fn default_timeout_secs() -> u64 {
    60
}

impl ScrapeConfig {
    /// Scraper settings with default endpoints and the given token
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            proxy_url: default_proxy_url(),
            search_url: default_search_url(),
            timeout: Duration::from_secs(default_timeout_secs()),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment, honoring a `.env` file
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(read_vars(std::env::var)?)
    }

    /// Build configuration from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let endpoint =
            lookup(ENV_PROJECT_ENDPOINT).ok_or(ConfigError::Missing(ENV_PROJECT_ENDPOINT))?;
        validate_url(ENV_PROJECT_ENDPOINT, &endpoint)?;
        let model = lookup(ENV_MODEL_DEPLOYMENT_NAME)
            .ok_or(ConfigError::Missing(ENV_MODEL_DEPLOYMENT_NAME))?;

        let timeout_secs = match lookup(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => default_timeout_secs(),
        };
        let timeout = Duration::from_secs(timeout_secs);

        let proxy_url = lookup(ENV_SCRAPE_PROXY_URL).unwrap_or_else(default_proxy_url);
        validate_url(ENV_SCRAPE_PROXY_URL, &proxy_url)?;
        let search_url = lookup(ENV_JOB_SEARCH_URL).unwrap_or_else(default_search_url);
        validate_url(ENV_JOB_SEARCH_URL, &search_url)?;

        let config = Self {
            agent: AgentConfig {
                endpoint,
                model,
                api_key: lookup(ENV_AGENT_API_KEY),
                timeout,
            },
            scrape: ScrapeConfig {
                token: lookup(ENV_SCRAPE_DO_TOKEN),
                proxy_url,
                search_url,
                timeout,
            },
        };

        config.log_summary();
        Ok(config)
    }

    fn log_summary(&self) {
        ::log::info!(
            "Agent endpoint {} with model {}",
            self.agent.endpoint,
            self.agent.model
        );
        ::log::debug!(
            "Agent API key {}, proxy token {}",
            if self.agent.api_key.is_some() { "set" } else { "not set" },
            if self.scrape.token.is_some() { "set" } else { "not set" }
        );
        if self.scrape.token.is_none() {
            ::log::warn!(
                "{} is not set; job scraping will report a missing credential",
                ENV_SCRAPE_DO_TOKEN
            );
        }
    }
}

/// Collect the known variables through `lookup`; unrelated variables are never touched
fn read_vars<F>(lookup: F) -> Result<HashMap<String, String>, ConfigError>
where
    F: Fn(&'static str) -> Result<String, VarError>,
{
    let mut vars = HashMap::new();
    for name in ENV_KEYS {
        match lookup(name) {
            Ok(value) => {
                vars.insert(name.to_string(), value);
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(raw)) => {
                return Err(ConfigError::Invalid {
                    name,
                    value: raw.to_string_lossy().into_owned(),
                    reason: "not valid Unicode".to_string(),
                });
            }
        }
    }
    Ok(vars)
}

/// Reject values that are not absolute http(s) URLs
fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name: ENV_HTTP_TIMEOUT_SECS,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError::Invalid {
            name: ENV_HTTP_TIMEOUT_SECS,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
