use std::env;
use std::fmt::Formatter;
use std::time::Duration;

use log::warn;

use crate::provider::os_places::DEFAULT_USER_AGENT;

const DEFAULT_FIND_URL: &str = "https://api.os.uk/search/places/v1/find";
const DEFAULT_POSTCODE_URL: &str = "https://api.os.uk/search/places/v1/postcode";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub find_url: String,
    pub postcode_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub bind_address: String
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String)
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid(name, value) => write!(f, "{} has an invalid value: {}", name, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the process environment. Call `dotenv()` first to pick up a
    /// local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {
        let api_key = lookup("OS_PLACES_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("OS_PLACES_API_KEY"))?;

        let timeout = match lookup("OS_PLACES_TIMEOUT_SECS") {
            Some(secs) => {
                let secs = secs
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("OS_PLACES_TIMEOUT_SECS", secs.clone()))?;
                Some(Duration::from_secs(secs))
            },
            None => None,
        };

        let user_agent = lookup("OS_PLACES_USER_AGENT").unwrap_or_else(|| {
            warn!("No OS_PLACES_USER_AGENT set, using \"{}\"", DEFAULT_USER_AGENT);
            DEFAULT_USER_AGENT.to_string()
        });

        Ok(Config {
            api_key,
            find_url: lookup("OS_PLACES_FIND_URL").unwrap_or_else(|| DEFAULT_FIND_URL.to_string()),
            postcode_url: lookup("OS_PLACES_POSTCODE_URL")
                .unwrap_or_else(|| DEFAULT_POSTCODE_URL.to_string()),
            user_agent,
            timeout,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
        })
    }
}
