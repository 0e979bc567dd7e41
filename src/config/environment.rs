use std::env;
use std::fmt;
use std::time::Duration;

use crate::modules::homework::schema::EmptyHomeworksPolicy;
use crate::services::notifier::NotifierError;

pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_TIME_SECS: u64 = 600;

/// Variables that must be present before the polling loop may start.
pub const REQUIRED_VARIABLES: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Environment configuration
/// Loads and validates environment variables
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub practicum_endpoint: String,
    pub telegram_api_url: String,
    pub retry_time: Duration,
    pub empty_homeworks: EmptyHomeworksPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, NotifierError> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    /// Empty values count as missing.
    pub fn from_vars<F>(lookup: F) -> Result<Self, NotifierError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let required = |key: &'static str| get(key).ok_or(NotifierError::MissingVariable(key));

        let practicum_token = required("PRACTICUM_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let practicum_endpoint = get("PRACTICUM_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string());

        let telegram_api_url = get("TELEGRAM_API_URL")
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let retry_secs = match get("RETRY_TIME_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(NotifierError::InvalidVariable("RETRY_TIME_SECS", raw))?,
            None => DEFAULT_RETRY_TIME_SECS,
        };

        let empty_homeworks = match get("EMPTY_HOMEWORKS_POLICY") {
            Some(raw) => raw
                .parse::<EmptyHomeworksPolicy>()
                .map_err(|_| NotifierError::InvalidVariable("EMPTY_HOMEWORKS_POLICY", raw))?,
            None => EmptyHomeworksPolicy::default(),
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            practicum_endpoint,
            telegram_api_url,
            retry_time: Duration::from_secs(retry_secs),
            empty_homeworks,
        })
    }

    pub fn practicum_token(&self) -> &str {
        &self.practicum_token
    }
}

// Tokens never reach the logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_time", &self.retry_time)
            .field("empty_homeworks", &self.empty_homeworks)
            .finish()
    }
}
