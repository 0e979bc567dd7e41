use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::services::notifier::NotifierError;

/// Source of homework review statuses
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch every status change since `from_date` (unix seconds)
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, NotifierError>;
}

/// Practicum API client
/// Handles all communication with the homework_statuses endpoint
pub struct PracticumClient {
    client: Client,
    token: String,
    endpoint: String,
}

impl PracticumClient {
    pub fn new(token: String, endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("homework-notifier/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            token,
            endpoint,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.practicum_token().to_string(), config.practicum_endpoint.clone())
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, NotifierError> {
        // A zero cursor means "from now"
        let timestamp = if from_date == 0 {
            chrono::Utc::now().timestamp()
        } else {
            from_date
        };

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|e| NotifierError::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(NotifierError::UnexpectedStatus(response.status().as_u16()));
        }

        tracing::info!("Homework API answered for from_date={}", timestamp);

        response
            .json::<Value>()
            .await
            .map_err(|e| NotifierError::Transport(e.to_string()))
    }
}
