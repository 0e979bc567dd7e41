pub mod config;
pub mod modules;
pub mod services;

use config::Config;
use services::notifier::Notifier;
use services::practicum::PracticumClient;
use services::telegram::TelegramBot;

/// Wire the production clients into a notifier starting from `now`.
pub fn create_notifier(config: &Config) -> Notifier<PracticumClient, TelegramBot> {
    Notifier::new(
        PracticumClient::from_config(config),
        TelegramBot::from_config(config),
        config.retry_time,
        chrono::Utc::now().timestamp(),
    )
    .with_empty_homeworks(config.empty_homeworks)
}
