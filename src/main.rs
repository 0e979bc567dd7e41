use homework_notifier::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_notifier=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("CRITICAL: {}", e);
            tracing::error!("Program stopped, the polling loop was not started");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Polling {} every {}s",
        config.practicum_endpoint,
        config.retry_time.as_secs()
    );

    homework_notifier::create_notifier(&config).run().await;
}
