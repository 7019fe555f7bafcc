use anyhow::Context;
use meteobot::{Bot, BotConfig, LoggingConfig, TelegramClient, WeatherApiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let weather = WeatherApiClient::new(config.weather.clone())
        .context("Failed to create weather API client")?;
    let telegram = TelegramClient::new(config.telegram.clone())
        .context("Failed to create Telegram client")?;

    Bot::new(telegram, weather).run().await?;

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    // RUST_LOG wins; otherwise use the configured level and keep the HTTP
    // client internals quiet unless explicitly raised
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},reqwest=warn,hyper=warn", config.level))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
