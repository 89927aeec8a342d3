use anyhow::{Context, Result};
use civilian_clock::{
    config::ClockConfig,
    services::{clock_source::SystemClock, display::ConsoleSink, ticker::Ticker},
};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let config = ClockConfig::from_env();
    info!("Clock style: {:?}", config.style);

    let ticker = Ticker::new(SystemClock, ConsoleSink::stdout(), &config.style)
        .with_period(config.period)?;
    let mut handle = ticker.start();

    tokio::signal::ctrl_c()
        .await
        .context("Could not listen for Ctrl-C")?;
    handle.stop().await;

    Ok(())
}
