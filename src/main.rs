mod api;
mod config;
mod error;
mod notify;
mod tracker;

use api::jupiter::JupiterClient;
use clap::Parser;
use config::AppConfig;
use env_logger::Builder;
use error::TokenWatchError;
use log::{error, info, LevelFilter};
use notify::{build_notifier, DesktopNotifier, Notifier};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracker::PriceChangeMonitor;

#[derive(Parser, Debug)]
#[command(name = "tokenwatch", version, about = "Token price change monitor")]
struct Args {
    /// Path to the TOML watch-list
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Poll interval in seconds, overrides monitor.poll_interval_secs
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Log level for tokenwatch itself
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,

    /// Send a single desktop notification and exit
    #[arg(long)]
    test_notification: bool,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("unknown log level '{}', expected off|error|warn|info|debug|trace", s))
}

fn init_logger(level: LevelFilter) {
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("tokenwatch", level)
        .parse_default_env()
        .format(|buf, record| {
            let ts = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                ts,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

fn build_monitor(args: &Args) -> Result<(PriceChangeMonitor, Duration), TokenWatchError> {
    let config = AppConfig::load(&args.config)?;
    let poll_interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());

    let source = Arc::new(JupiterClient::new(
        &config.price_api.url,
        config.request_timeout(),
    )?);
    let notifier = build_notifier(config.notifications.backend);
    info!(
        "Using {} with {:?} timeout, {:?} notifications",
        config.price_api.url,
        config.request_timeout(),
        config.notifications.backend
    );

    let monitor = PriceChangeMonitor::new(config.watch_list(), source, notifier)?;
    Ok((monitor, poll_interval))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();
    init_logger(args.log_level);

    info!("TokenWatch - Token Price Monitor");

    if args.test_notification {
        info!("Testing desktop notification...");
        DesktopNotifier::new()
            .notify("TokenWatch Test", "Desktop notifications are working!")
            .await?;
        info!("Notification sent successfully!");
        return Ok(());
    }

    let (mut monitor, poll_interval) = match build_monitor(&args) {
        Ok(built) => built,
        Err(e) => {
            error!(
                "Failed to initialize tracker from {}: {}",
                args.config.display(),
                e
            );
            process::exit(1);
        }
    };

    info!(
        "Monitoring {} tokens, checking every {:?}",
        monitor.watch_list().len(),
        poll_interval
    );

    monitor.run_forever(poll_interval).await;
    Ok(())
}
