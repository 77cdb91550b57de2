//! Sentiment Report Binary - signals and chart aggregates for one batch
//!
//! Loads a sentiment batch (payload file or generated demo data), derives
//! per-symbol trading signals and every chart aggregate, and writes one
//! `SentimentReport` snapshot. In watch mode the batch is reloaded and the
//! report recomputed on every tick.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin sentiment_report
//! cargo run --release --bin sentiment_report -- --watch
//! ```
//!
//! ## Environment Variables
//!
//! - SENTIFLOW_INPUT_PATH - JSON payload file (default: generated demo batch)
//! - SENTIFLOW_OUTPUT_PATH - JSONL file reports are appended to (default: stdout)
//! - TRENDS_TOP_N / HEATMAP_TOP_N / DISTRIBUTION_TOP_N - chart limits (default: 10 / 20 / 15)
//! - RECENCY_WINDOW - records averaged for the recent sentiment (default: 5)
//! - STABLECOIN_DENYLIST - comma-separated tickers to exclude (default: USDT,USDC,DAI,...)
//! - FETCH_DAYS / FETCH_HOURS / FETCH_SYMBOLS - fetch window (default: 7 days, all symbols)
//! - REFRESH_INTERVAL_SECS - recompute interval in watch mode (default: 60)
//! - WATCH - recompute forever (default: false)
//! - RUST_LOG - Logging level (optional, default: info)

use chrono::Utc;
use sentiflow::mock::generate_demo_batch;
use sentiflow::signal_core::SignalKind;
use sentiflow::{EngineConfig, ReportBuilder, ReportWriter, SentimentBatch, SentimentReport};
use std::env;
use tokio::time::{interval, Duration};

fn watch_from_args() -> bool {
    env::args().any(|arg| arg == "--watch")
}

fn compute_report(config: &EngineConfig, builder: &ReportBuilder) -> sentiflow::Result<SentimentReport> {
    let now = Utc::now();

    match &config.input_path {
        Some(path) => {
            let batch = SentimentBatch::from_path(path)?;
            log::info!(
                "📖 Loaded {} records ({} payload) from {}",
                batch.records.len(),
                batch.format.as_str(),
                path.display()
            );
            Ok(builder.build(batch, now))
        }
        None => {
            let records = generate_demo_batch(&config.fetch, now, &mut rand::thread_rng())?;
            log::info!("🎲 Generated {} demo records", records.len());
            Ok(builder.build_from_records(records, now))
        }
    }
}

fn log_signals(report: &SentimentReport) {
    for group in &report.signal_groups {
        if group.kind == SignalKind::Neutral {
            continue;
        }
        for signal in &group.signals {
            log::info!(
                "🎯 {} {} ({}): strength {:.2}, recent {:.3}, trend {:+.3}, {} mentions",
                signal.signal,
                signal.symbol,
                signal.coin_name,
                signal.strength,
                signal.recent_sentiment,
                signal.trend,
                signal.mentions
            );
        }
    }
}

async fn run_once(
    config: &EngineConfig,
    builder: &ReportBuilder,
    writer: &mut ReportWriter,
) -> sentiflow::Result<()> {
    let report = compute_report(config, builder)?;
    log_signals(&report);
    writer.write_report(&report).await?;
    writer.flush().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let mut config = EngineConfig::from_env();
    config.watch |= watch_from_args();
    config.validate()?;

    log::info!("🚀 Starting Sentiment Report");
    match &config.input_path {
        Some(path) => log::info!("   Input: {}", path.display()),
        None => log::info!("   Input: generated demo batch"),
    }
    log::info!("   Lookback: {:?}", config.fetch.lookback());
    log::info!(
        "   Limits: trends {}, heatmap {}, distribution {}",
        config.limits.trends_top_n,
        config.limits.heatmap_top_n,
        config.limits.distribution_top_n
    );
    log::info!("   Recency window: {}", config.recency_window);
    log::info!("   Stablecoin denylist: {} tickers", config.stablecoin_denylist.len());

    let builder = ReportBuilder::from_config(&config);
    let mut writer = ReportWriter::new(config.output_path.clone())?;

    log::info!("📊 Backend: {}", writer.backend_type());

    if !config.watch {
        run_once(&config, &builder, &mut writer).await?;
        log::info!("✅ Report written");
        return Ok(());
    }

    log::info!("👀 Watch mode: recomputing every {}s", config.refresh_interval_secs);

    // First tick fires immediately
    let mut refresh_ticker = interval(Duration::from_secs(config.refresh_interval_secs));

    loop {
        tokio::select! {
            _ = refresh_ticker.tick() => {
                log::info!("⏱️  Recomputing sentiment report...");
                // A bad batch skips one refresh; the next tick retries
                if let Err(e) = run_once(&config, &builder, &mut writer).await {
                    log::error!("Failed to compute report: {}", e);
                }
            }

            _ = tokio::signal::ctrl_c() => {
                log::info!("🛑 Shutting down");
                writer.flush().await?;
                return Ok(());
            }
        }
    }
}
