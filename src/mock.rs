//! Demo batch generator
//!
//! Produces a synthetic batch shaped like a real fetch: one bucket per hour
//! going back over the lookback, popular coins mentioned more often, and a
//! per-coin baseline so the signal views have something to show.

use crate::error::Result;
use crate::record::SentimentRecord;
use crate::signal_core::{FetchParams, Lookback};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub const DEMO_COINS: &[(&str, &str)] = &[
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("SOL", "Solana"),
    ("ADA", "Cardano"),
    ("DOT", "Polkadot"),
    ("AVAX", "Avalanche"),
    ("MATIC", "Polygon"),
    ("LINK", "Chainlink"),
    ("UNI", "Uniswap"),
    ("ATOM", "Cosmos"),
];

const DEMO_SOURCES: &[&str] = &["CoinDesk", "CryptoNews", "Decrypt", "TheBlock"];

/// Records per hour for the coin at `idx`: 3 for the top three, 2 for the next three, else 1.
fn mentions_per_hour(idx: usize) -> usize {
    match idx {
        0..=2 => 3,
        3..=5 => 2,
        _ => 1,
    }
}

/// Generate a demo batch covering the lookback of `params`, newest hour first.
pub fn generate_demo_batch<R: Rng + ?Sized>(
    params: &FetchParams,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<SentimentRecord>> {
    let hours = match params.lookback() {
        Lookback::Hours(h) => h,
        Lookback::Days(d) => d.saturating_mul(24),
    };

    let mut records = Vec::new();

    for i in 0..hours {
        let date = now - Duration::hours(i64::from(i));

        for (idx, (symbol, name)) in DEMO_COINS.iter().enumerate() {
            for j in 0..mentions_per_hour(idx) {
                let baseline = (idx as f64 - 5.0) * 0.1;
                let variation = (rng.gen::<f64>() - 0.5) * 0.4;
                let decay = f64::from(i) * 0.001;
                let sentiment = (baseline + variation - decay).clamp(-1.0, 1.0);

                let source = DEMO_SOURCES[rng.gen_range(0..DEMO_SOURCES.len())];
                let record = SentimentRecord::new(*symbol, *name, sentiment, date)?
                    .with_relevance(rng.gen_range(0.5..1.0))
                    .with_article(format!("News about {} - Article {}", name, j + 1), source)
                    .with_explanation(format!("Sentiment analysis for {}", name));

                records.push(record);
            }
        }
    }

    log::debug!("Generated {} demo records over {}h", records.len(), hours);
    Ok(records)
}
