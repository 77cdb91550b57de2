//! Configuration loaded from environment variables

use crate::aggregator_core::AggregationLimits;
use crate::error::{Result, SentimentError};
use crate::signal_core::{FetchParams, StablecoinFilter, DEFAULT_RECENCY_WINDOW, DEFAULT_STABLECOINS};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration for the report tool.
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Payload file to read; the demo batch is used when unset
    pub input_path: Option<PathBuf>,

    /// JSONL output file; reports go to stdout when unset
    pub output_path: Option<PathBuf>,

    pub limits: AggregationLimits,

    pub recency_window: usize,

    /// Upper-cased stablecoin tickers removed before aggregation
    pub stablecoin_denylist: Vec<String>,

    pub fetch: FetchParams,

    /// Recompute interval in watch mode
    pub refresh_interval_secs: u64,

    /// Keep recomputing every `refresh_interval_secs`
    pub watch: bool,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SENTIFLOW_INPUT_PATH` (default: unset, demo batch)
    /// - `SENTIFLOW_OUTPUT_PATH` (default: unset, stdout)
    /// - `TRENDS_TOP_N` (default: 10)
    /// - `HEATMAP_TOP_N` (default: 20)
    /// - `DISTRIBUTION_TOP_N` (default: 15)
    /// - `RECENCY_WINDOW` (default: 5)
    /// - `STABLECOIN_DENYLIST` (comma-separated, default: USDT,USDC,DAI,BUSD,…)
    /// - `FETCH_DAYS` / `FETCH_HOURS` / `FETCH_SYMBOLS` (default: 7 days, all symbols)
    /// - `REFRESH_INTERVAL_SECS` (default: 60)
    /// - `WATCH` (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let list = |key: &str| {
            lookup(key).map(|s| {
                s.split(',')
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect::<Vec<String>>()
            })
        };

        let defaults = AggregationLimits::default();

        Self {
            input_path: lookup("SENTIFLOW_INPUT_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            output_path: lookup("SENTIFLOW_OUTPUT_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            limits: AggregationLimits {
                trends_top_n: parse_var(&lookup, "TRENDS_TOP_N")
                    .unwrap_or(defaults.trends_top_n),
                heatmap_top_n: parse_var(&lookup, "HEATMAP_TOP_N")
                    .unwrap_or(defaults.heatmap_top_n),
                distribution_top_n: parse_var(&lookup, "DISTRIBUTION_TOP_N")
                    .unwrap_or(defaults.distribution_top_n),
            },

            recency_window: parse_var(&lookup, "RECENCY_WINDOW")
                .filter(|w: &usize| *w > 0)
                .unwrap_or(DEFAULT_RECENCY_WINDOW),

            stablecoin_denylist: list("STABLECOIN_DENYLIST")
                .unwrap_or_else(|| DEFAULT_STABLECOINS.iter().map(|s| s.to_string()).collect())
                .into_iter()
                .map(|s| s.to_uppercase())
                .collect(),

            fetch: FetchParams {
                days: parse_var(&lookup, "FETCH_DAYS"),
                hours: parse_var(&lookup, "FETCH_HOURS"),
                symbols: list("FETCH_SYMBOLS").unwrap_or_default(),
            },

            refresh_interval_secs: parse_var(&lookup, "REFRESH_INTERVAL_SECS")
                .filter(|s: &u64| *s > 0)
                .unwrap_or(60),

            watch: parse_var(&lookup, "WATCH").unwrap_or(false),
        }
    }

    /// Reject settings that would make every run fail or chart nothing.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.input_path {
            if !path.is_file() {
                return Err(SentimentError::Config(format!(
                    "SENTIFLOW_INPUT_PATH {} is not a file",
                    path.display()
                )));
            }
        }

        let limits = [
            ("TRENDS_TOP_N", self.limits.trends_top_n),
            ("HEATMAP_TOP_N", self.limits.heatmap_top_n),
            ("DISTRIBUTION_TOP_N", self.limits.distribution_top_n),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, n)| *n == 0) {
            return Err(SentimentError::Config(format!("{} must be at least 1", name)));
        }

        Ok(())
    }

    pub fn stablecoin_filter(&self) -> StablecoinFilter {
        StablecoinFilter::new(&self.stablecoin_denylist)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|raw| raw.trim().parse().ok())
}
