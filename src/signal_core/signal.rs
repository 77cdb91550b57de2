//! Trading signal types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete signal buckets, ordered `StrongSell < Sell < Neutral < Buy < StrongBuy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    #[serde(rename = "STRONG SELL")]
    StrongSell,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::StrongBuy => "STRONG BUY",
            SignalKind::Buy => "BUY",
            SignalKind::Neutral => "NEUTRAL",
            SignalKind::Sell => "SELL",
            SignalKind::StrongSell => "STRONG SELL",
        }
    }

    /// Strongest buy first.
    pub fn all() -> [SignalKind; 5] {
        [
            SignalKind::StrongBuy,
            SignalKind::Buy,
            SignalKind::Neutral,
            SignalKind::Sell,
            SignalKind::StrongSell,
        ]
    }

    /// Anything but NEUTRAL.
    pub fn is_active(&self) -> bool {
        !matches!(self, SignalKind::Neutral)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub symbol: String,
    pub coin_name: String,
    pub signal: SignalKind,
    pub strength: f64,
    pub avg_sentiment: f64,
    pub recent_sentiment: f64,
    pub trend: f64,
    pub mentions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_ordering() {
        assert!(SignalKind::StrongBuy > SignalKind::Buy);
        assert!(SignalKind::Buy > SignalKind::Neutral);
        assert!(SignalKind::Neutral > SignalKind::Sell);
        assert!(SignalKind::Sell > SignalKind::StrongSell);
    }

    #[test]
    fn test_labels() {
        for kind in SignalKind::all() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
        assert!(serde_json::from_str::<SignalKind>(r#""HOLD""#).is_err());
    }

    #[test]
    fn test_serde_uses_wire_labels() {
        let json = serde_json::to_string(&SignalKind::StrongBuy).unwrap();
        assert_eq!(json, r#""STRONG BUY""#);

        let parsed: SignalKind = serde_json::from_str(r#""STRONG SELL""#).unwrap();
        assert_eq!(parsed, SignalKind::StrongSell);
    }

    #[test]
    fn test_is_active() {
        assert!(!SignalKind::Neutral.is_active());
        assert!(SignalKind::Sell.is_active());
    }
}
