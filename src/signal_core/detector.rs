//! Signal classification with configurable thresholds

use super::signal::SignalKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalThresholds {
    /// `recent` must exceed this for STRONG BUY (and fall below its negation for STRONG SELL).
    pub strong_level: f64,
    /// `recent` must exceed this for BUY (and fall below its negation for SELL).
    pub level: f64,
    /// `trend` must exceed this for STRONG BUY (and fall below its negation for STRONG SELL).
    pub trend: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            strong_level: 0.3,
            level: 0.1,
            trend: 0.1,
        }
    }
}

pub struct SignalDetector {
    thresholds: SignalThresholds,
}

impl SignalDetector {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_defaults() -> Self {
        Self::new(SignalThresholds::default())
    }

    pub fn thresholds(&self) -> SignalThresholds {
        self.thresholds
    }

    /// Classify recent sentiment and its trend into a signal and strength
    ///
    /// # Priority
    /// STRONG BUY, BUY, STRONG SELL, SELL, then NEUTRAL. The first matching
    /// rule wins, so a STRONG BUY never degrades to BUY.
    ///
    /// # Strength
    /// BUY and SELL report `|recent|` without an upper clamp. STRONG SELL
    /// reports `|min(-1, recent + trend)|`, which is never below 1.0.
    pub fn classify(&self, recent: f64, trend: f64) -> (SignalKind, f64) {
        let t = &self.thresholds;

        if recent > t.strong_level && trend > t.trend {
            return (SignalKind::StrongBuy, (recent + trend).min(1.0));
        }

        if recent > t.level {
            return (SignalKind::Buy, recent);
        }

        if recent < -t.strong_level && trend < -t.trend {
            return (SignalKind::StrongSell, (recent + trend).min(-1.0).abs());
        }

        if recent < -t.level {
            return (SignalKind::Sell, recent.abs());
        }

        (SignalKind::Neutral, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_buy() {
        let detector = SignalDetector::with_defaults();

        let (kind, strength) = detector.classify(0.5, 0.2);
        assert_eq!(kind, SignalKind::StrongBuy);
        assert!((strength - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_strong_buy_strength_clamped() {
        let detector = SignalDetector::with_defaults();

        let (kind, strength) = detector.classify(0.9, 0.4);
        assert_eq!(kind, SignalKind::StrongBuy);
        assert_eq!(strength, 1.0);
    }

    #[test]
    fn test_strong_buy_takes_precedence() {
        let detector = SignalDetector::with_defaults();

        // Both the STRONG BUY and BUY conditions hold
        let (kind, _) = detector.classify(0.45, 0.15);
        assert_eq!(kind, SignalKind::StrongBuy);
    }

    #[test]
    fn test_buy_at_strong_boundary() {
        let detector = SignalDetector::with_defaults();

        // 0.3 is not strictly greater than 0.3
        let (kind, strength) = detector.classify(0.3, 0.2);
        assert_eq!(kind, SignalKind::Buy);
        assert_eq!(strength, 0.3);
    }

    #[test]
    fn test_buy_strength_not_clamped() {
        let detector = SignalDetector::with_defaults();

        let (kind, strength) = detector.classify(1.4, 0.0);
        assert_eq!(kind, SignalKind::Buy);
        assert_eq!(strength, 1.4);
    }

    #[test]
    fn test_strong_sell_strength_at_least_one() {
        let detector = SignalDetector::with_defaults();

        let (kind, strength) = detector.classify(-0.4, -0.2);
        assert_eq!(kind, SignalKind::StrongSell);
        assert_eq!(strength, 1.0);

        let (_, deeper) = detector.classify(-0.9, -0.5);
        assert!((deeper - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_sell() {
        let detector = SignalDetector::with_defaults();

        // Negative enough for SELL but trend too flat for STRONG SELL
        let (kind, strength) = detector.classify(-0.5, -0.05);
        assert_eq!(kind, SignalKind::Sell);
        assert_eq!(strength, 0.5);
    }

    #[test]
    fn test_neutral() {
        let detector = SignalDetector::with_defaults();

        for (recent, trend) in [(0.1, 0.5), (-0.1, -0.5), (0.0, 0.0)] {
            let (kind, strength) = detector.classify(recent, trend);
            assert_eq!(kind, SignalKind::Neutral);
            assert_eq!(strength, 0.0);
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let detector = SignalDetector::new(SignalThresholds {
            strong_level: 0.5,
            level: 0.2,
            trend: 0.1,
        });

        let (kind, _) = detector.classify(0.15, 0.0);
        assert_eq!(kind, SignalKind::Neutral);

        let (kind, _) = detector.classify(0.4, 0.3);
        assert_eq!(kind, SignalKind::Buy);
    }
}
