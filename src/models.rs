use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily price bar from the market data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Latest close and indicator values for a single ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub ticker: String,
    pub close: f64,
    pub ma: f64,
    pub rsi: f64,
}

/// Round a price to 2 decimal places, half-up.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(123.456), 123.46);
        assert_eq!(round2(123.454), 123.45);
        assert_eq!(round2(100.0), 100.0);
    }
}
