use crate::api_client::{ApiClient, ApiError};
use crate::indicators::{RSI, SMA};
use crate::models::{round2, DailyBar, StockSnapshot};

const MA_WINDOW: usize = 9;
const RSI_WINDOW: usize = 14;

#[derive(Debug)]
pub enum StockDataError {
    NotFound,
    InsufficientData,
    InvalidComputation,
    Provider(String),
}

impl std::fmt::Display for StockDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockDataError::NotFound => write!(f, "No data found for this ticker"),
            StockDataError::InsufficientData => {
                write!(f, "Not enough data to calculate indicators")
            }
            StockDataError::InvalidComputation => write!(f, "Calculated values contain NaN"),
            StockDataError::Provider(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for StockDataError {}

impl From<ApiError> for StockDataError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NoData => StockDataError::NotFound,
            other => StockDataError::Provider(other.to_string()),
        }
    }
}

/// Fetch the recent daily history for `ticker` and reduce it to the
/// latest close plus MA(9) and RSI(14) values.
pub async fn get_stock_data(
    api: &ApiClient,
    ticker: &str,
) -> Result<StockSnapshot, StockDataError> {
    let bars = api.fetch_daily_history(ticker).await?;
    tracing::info!("Fetched {} daily bars for {}", bars.len(), ticker);
    compute_snapshot(ticker, &bars)
}

/// Indicator pipeline over an already-fetched history: compute both
/// series over the close column, drop every row where any of
/// {close, MA, RSI} is undefined, and report the last surviving row.
pub fn compute_snapshot(
    ticker: &str,
    bars: &[DailyBar],
) -> Result<StockSnapshot, StockDataError> {
    if bars.is_empty() {
        return Err(StockDataError::NotFound);
    }

    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let ma = SMA::new(MA_WINDOW).calculate(&closes);
    let rsi = RSI::new(RSI_WINDOW).calculate(&closes);

    let complete: Vec<usize> = (0..closes.len())
        .filter(|&i| closes[i].is_finite() && ma[i].is_finite() && rsi[i].is_finite())
        .collect();

    let last = *complete.last().ok_or(StockDataError::InsufficientData)?;

    let (close_val, ma_val, rsi_val) = (closes[last], ma[last], rsi[last]);
    if !close_val.is_finite() || !ma_val.is_finite() || !rsi_val.is_finite() {
        return Err(StockDataError::InvalidComputation);
    }

    Ok(StockSnapshot {
        ticker: ticker.to_string(),
        close: round2(close_val),
        ma: round2(ma_val),
        rsi: round2(rsi_val),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars_from_closes(closes: &[f64]) -> Vec<DailyBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000,
            })
            .collect()
    }

    /// 30 closes trending up with a pullback every third day, so every
    /// RSI window sees both gains and losses
    fn mixed_closes() -> Vec<f64> {
        let mut closes = vec![100.0];
        for i in 1..30 {
            let change = if i % 3 == 0 { -1.0 } else { 2.0 };
            closes.push(closes[i - 1] + change);
        }
        closes
    }

    #[test]
    fn test_empty_history_is_not_found() {
        let result = compute_snapshot("AAPL", &[]);
        assert!(matches!(result, Err(StockDataError::NotFound)));
    }

    #[test]
    fn test_short_history_is_insufficient() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + (i % 3) as f64).collect();
        let bars = bars_from_closes(&closes);

        let result = compute_snapshot("AAPL", &bars);
        assert!(matches!(result, Err(StockDataError::InsufficientData)));
    }

    #[test]
    fn test_strictly_increasing_is_insufficient() {
        // Zero average loss everywhere leaves every RSI value undefined,
        // so no complete row survives
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bars = bars_from_closes(&closes);

        let result = compute_snapshot("AAPL", &bars);
        assert!(matches!(result, Err(StockDataError::InsufficientData)));
    }

    #[test]
    fn test_snapshot_values() {
        let closes = mixed_closes();
        let bars = bars_from_closes(&closes);

        let snapshot = compute_snapshot("AAPL", &bars).unwrap();

        assert_eq!(snapshot.ticker, "AAPL");
        assert_eq!(snapshot.close, round2(*closes.last().unwrap()));

        // MA at the last row is the mean of the last 9 closes
        let expected_ma: f64 = closes[closes.len() - 9..].iter().sum::<f64>() / 9.0;
        assert_eq!(snapshot.ma, round2(expected_ma));

        assert!(snapshot.rsi > 0.0 && snapshot.rsi < 100.0);
        // Mostly gains, so momentum reads high
        assert!(snapshot.rsi > 50.0);
    }

    #[test]
    fn test_snapshot_rounds_half_up() {
        let mut closes = mixed_closes();
        *closes.last_mut().unwrap() = 123.456;
        let bars = bars_from_closes(&closes);

        let snapshot = compute_snapshot("AAPL", &bars).unwrap();
        assert_eq!(snapshot.close, 123.46);

        *closes.last_mut().unwrap() = 123.454;
        let bars = bars_from_closes(&closes);

        let snapshot = compute_snapshot("AAPL", &bars).unwrap();
        assert_eq!(snapshot.close, 123.45);
    }

    #[test]
    fn test_trailing_undefined_rsi_falls_back_to_earlier_row() {
        // Fourteen straight gains at the tail leave the last RSI windows
        // with zero average loss; the last complete row is an earlier one
        let mut closes = mixed_closes();
        let last = *closes.last().unwrap();
        for i in 1..=14 {
            closes.push(last + i as f64);
        }
        let bars = bars_from_closes(&closes);

        let snapshot = compute_snapshot("AAPL", &bars).unwrap();

        // The reported close belongs to the last row whose RSI window
        // still contained a loss, not the final bar
        assert!(snapshot.close < round2(*closes.last().unwrap()));
    }
}
