use crate::models::DailyBar;
use chrono::DateTime;
use serde::Deserialize;
use std::collections::HashMap;

/// Chart API response: `chart.result[0]` carries a timestamp column plus
/// parallel OHLCV columns under `indicators.quote[0]`.
#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Batch quote response: a flat list of per-symbol quote objects.
#[derive(Deserialize)]
struct QuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResult,
}

#[derive(Deserialize)]
struct QuoteResult {
    result: Vec<Quote>,
}

#[derive(Deserialize)]
struct Quote {
    symbol: String,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug)]
pub enum ApiError {
    RequestFailed(String),
    ParseError(String),
    NoData,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            ApiError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ApiError::NoData => write!(f, "No data returned by provider"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Fetch roughly the last month of daily bars for a single ticker.
    /// Rows are returned ascending by date; rows with a hole in any
    /// OHLCV column are dropped during normalization.
    pub async fn fetch_daily_history(&self, ticker: &str) -> Result<Vec<DailyBar>, ApiError> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1mo",
            self.base_url, ticker
        );

        let response: ChartResponse = self.client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0 stock-data-api/1.0")
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        chart_to_bars(response)
    }

    /// Fetch the latest market price for all symbols in one batched
    /// request. The returned map is keyed by the provider's symbol;
    /// symbols the provider does not know, or answers without a usable
    /// price, are simply absent.
    pub async fn fetch_latest_quotes(
        &self,
        symbols: &[&str],
    ) -> Result<HashMap<String, f64>, ApiError> {
        let url = format!(
            "{}/v7/finance/quote?symbols={}",
            self.base_url,
            symbols.join(",")
        );

        let response: QuoteResponse = self.client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0 stock-data-api/1.0")
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        Ok(quotes_by_symbol(response))
    }
}

/// Normalize the provider's column-oriented chart payload into row-major
/// daily bars. A row is emitted only when the timestamp and all five
/// OHLCV columns are present at that position.
fn chart_to_bars(response: ChartResponse) -> Result<Vec<DailyBar>, ApiError> {
    if let Some(err) = response.chart.error {
        // The provider reports unknown tickers here; treat it the same
        // as an empty table
        tracing::warn!("Provider chart error {}: {}", err.code, err.description);
        return Err(ApiError::NoData);
    }

    let result = response
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or(ApiError::NoData)?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or(ApiError::NoData)?;

    let mut bars = Vec::new();
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();

        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
            (open, high, low, close, volume)
        else {
            continue;
        };

        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| ApiError::ParseError("Invalid timestamp".to_string()))?
            .date_naive();

        bars.push(DailyBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    // Sort by date (ascending)
    bars.sort_by_key(|bar| bar.date);

    Ok(bars)
}

/// Normalize the batch quote list into a symbol-keyed price map. A
/// single-symbol response is a one-element list and takes the same path.
fn quotes_by_symbol(response: QuoteResponse) -> HashMap<String, f64> {
    let mut prices = HashMap::new();
    for quote in response.quote_response.result {
        if let Some(price) = quote.regular_market_price {
            prices.insert(quote.symbol, price);
        }
    }
    prices
}
