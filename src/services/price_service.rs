use crate::api_client::{ApiClient, ApiError};
use crate::models::round2;
use std::collections::HashMap;

/// Latest close price for each requested ticker, fetched in one batched
/// provider request. Tickers the provider cannot answer for map to
/// `None`; one bad symbol never fails the rest of the batch.
pub async fn get_prices(
    api: &ApiClient,
    tickers: &str,
) -> Result<HashMap<String, Option<f64>>, ApiError> {
    // Symbols are used exactly as given: no trimming, no dedup
    let requested: Vec<&str> = tickers.split(',').collect();
    let quotes = api.fetch_latest_quotes(&requested).await?;
    tracing::info!(
        "Fetched quotes for {} of {} requested tickers",
        quotes.len(),
        requested.len()
    );

    Ok(collect_prices(&requested, &quotes))
}

/// Per-ticker independent lookup into the normalized quote map.
fn collect_prices(
    requested: &[&str],
    quotes: &HashMap<String, f64>,
) -> HashMap<String, Option<f64>> {
    let mut results = HashMap::new();
    for &ticker in requested {
        let price = quotes.get(ticker).map(|&price| round2(price));
        results.insert(ticker.to_string(), price);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_prices_with_missing_ticker() {
        let mut quotes = HashMap::new();
        quotes.insert("AAA".to_string(), 123.456);
        quotes.insert("BBB".to_string(), 45.0);

        let results = collect_prices(&["AAA", "BBB", "ZZZ"], &quotes);

        assert_eq!(results.len(), 3);
        assert_eq!(results["AAA"], Some(123.46));
        assert_eq!(results["BBB"], Some(45.0));
        assert_eq!(results["ZZZ"], None);
    }

    #[test]
    fn test_collect_prices_keeps_symbols_as_given() {
        let mut quotes = HashMap::new();
        quotes.insert("AAPL".to_string(), 187.5);

        // A lowercase request does not match the provider's symbol and
        // degrades to null, like any other missing ticker
        let results = collect_prices(&["aapl", " AAPL"], &quotes);

        assert_eq!(results["aapl"], None);
        assert_eq!(results[" AAPL"], None);
        assert!(!results.contains_key("AAPL"));
    }

    #[test]
    fn test_collect_prices_all_found() {
        let mut quotes = HashMap::new();
        quotes.insert("MSFT".to_string(), 415.266);
        quotes.insert("GOOG".to_string(), 170.634);

        let results = collect_prices(&["MSFT", "GOOG"], &quotes);

        assert_eq!(results["MSFT"], Some(415.27));
        assert_eq!(results["GOOG"], Some(170.63));
    }
}
