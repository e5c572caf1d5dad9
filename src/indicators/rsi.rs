/// Relative Strength Index (RSI)
/// Measures momentum by comparing magnitude of recent gains to recent losses
/// Returns values between 0-100:
/// - Below 30: Oversold (potentially undervalued)
/// - Above 70: Overbought (potentially overvalued)
pub struct RSI {
    period: usize,
}

impl RSI {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculate RSI for a price series using a simple trailing mean of
    /// gains and losses.
    /// Returns a vector of the same length as input.
    /// First (period) values will be NaN (warmup period). A point whose
    /// trailing window has zero average loss is also NaN: the gain/loss
    /// ratio is undefined there, so the value is treated as missing
    /// rather than pinned to 100.
    pub fn calculate(&self, prices: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; prices.len()];

        if prices.len() < self.period + 1 {
            return result;
        }

        // gains[i] / losses[i] hold the move into prices[i]; there is no
        // move into prices[0], so index 0 stays zero and is never used.
        let mut gains = vec![0.0; prices.len()];
        let mut losses = vec![0.0; prices.len()];

        for i in 1..prices.len() {
            let change = prices[i] - prices[i - 1];
            if change > 0.0 {
                gains[i] = change;
            } else {
                losses[i] = -change;
            }
        }

        // The first full window ends at index `period`: it must cover
        // `period` defined moves, starting with the move into prices[1].
        for i in self.period..prices.len() {
            let window_start = i + 1 - self.period;
            let avg_gain: f64 =
                gains[window_start..=i].iter().sum::<f64>() / self.period as f64;
            let avg_loss: f64 =
                losses[window_start..=i].iter().sum::<f64>() / self.period as f64;

            if avg_loss == 0.0 {
                continue;
            }

            let rs = avg_gain / avg_loss;
            result[i] = 100.0 - (100.0 / (1.0 + rs));
        }

        result
    }
}
