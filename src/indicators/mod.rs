// Technical indicators module
// Provides calculation functions for the indicators served by the API

pub mod moving_averages;
pub mod rsi;

pub use moving_averages::SMA;
pub use rsi::RSI;
