//! Pure indicator calculations over candle slices.

pub mod momentum;
pub mod trend;
pub mod volatility;
