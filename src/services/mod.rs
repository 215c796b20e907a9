//! External collaborators: market data, brokerage, notifications, and the
//! scan throttle that paces market-data calls.

pub mod brokerage;
pub mod market_data;
pub mod notify;
pub mod throttle;

pub use brokerage::{AlpacaBrokerage, Brokerage};
pub use market_data::{AlphaVantageClient, MarketData};
pub use notify::{Notifier, RestNotifier};
pub use throttle::ScanThrottle;
