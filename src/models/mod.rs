//! Shared data models spanning the service layers.

pub mod account;
pub mod decision;
pub mod indicators;
pub mod snapshot;

pub use account::{Account, AccountState, Order, OrderRequest, OrderSide, Position};
pub use decision::Decision;
pub use indicators::{RsiSeries, SmaSeries};
pub use snapshot::StockSnapshot;
