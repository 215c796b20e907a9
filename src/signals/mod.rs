//! Buy/sell policy: eligibility predicates and candidate selection.

pub mod eligibility;
pub mod selector;

pub use eligibility::{able_to_buy, able_to_sell, can_buy_stock, should_sell_stock};
pub use selector::select_buy_candidate;
