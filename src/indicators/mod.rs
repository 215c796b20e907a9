//! Indicator compilation: turning raw SMA/RSI series into per-symbol
//! crossover summaries.

pub mod crossover;

pub use crossover::{compile_snapshot, CrossoverDirection, CrossoverEvent};
