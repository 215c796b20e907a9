//! Core application primitives (HTTP surface, trading orchestrator)

pub mod http;
pub mod orchestrator;

pub use http::*;
pub use orchestrator::*;
