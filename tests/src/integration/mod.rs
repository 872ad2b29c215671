//! Multi-operation scenarios.

pub mod concurrency;
pub mod flows;
