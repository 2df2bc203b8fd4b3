//! Album type query fragments.
//!
//! # Responsibility
//! - Build `?type=...` fragments from filter control state.
//! - Parse those fragments back into typed filters.

pub mod builder;
pub mod parse;
