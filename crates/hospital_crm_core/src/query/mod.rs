//! Query filter construction.
//!
//! # Responsibility
//! - Translate optional list parameters into a typed [`filter::Filter`].
//! - Keep SQL shape decisions out of callers.

pub mod filter;
pub mod list;
