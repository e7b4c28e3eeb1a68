//! Mudawama core — progress rollups for adaptive study plans.
//!
//! Everything here is a pure, synchronous function over explicit inputs:
//! the caller supplies materialized projects, activities, and a "now"
//! timestamp on every call, and gets plain data back. No I/O, no hidden
//! globals, no implicit timezone — which keeps the same arithmetic shared
//! between the dashboard, performance, and plan-viewer callers instead of
//! each reimplementing it.

pub mod aggregate;
pub mod config;
pub mod due;
pub mod error;
pub mod milestone;
pub mod model;
pub mod overview;
pub mod rollup;
pub mod streak;
pub mod timewindow;

pub use error::{MudawamaError, Result};
