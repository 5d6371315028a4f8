//! Framework-agnostic dealership operations.
//!
//! Everything here works on a `DatabaseConnection` or on plain entity models; the web
//! layer only translates requests into these calls.

pub mod activity;
pub mod appointment;
pub mod catalog;
pub mod offer;
pub mod order;
pub mod record;
pub mod review;
pub mod vehicle;
