//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `serde_json`).
//! Keep it lean: no I/O, networking, or locking, just data and simple helpers.
//!
//! `OpenAPI` schemas are derived only when the `server` feature is enabled.

pub mod character;
pub mod config;
pub mod constants;
