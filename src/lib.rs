//! Attendance aggregation and reporting engine
//!
//! This crate turns raw check-in/check-out sessions, an effective-dated
//! commitment schedule and a holiday/off-day calendar into per-day and
//! per-range worked, committed, overtime and shortfall statistics.
//!
//! Around the pure engine in [`calculation`] it provides the session-creation
//! boundary ([`tracking`]), an offline write queue ([`sync`]), YAML settings
//! ([`config`]) and an axum HTTP surface ([`api`]).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod sync;
pub mod tracking;
