//! Fingerprint-clock attendance engine.
//!
//! This crate recovers structured attendance records from the loosely formatted grid a
//! fingerprint clock exports, reconciles repeated uploads into one history per employee,
//! and derives holiday-aware business-day statistics from that history.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod extraction;
pub mod models;
pub mod reconciliation;
