//! Payroll engine for Greek private-sector contracts
//!
//! This crate turns logged work hours (regular, overtime, night and holiday)
//! and a contract's pay structure (hourly, daily or monthly base with
//! overtime and night multipliers) into gross daily wages and monthly
//! salary summaries, and serves them over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
