//! Attendance ledger and monthly payroll engine for HR administration.
//!
//! This crate records daily employee attendance, turns a month of attendance
//! into a payroll line (overtime detection, gross and net salary), and
//! generates payroll for the whole active workforce idempotently. An axum
//! router exposes the operations over HTTP.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
