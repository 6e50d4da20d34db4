//! Configuration loading and management for the HR payroll engine.
//!
//! This module loads the flat-rate payroll policy (overtime rate, deduction
//! rate, standard hours, late cutoff and accepted year range) from YAML.
//!
//! # Example
//!
//! ```no_run
//! use hr_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Deduction rate: {}", config.policy().deduction_rate);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, POLICY_FILE};
pub use types::{
    DEFAULT_DEDUCTION_RATE, DEFAULT_OVERTIME_RATE, DEFAULT_STANDARD_HOURS_PER_DAY, PayrollPolicy,
};
