//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{HrError, HrResult};

use super::types::PayrollPolicy;

/// Name of the policy file inside the configuration directory.
pub const POLICY_FILE: &str = "policy.yaml";

/// Loads and provides access to the payroll policy.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── policy.yaml   # Overtime rate, deduction rate, late cutoff, year range
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Overtime rate: {}", loader.policy().overtime_rate);
/// # Ok::<(), hr_payroll::error::HrError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: PayrollPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing, is not valid YAML, or
    /// holds values that fail [`PayrollPolicy::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> HrResult<Self> {
        let policy_path = path.as_ref().join(POLICY_FILE);
        let policy = Self::load_yaml::<PayrollPolicy>(&policy_path)?;
        policy.validate()?;
        tracing::debug!(path = %policy_path.display(), "Loaded payroll policy");
        Ok(Self { policy })
    }

    /// Wraps an already-built policy.
    pub fn from_policy(policy: PayrollPolicy) -> Self {
        Self { policy }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> HrResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| HrError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }
}
