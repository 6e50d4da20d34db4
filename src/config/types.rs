//! Configuration types for payroll policy.
//!
//! This module contains the strongly-typed policy structure that is
//! deserialized from the YAML configuration file.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::default_late_cutoff;
use crate::error::{HrError, HrResult};
use crate::models::Period;

/// Default overtime pay per hour, in currency units.
pub const DEFAULT_OVERTIME_RATE: Decimal = Decimal::from_parts(25_000, 0, 0, false, 0);

/// Default deduction rate applied to gross salary (5%).
pub const DEFAULT_DEDUCTION_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Default standard working hours per attended day.
pub const DEFAULT_STANDARD_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Flat-rate payroll and attendance policy.
///
/// Every field has a default, so a partial policy file only needs the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayrollPolicy {
    /// Pay per overtime hour for generated payroll.
    pub overtime_rate: Decimal,
    /// Fraction of gross salary withheld as deductions for generated payroll.
    pub deduction_rate: Decimal,
    /// Non-overtime hours per attended day.
    pub standard_hours_per_day: Decimal,
    /// Check-ins strictly after this time of day are late.
    pub late_cutoff: NaiveTime,
    /// Earliest payroll year accepted.
    pub min_year: i32,
    /// Latest payroll year accepted.
    pub max_year: i32,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            overtime_rate: DEFAULT_OVERTIME_RATE,
            deduction_rate: DEFAULT_DEDUCTION_RATE,
            standard_hours_per_day: DEFAULT_STANDARD_HOURS_PER_DAY,
            late_cutoff: default_late_cutoff(),
            min_year: 2020,
            max_year: 2030,
        }
    }
}

impl PayrollPolicy {
    /// Validates a (year, month) pair against the accepted payroll range.
    ///
    /// # Example
    ///
    /// ```
    /// use hr_payroll::config::PayrollPolicy;
    ///
    /// let policy = PayrollPolicy::default();
    /// assert!(policy.period(2025, 6).is_ok());
    /// assert!(policy.period(2019, 6).is_err());
    /// assert!(policy.period(2025, 13).is_err());
    /// ```
    pub fn period(&self, year: i32, month: u32) -> HrResult<Period> {
        if year < self.min_year || year > self.max_year {
            return Err(HrError::InvalidPeriod { year, month });
        }
        Period::new(year, month)
    }

    /// Checks that the policy values are usable.
    pub fn validate(&self) -> HrResult<()> {
        let non_negative = [
            ("overtime_rate", self.overtime_rate),
            ("deduction_rate", self.deduction_rate),
            ("standard_hours_per_day", self.standard_hours_per_day),
        ];
        for (field, value) in non_negative {
            if value.is_sign_negative() {
                return Err(HrError::InvalidAmount {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        if self.deduction_rate > Decimal::ONE {
            return Err(HrError::InvalidAmount {
                field: "deduction_rate".to_string(),
                message: "must not exceed 1".to_string(),
            });
        }
        if self.min_year > self.max_year {
            return Err(HrError::InvalidAmount {
                field: "min_year".to_string(),
                message: format!("{} is after max_year {}", self.min_year, self.max_year),
            });
        }
        Ok(())
    }
}
