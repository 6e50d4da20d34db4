//! Caller roles and capability checks.
//!
//! Every operation that depends on who is calling takes a [`Capability`]
//! resolved once per request. HR staff and administrators hold
//! [`Capability::Full`]; individual contributors hold
//! [`Capability::SelfOnly`] scoped to their own employee profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// The role of an authenticated user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System administrator.
    Admin,
    /// Human resources staff.
    Hrd,
    /// Individual contributor.
    Employee,
}

impl Role {
    /// Returns true for roles with full HR access.
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Admin | Role::Hrd)
    }

    /// Returns the lowercase role name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hrd => "hrd",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "hrd" => Ok(Role::Hrd),
            "employee" => Ok(Role::Employee),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The user account id.
    pub user_id: u64,
    /// The account's role.
    pub role: Role,
}

/// What a caller may see and change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read and write access to every record.
    Full,
    /// Access limited to the caller's own employee records.
    SelfOnly {
        /// The caller's employee profile.
        employee_id: u64,
    },
}

impl Capability {
    /// Resolves the capability of `actor`.
    ///
    /// `linked_employee` is the employee profile linked to the actor's user
    /// account, if any. Unprivileged callers without a profile are rejected
    /// with [`HrError::NotLinkedToEmployee`].
    ///
    /// # Example
    ///
    /// ```
    /// use hr_payroll::access::{Actor, Capability, Role};
    ///
    /// let hr = Actor { user_id: 1, role: Role::Hrd };
    /// assert_eq!(Capability::resolve(&hr, None).unwrap(), Capability::Full);
    ///
    /// let staff = Actor { user_id: 2, role: Role::Employee };
    /// assert_eq!(
    ///     Capability::resolve(&staff, Some(7)).unwrap(),
    ///     Capability::SelfOnly { employee_id: 7 }
    /// );
    /// assert!(Capability::resolve(&staff, None).is_err());
    /// ```
    pub fn resolve(actor: &Actor, linked_employee: Option<u64>) -> HrResult<Self> {
        if actor.role.is_privileged() {
            return Ok(Capability::Full);
        }
        linked_employee
            .map(|employee_id| Capability::SelfOnly { employee_id })
            .ok_or(HrError::NotLinkedToEmployee {
                user_id: actor.user_id,
            })
    }

    /// Fails with [`HrError::Forbidden`] unless the capability is full.
    pub fn require_full(&self, action: &str) -> HrResult<()> {
        match self {
            Capability::Full => Ok(()),
            Capability::SelfOnly { .. } => Err(HrError::Forbidden {
                action: action.to_string(),
            }),
        }
    }

    /// Returns true if records of `employee_id` are visible.
    pub fn can_view(&self, employee_id: u64) -> bool {
        match self {
            Capability::Full => true,
            Capability::SelfOnly { employee_id: own } => *own == employee_id,
        }
    }

    /// Fails with [`HrError::Forbidden`] unless records of `employee_id` are visible.
    pub fn require_view(&self, employee_id: u64, action: &str) -> HrResult<()> {
        if self.can_view(employee_id) {
            Ok(())
        } else {
            Err(HrError::Forbidden {
                action: action.to_string(),
            })
        }
    }

    /// Narrows a requested employee filter to what the capability may see.
    ///
    /// Self-only callers are always pinned to their own profile; a filter
    /// naming another employee is ignored, matching how listings behave.
    pub fn scope(&self, requested: Option<u64>) -> Option<u64> {
        match self {
            Capability::Full => requested,
            Capability::SelfOnly { employee_id } => Some(*employee_id),
        }
    }
}
