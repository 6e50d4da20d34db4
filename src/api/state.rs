//! Application state for the HR payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::access::{Actor, Capability};
use crate::clock::{Clock, SystemClock};
use crate::config::ConfigLoader;
use crate::error::HrResult;
use crate::services::{AttendanceLedger, EmployeeDirectory, PayrollBook, PayrollGenerator};
use crate::store::HrStore;

struct Services {
    clock: Arc<dyn Clock>,
    store: Arc<HrStore>,
    ledger: AttendanceLedger,
    generator: PayrollGenerator,
    payrolls: PayrollBook,
    directory: EmployeeDirectory,
}

/// Shared application state.
///
/// Holds the store, the clock and the services built over them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Services>,
}

impl AppState {
    /// Creates state with an empty store and the system clock.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates state with an empty store and the given clock.
    pub fn with_clock(config: ConfigLoader, clock: Arc<dyn Clock>) -> Self {
        Self::with_parts(config, Arc::new(HrStore::new()), clock)
    }

    /// Creates state over an existing store.
    pub fn with_parts(config: ConfigLoader, store: Arc<HrStore>, clock: Arc<dyn Clock>) -> Self {
        let policy = config.policy().clone();
        let services = Services {
            ledger: AttendanceLedger::new(Arc::clone(&store), Arc::clone(&clock), policy.clone()),
            generator: PayrollGenerator::new(Arc::clone(&store), policy.clone()),
            payrolls: PayrollBook::new(Arc::clone(&store), Arc::clone(&clock), policy),
            directory: EmployeeDirectory::new(Arc::clone(&store), Arc::clone(&clock)),
            clock,
            store,
        };
        Self {
            inner: Arc::new(services),
        }
    }

    /// Resolves what `actor` may do, based on their role and linked profile.
    pub fn capability(&self, actor: &Actor) -> HrResult<Capability> {
        let linked = self.inner.directory.linked_employee(actor.user_id);
        Capability::resolve(actor, linked.map(|e| e.id))
    }

    /// Returns the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Returns the store.
    pub fn store(&self) -> &Arc<HrStore> {
        &self.inner.store
    }

    /// Returns the attendance ledger.
    pub fn ledger(&self) -> &AttendanceLedger {
        &self.inner.ledger
    }

    /// Returns the payroll generator.
    pub fn generator(&self) -> &PayrollGenerator {
        &self.inner.generator
    }

    /// Returns the payroll book.
    pub fn payrolls(&self) -> &PayrollBook {
        &self.inner.payrolls
    }

    /// Returns the employee directory.
    pub fn directory(&self) -> &EmployeeDirectory {
        &self.inner.directory
    }
}
