//! Migration run states
//!
//! A run moves linearly `Start → Analyzed → Classified → Rewritten → Done`.
//! A run whose target call is missing or ambiguous ends early with
//! `Analyzed → Done`. There are no retries and no way back.

use crate::error::MigrateError;

/// Stage of a migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationState {
    /// Nothing parsed yet
    Start,
    /// Target call located (or found missing)
    Analyzed,
    /// Keywords partitioned into migrated / opaque / unrecognized
    Classified,
    /// Document updated and call rewritten
    Rewritten,
    /// Result handed to the caller
    Done,
}

/// Validates a state transition.
///
/// # Errors
/// Returns `MigrateError::InvalidTransition` if `to` is not reachable from
/// `from` in one step.
pub fn validate_transition(from: MigrationState, to: MigrationState) -> Result<(), MigrateError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(MigrateError::InvalidTransition { from, to })
    }
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: MigrationState) -> &'static [MigrationState] {
    use MigrationState::{Analyzed, Classified, Done, Rewritten, Start};
    match from {
        Start => &[Analyzed],
        Analyzed => &[Classified, Done],
        Classified => &[Rewritten],
        Rewritten => &[Done],
        Done => &[],
    }
}

/// Tracks the current state of one run
#[derive(Debug)]
pub(crate) struct StateTracker {
    state: MigrationState,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: MigrationState::Start,
        }
    }

    pub(crate) fn advance(&mut self, to: MigrationState) -> Result<(), MigrateError> {
        validate_transition(self.state, to)?;
        tracing::trace!(from = ?self.state, to = ?to, "migration state");
        self.state = to;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> MigrationState {
        self.state
    }
}
