//! Operation state coordinator: typed per-operation states driving UI
//! enablement.
//!
//! Each of the three operations (generate, export, share) owns an explicit
//! state value transitioned only through [`Coordinator::begin`] and the
//! returned [`OpGuard`]. The guard clears `InProgress` on drop, so a thrown
//! or early-returning operation can never leave its flag stuck: the
//! "clear the loading flag on every exit path" invariant is enforced by
//! resource scoping rather than convention. Re-triggering an in-flight
//! operation is rejected at the trigger site; this is advisory mutual
//! exclusion for a single-user interface, not a hard lock.

use std::sync::{Arc, Mutex};

use crate::{Error, Result};

/// State of one asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpState {
    Idle,
    InProgress,
    Failed(String),
    Succeeded,
}

/// The three independent pipeline operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Export,
    Share,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Generate => "generate",
            Operation::Export => "export",
            Operation::Share => "share",
        }
    }
}

type Slot = Arc<Mutex<OpState>>;

/// Owns the state of all three operations.
pub struct Coordinator {
    generate: Slot,
    export: Slot,
    share: Slot,
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            generate: Arc::new(Mutex::new(OpState::Idle)),
            export: Arc::new(Mutex::new(OpState::Idle)),
            share: Arc::new(Mutex::new(OpState::Idle)),
        }
    }

    fn slot(&self, op: Operation) -> &Slot {
        match op {
            Operation::Generate => &self.generate,
            Operation::Export => &self.export,
            Operation::Share => &self.share,
        }
    }

    /// Current state of `op`.
    pub fn state(&self, op: Operation) -> OpState {
        self.slot(op)
            .lock()
            .map(|s| s.clone())
            .unwrap_or(OpState::Idle)
    }

    /// Whether `op` is currently in flight (drives UI disablement).
    pub fn is_in_progress(&self, op: Operation) -> bool {
        self.state(op) == OpState::InProgress
    }

    /// Enter `op`, flipping it to `InProgress` before any asynchronous work
    /// begins. Rejected with [`Error::Busy`] while a previous entry is still
    /// in flight.
    pub fn begin(&self, op: Operation) -> Result<OpGuard> {
        let slot = self.slot(op);
        let mut state = slot
            .lock()
            .map_err(|_| Error::Other(format!("{} state poisoned", op.name())))?;
        if *state == OpState::InProgress {
            return Err(Error::Busy(op.name()));
        }
        *state = OpState::InProgress;
        Ok(OpGuard { slot: Arc::clone(slot), outcome: None })
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped entry into one operation. Dropping the guard without recording an
/// outcome resets the operation to `Idle`, so cleanup runs on panic and
/// early return alike.
#[derive(Debug)]
pub struct OpGuard {
    slot: Slot,
    outcome: Option<OpState>,
}

impl OpGuard {
    /// Record a successful completion.
    pub fn succeed(mut self) {
        self.outcome = Some(OpState::Succeeded);
    }

    /// Record a failure with its reason.
    pub fn fail(mut self, reason: impl Into<String>) {
        self.outcome = Some(OpState::Failed(reason.into()));
    }
}

impl Drop for OpGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.slot.lock() {
            *state = self.outcome.take().unwrap_or(OpState::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_marks_in_progress_and_rejects_reentry() {
        let coordinator = Coordinator::new();
        let guard = coordinator.begin(Operation::Export).expect("begin export");
        assert!(coordinator.is_in_progress(Operation::Export));

        let err = coordinator.begin(Operation::Export).unwrap_err();
        assert!(matches!(err, Error::Busy("export")));

        // Other operations stay independent.
        assert!(coordinator.begin(Operation::Share).is_ok());
        drop(guard);
    }

    #[test]
    fn succeed_and_fail_record_outcomes() {
        let coordinator = Coordinator::new();
        coordinator.begin(Operation::Generate).expect("begin").succeed();
        assert_eq!(coordinator.state(Operation::Generate), OpState::Succeeded);

        coordinator
            .begin(Operation::Generate)
            .expect("begin again")
            .fail("rate limited");
        assert_eq!(
            coordinator.state(Operation::Generate),
            OpState::Failed("rate limited".to_string())
        );
    }

    #[test]
    fn dropped_guard_resets_to_idle() {
        let coordinator = Coordinator::new();
        {
            let _guard = coordinator.begin(Operation::Share).expect("begin");
            assert!(coordinator.is_in_progress(Operation::Share));
        }
        assert_eq!(coordinator.state(Operation::Share), OpState::Idle);
    }

    #[test]
    fn guard_clears_flag_on_panic() {
        let coordinator = Coordinator::new();
        let slot_check = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = coordinator.begin(Operation::Export).expect("begin");
            panic!("mid-operation failure");
        }));
        assert!(slot_check.is_err());
        assert_eq!(coordinator.state(Operation::Export), OpState::Idle);
    }

    #[test]
    fn failed_operation_can_be_retriggered() {
        let coordinator = Coordinator::new();
        coordinator.begin(Operation::Share).expect("begin").fail("offline");
        assert!(!coordinator.is_in_progress(Operation::Share));
        assert!(coordinator.begin(Operation::Share).is_ok());
    }
}
