//! Per-visitor intake session state.
//!
//! A session counts completed submissions for the "patients served" display
//! and guards against a second registration while an email check is still
//! in flight.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// State shared by every submission made from one visitor session.
#[derive(Debug, Default)]
pub struct IntakeSession {
    completed: AtomicU64,
    pending_check: AtomicBool,
}

impl IntakeSession {
    /// Fresh session with no completed submissions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submissions that reached `Completed`.
    pub fn completed_submissions(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Count one completed submission and return the new total.
    pub fn record_completion(&self) -> u64 {
        self.completed.fetch_add(1, Ordering::Relaxed).saturating_add(1)
    }

    /// Whether an email uniqueness check is in flight.
    pub fn is_check_pending(&self) -> bool {
        self.pending_check.load(Ordering::Acquire)
    }

    /// Claim the session's single email-check slot.
    ///
    /// Returns `None` while another check holds it. The slot is released
    /// when the returned guard drops.
    pub fn begin_email_check(&self) -> Option<PendingCheckGuard<'_>> {
        self.pending_check
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingCheckGuard { session: self })
    }
}

/// Holds the pending email-check slot of an [`IntakeSession`].
#[derive(Debug)]
#[must_use = "the check slot is released as soon as the guard drops"]
pub struct PendingCheckGuard<'a> {
    session: &'a IntakeSession,
}

impl Drop for PendingCheckGuard<'_> {
    fn drop(&mut self) {
        self.session.pending_check.store(false, Ordering::Release);
    }
}
