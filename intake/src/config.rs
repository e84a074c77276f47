//! Intake configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use clinic_reference::{ReferenceData, ReferenceError};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{SubmissionPolicy, ValidationStrategy};

/// Settings for the intake flows, read from `CLINIC_INTAKE_*` variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLINIC_INTAKE")]
pub struct IntakeSettings {
    /// Simulated latency of the email uniqueness check, in milliseconds.
    #[ortho_config(default = 1000)]
    pub email_check_delay_ms: u64,
    /// Age used for booking discounts when the form has no birth date.
    #[ortho_config(default = 30)]
    pub default_booking_age: u32,
    /// Report only the first failing field instead of all of them.
    pub short_circuit: Option<bool>,
    /// Reference catalogue replacing the bundled one.
    pub reference_path: Option<PathBuf>,
}

impl IntakeSettings {
    /// Simulated email-check latency.
    pub fn email_check_delay(&self) -> Duration {
        Duration::from_millis(self.email_check_delay_ms)
    }

    /// Validation strategy selected by `short_circuit`.
    pub fn strategy(&self) -> ValidationStrategy {
        if self.short_circuit.unwrap_or(false) {
            ValidationStrategy::ShortCircuit
        } else {
            ValidationStrategy::Accumulate
        }
    }

    /// Submission policy derived from these settings.
    pub fn policy(&self) -> SubmissionPolicy {
        SubmissionPolicy {
            strategy: self.strategy(),
            default_booking_age: self.default_booking_age,
        }
    }

    /// Load the configured reference catalogue, or the bundled one.
    pub fn load_reference(&self) -> Result<ReferenceData, ReferenceError> {
        match &self.reference_path {
            Some(path) => ReferenceData::from_file(path),
            None => ReferenceData::bundled(),
        }
    }
}
