//! Rehabilitation programme recommender.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Lowest pain level on the questionnaire scale.
pub const MIN_PAIN_LEVEL: u8 = 1;
/// Highest pain level on the questionnaire scale.
pub const MAX_PAIN_LEVEL: u8 = 10;
/// Pain levels above this call for intensive care.
pub const INTENSIVE_CARE_PAIN_THRESHOLD: u8 = 7;

/// Self-rated mobility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mobility {
    Limited,
    Moderate,
    Good,
}

/// Error returned when a mobility rating is not one of the listed options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mobility rating '{0}'; expected Limited, Moderate, or Good")]
pub struct ParseMobilityError(String);

impl FromStr for Mobility {
    type Err = ParseMobilityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "limited" => Ok(Self::Limited),
            "moderate" => Ok(Self::Moderate),
            "good" => Ok(Self::Good),
            _ => Err(ParseMobilityError(value.to_owned())),
        }
    }
}

/// Questionnaire answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryAnswers {
    pain_level: u8,
    mobility: Mobility,
}

impl RecoveryAnswers {
    /// Record answers, clamping the pain level onto the 1-10 scale.
    pub fn new(pain_level: i64, mobility: Mobility) -> Self {
        let clamped = pain_level.clamp(i64::from(MIN_PAIN_LEVEL), i64::from(MAX_PAIN_LEVEL));
        Self {
            pain_level: u8::try_from(clamped).unwrap_or(MAX_PAIN_LEVEL),
            mobility,
        }
    }

    /// Pain level in `1..=10`.
    pub fn pain_level(&self) -> u8 {
        self.pain_level
    }

    /// Mobility rating.
    pub fn mobility(&self) -> Mobility {
        self.mobility
    }
}

/// Programme suggested for a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramRecommendation {
    IntensiveCare,
    ProgressiveMobility,
    AdvancedRecovery,
}

impl ProgramRecommendation {
    /// Programme title.
    pub const fn program(self) -> &'static str {
        match self {
            Self::IntensiveCare => "Intensive Care Program",
            Self::ProgressiveMobility => "Progressive Mobility Program",
            Self::AdvancedRecovery => "Advanced Recovery Program",
        }
    }

    /// One-sentence description of the programme.
    pub const fn description(self) -> &'static str {
        match self {
            Self::IntensiveCare => {
                "A carefully monitored program focusing on pain management and gradual mobility improvement."
            }
            Self::ProgressiveMobility => {
                "Structured program to improve mobility and strength with personalized exercises."
            }
            Self::AdvancedRecovery => {
                "Comprehensive program for active individuals focusing on performance optimization."
            }
        }
    }
}

impl fmt::Display for ProgramRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl Serialize for ProgramRecommendation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ProgramRecommendation", 2)?;
        state.serialize_field("program", self.program())?;
        state.serialize_field("description", self.description())?;
        state.end()
    }
}

/// Pick a programme: high pain first, then limited mobility.
pub fn recommend_program(answers: &RecoveryAnswers) -> ProgramRecommendation {
    if answers.pain_level() > INTENSIVE_CARE_PAIN_THRESHOLD {
        ProgramRecommendation::IntensiveCare
    } else if answers.mobility() == Mobility::Limited {
        ProgramRecommendation::ProgressiveMobility
    } else {
        ProgramRecommendation::AdvancedRecovery
    }
}
