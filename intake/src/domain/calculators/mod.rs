//! Stateless calculators behind the clinic's interactive widgets.
//!
//! None of these fail: numeric form input that does not parse is coerced
//! to zero before it gets here.

mod calories;
mod recommendation;

pub use calories::{CaloriesInput, CaloriesReport, FoodCalorieTable, KCAL_PER_KM, calories_report};
pub use recommendation::{
    INTENSIVE_CARE_PAIN_THRESHOLD, MAX_PAIN_LEVEL, MIN_PAIN_LEVEL, Mobility, ParseMobilityError,
    ProgramRecommendation, RecoveryAnswers, recommend_program,
};
