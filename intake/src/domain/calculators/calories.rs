//! Walking-versus-food calorie balance.

use std::collections::BTreeMap;

use clinic_reference::ReferenceData;
use serde::Serialize;

/// Kilocalories an average adult burns per kilometre walked.
pub const KCAL_PER_KM: f64 = 60.0;

/// Per-unit calories for the foods the calculator offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodCalorieTable {
    per_unit: BTreeMap<String, u32>,
}

impl FoodCalorieTable {
    /// Build from `(food, kcal per unit)` pairs.
    pub fn new<K: Into<String>>(entries: impl IntoIterator<Item = (K, u32)>) -> Self {
        Self {
            per_unit: entries
                .into_iter()
                .map(|(key, calories)| (key.into(), calories))
                .collect(),
        }
    }

    /// Table from the reference catalogue's food list.
    pub fn from_reference(reference: &ReferenceData) -> Self {
        Self::new(
            reference
                .foods()
                .iter()
                .map(|food| (food.key(), food.calories())),
        )
    }

    /// Calories in one unit of `food`; unknown foods count as zero.
    pub fn calories_for(&self, food: &str) -> u32 {
        self.per_unit.get(food).copied().unwrap_or(0)
    }

    /// Known food keys in sorted order.
    pub fn foods(&self) -> impl Iterator<Item = &str> {
        self.per_unit.keys().map(String::as_str)
    }
}

/// Calculator inputs after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct CaloriesInput {
    /// Kilometres walked; never negative.
    pub distance_km: f64,
    /// Food key from the table.
    pub food: String,
    /// Units eaten.
    pub quantity: u32,
}

impl CaloriesInput {
    /// Build from numeric values, clamping what cannot be walked or eaten.
    pub fn new(distance_km: f64, food: impl Into<String>, quantity: i64) -> Self {
        let distance_km = if distance_km.is_finite() && distance_km > 0.0 {
            distance_km
        } else {
            0.0
        };
        Self {
            distance_km,
            food: food.into(),
            quantity: u32::try_from(quantity.max(0)).unwrap_or(u32::MAX),
        }
    }

    /// Build from raw form text; unparsable numbers become zero.
    pub fn from_form(distance: &str, food: impl Into<String>, quantity: &str) -> Self {
        Self::new(
            distance.trim().parse().unwrap_or(0.0),
            food,
            quantity.trim().parse().unwrap_or(0),
        )
    }
}

/// Calorie balance shown below the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaloriesReport {
    pub consumed: u64,
    pub burned: f64,
    /// Further walking needed to burn off the surplus.
    pub additional_km: f64,
    /// Share of the consumed calories already burned, capped at 100.
    pub progress_percent: f64,
}

/// Compare calories burned walking with calories eaten.
///
/// # Examples
/// ```
/// use clinic_intake::domain::calculators::{CaloriesInput, FoodCalorieTable, calories_report};
///
/// let table = FoodCalorieTable::new([("burger", 354)]);
/// let report = calories_report(&table, &CaloriesInput::new(3.0, "burger", 1));
/// assert_eq!(report.consumed, 354);
/// assert_eq!(report.burned, 180.0);
/// assert_eq!(report.additional_km, 2.9);
/// ```
pub fn calories_report(table: &FoodCalorieTable, input: &CaloriesInput) -> CaloriesReport {
    let per_unit = table.calories_for(&input.food);
    let consumed = u64::from(per_unit) * u64::from(input.quantity);
    let consumed_f = f64::from(per_unit) * f64::from(input.quantity);
    let burned = input.distance_km * KCAL_PER_KM;

    let additional_km = ((consumed_f - burned).max(0.0) / KCAL_PER_KM * 10.0).round() / 10.0;
    let progress_percent = if consumed == 0 {
        100.0
    } else {
        (burned / consumed_f * 100.0).min(100.0)
    };

    CaloriesReport {
        consumed,
        burned,
        additional_km,
        progress_percent,
    }
}
