//! Consultation calendar with simulated slot occupancy.
//!
//! Occupancy is not backed by real bookings. Each day's slots are drawn
//! from a generator seeded with the date, so a given day always shows the
//! same free and taken slots.

use chrono::{Datelike, Months, NaiveDate, NaiveTime, TimeDelta};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// How far ahead appointments can be booked.
pub const BOOKING_HORIZON_MONTHS: u32 = 2;
/// Share of slots shown as already booked.
pub const BOOKED_PROBABILITY: f64 = 0.3;

const FIRST_SLOT_HOUR: u32 = 9;
const SLOT_MINUTES: i64 = 30;
const SLOTS_PER_DAY: usize = 16;

/// Errors raised by [`AvailabilityCalendar`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Requested day is before today or past the booking horizon.
    #[error("{date} is outside the bookable window {first} to {last}")]
    OutsideWindow {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },
    /// The horizon cannot be represented in the calendar.
    #[error("booking window starting {today} overflows the calendar")]
    WindowOverflow { today: NaiveDate },
}

/// A half-hour consultation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(serialize_with = "serialize_hour_minute")]
    time: NaiveTime,
    booked: bool,
}

impl TimeSlot {
    /// Start time of the slot.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Whether the slot is already taken.
    pub fn is_booked(&self) -> bool {
        self.booked
    }

    /// `HH:MM` label shown on the slot button.
    pub fn label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

fn serialize_hour_minute<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// Bookable days and their slots as seen from `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityCalendar {
    first: NaiveDate,
    last: NaiveDate,
}

impl AvailabilityCalendar {
    /// Calendar open from `today` through the same day two months later.
    ///
    /// Month ends clamp, so 31 December opens through 28 or 29 February.
    pub fn new(today: NaiveDate) -> Result<Self, ScheduleError> {
        let last = today
            .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
            .ok_or(ScheduleError::WindowOverflow { today })?;
        Ok(Self { first: today, last })
    }

    /// First bookable day.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last bookable day.
    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// Whether `date` can be booked.
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.first..=self.last).contains(&date)
    }

    /// Slots for `date`, from 09:00 to 16:30.
    pub fn slots_for(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, ScheduleError> {
        if !self.contains(date) {
            return Err(ScheduleError::OutsideWindow {
                date,
                first: self.first,
                last: self.last,
            });
        }

        let mut rng = SmallRng::seed_from_u64(u64::from(date.num_days_from_ce().unsigned_abs()));
        let opening = NaiveTime::from_hms_opt(FIRST_SLOT_HOUR, 0, 0).unwrap_or_default();
        Ok((0..SLOTS_PER_DAY)
            .scan(opening, |time, _| {
                let slot = TimeSlot {
                    time: *time,
                    booked: rng.gen_bool(BOOKED_PROBABILITY),
                };
                *time += TimeDelta::minutes(SLOT_MINUTES);
                Some(slot)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[fixture]
    fn calendar() -> AvailabilityCalendar {
        AvailabilityCalendar::new(date(2026, 2, 24)).expect("calendar")
    }

    #[rstest]
    fn window_spans_two_calendar_months(calendar: AvailabilityCalendar) {
        assert_eq!(calendar.first_day(), date(2026, 2, 24));
        assert_eq!(calendar.last_day(), date(2026, 4, 24));
    }

    #[rstest]
    fn month_ends_clamp() {
        let calendar = AvailabilityCalendar::new(date(2025, 12, 31)).expect("calendar");
        assert_eq!(calendar.last_day(), date(2026, 2, 28));
    }

    #[rstest]
    fn day_has_sixteen_half_hour_slots(calendar: AvailabilityCalendar) {
        let slots = calendar.slots_for(date(2026, 3, 3)).expect("slots");

        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0].label(), "09:00");
        assert_eq!(slots[1].label(), "09:30");
        assert_eq!(slots[15].label(), "16:30");
    }

    #[rstest]
    fn occupancy_is_stable_per_day(calendar: AvailabilityCalendar) {
        let day = date(2026, 3, 10);
        let first = calendar.slots_for(day).expect("slots");
        let again = calendar.slots_for(day).expect("slots");
        assert_eq!(first, again);
    }

    #[rstest]
    fn roughly_thirty_percent_of_slots_are_booked(calendar: AvailabilityCalendar) {
        let mut day = calendar.first_day();
        let (mut booked, mut total) = (0_u32, 0_u32);
        while day <= calendar.last_day() {
            for slot in calendar.slots_for(day).expect("slots") {
                total += 1;
                booked += u32::from(slot.is_booked());
            }
            day = day.succ_opt().expect("next day");
        }
        let share = f64::from(booked) / f64::from(total);
        assert!((0.2..0.4).contains(&share), "booked share {share}");
    }

    #[rstest]
    #[case(date(2026, 2, 24), true)]
    #[case(date(2026, 4, 24), true)]
    #[case(date(2026, 2, 23), false)]
    #[case(date(2026, 4, 25), false)]
    fn window_bounds_are_inclusive(
        calendar: AvailabilityCalendar,
        #[case] day: NaiveDate,
        #[case] bookable: bool,
    ) {
        assert_eq!(calendar.slots_for(day).is_ok(), bookable);
    }

    #[rstest]
    fn rejection_names_the_window(calendar: AvailabilityCalendar) {
        let error = calendar
            .slots_for(date(2026, 5, 1))
            .expect_err("outside window");
        assert_eq!(
            error.to_string(),
            "2026-05-01 is outside the bookable window 2026-02-24 to 2026-04-24"
        );
    }

    #[rstest]
    fn slots_serialise_with_short_times(calendar: AvailabilityCalendar) {
        let slots = calendar.slots_for(date(2026, 3, 3)).expect("slots");
        let value = serde_json::to_value(slots[0]).expect("serialise");
        assert_eq!(value["time"], "09:00");
        assert!(value["booked"].is_boolean());
    }
}
