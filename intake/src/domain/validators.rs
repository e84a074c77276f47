//! Field format predicates.
//!
//! Every predicate answers a single yes/no question about a raw form value.
//! Pairing a failed check with a user-facing message is the job of
//! [`crate::domain::validation`].

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Minimum age, in whole years, accepted by the registration form.
pub const MINIMUM_REGISTRATION_AGE: u32 = 18;

/// Symbols a password may contain besides letters and digits.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Minimum password length in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Date format produced by HTML date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static PASSWORD_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("regex {pattern} failed to compile: {error}"))
    })
}

fn name_regex() -> &'static Regex {
    compiled(&NAME_RE, r"^[A-Za-z\s]{2,30}$")
}

fn email_regex() -> &'static Regex {
    compiled(
        &EMAIL_RE,
        r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*@([A-Za-z0-9_-]+\.)+[A-Za-z]{2,7}$",
    )
}

fn phone_regex() -> &'static Regex {
    compiled(&PHONE_RE, r"^\+7\s?\([0-9]{3}\)\s?[0-9]{3}-[0-9]{2}-[0-9]{2}$")
}

fn password_regex() -> &'static Regex {
    // Character class only; digit and symbol presence are checked separately.
    compiled(&PASSWORD_RE, r"^[A-Za-z0-9!@#$%^&*]+$")
}

/// Letters and whitespace only, 2-30 characters, not blank.
///
/// # Examples
/// ```
/// use clinic_intake::domain::validators::is_valid_name;
///
/// assert!(is_valid_name("Jo"));
/// assert!(!is_valid_name("J0"));
/// ```
pub fn is_valid_name(raw: &str) -> bool {
    !raw.trim().is_empty() && name_regex().is_match(raw)
}

/// `local@domain.tld` with a 2-7 letter top-level label.
pub fn is_valid_email(raw: &str) -> bool {
    email_regex().is_match(raw)
}

/// Kazakhstan mobile format `+7 (XXX) XXX-XX-XX`.
pub fn is_valid_phone(raw: &str) -> bool {
    phone_regex().is_match(raw)
}

/// At least eight characters from letters, digits, and [`PASSWORD_SYMBOLS`],
/// including at least one digit and one symbol.
pub fn is_valid_password(raw: &str) -> bool {
    raw.chars().count() >= PASSWORD_MIN_LENGTH
        && password_regex().is_match(raw)
        && raw.chars().any(|c| c.is_ascii_digit())
        && raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Whole years between `date_of_birth` and `today`, counting birthdays.
///
/// Returns `None` when the birth date lies after `today`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use clinic_intake::domain::validators::age_in_years;
///
/// let dob = NaiveDate::from_ymd_opt(2000, 6, 15).expect("date");
/// let before_birthday = NaiveDate::from_ymd_opt(2018, 6, 14).expect("date");
/// let birthday = NaiveDate::from_ymd_opt(2018, 6, 15).expect("date");
/// assert_eq!(age_in_years(dob, before_birthday), Some(17));
/// assert_eq!(age_in_years(dob, birthday), Some(18));
/// ```
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(date_of_birth)
}

/// Parseable birth date at least [`MINIMUM_REGISTRATION_AGE`] years before `today`.
pub fn is_adult_birth_date(raw: &str, today: NaiveDate) -> bool {
    parse_date(raw)
        .and_then(|dob| age_in_years(dob, today))
        .is_some_and(|age| age >= MINIMUM_REGISTRATION_AGE)
}

/// Parseable date that is `today` or later.
pub fn is_not_past_date(raw: &str, today: NaiveDate) -> bool {
    parse_date(raw).is_some_and(|date| date >= today)
}
