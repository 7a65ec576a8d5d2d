//! Birth-date parsing and calendar-aware age arithmetic.
//!
//! Birth dates arrive from the form as `dd.mm.yyyy` strings. Calendar
//! validity is delegated to [`jiff::civil::Date`]: a date is accepted only
//! when constructing it round-trips to the same day, month and year.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

const MIN_BIRTH_YEAR: i16 = 1900;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Elapsed time between a birth date and a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Age {
    pub years: u32,
    /// Always in `0..=11`.
    pub months: u32,
    pub days: u32,
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

/// Parse a strict `dd.mm.yyyy` birth date.
///
/// Returns `None` for anything that is not two digits, a dot, two digits,
/// a dot and four digits, for years outside `1900..=today.year() + 1`, and
/// for dates that do not exist on the calendar (`31.04.2020`, `29.02.2021`).
pub fn parse_birth_date(input: &str, today: Date) -> Option<Date> {
    let trimmed = input.trim();
    let mut parts = trimmed.split('.');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if !is_digits(day, 2) || !is_digits(month, 2) || !is_digits(year, 4) {
        return None;
    }

    let day: i8 = day.parse().ok()?;
    let month: i8 = month.parse().ok()?;
    let year: i16 = year.parse().ok()?;

    if !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
        || year < MIN_BIRTH_YEAR
        || year > today.year() + 1
    {
        return None;
    }

    let date = Date::new(year, month, day).ok()?;
    if date.year() != year || date.month() != month || date.day() != day {
        return None;
    }
    Some(date)
}

/// Age at `reference` of someone born on `birth`.
///
/// Days borrow from the month preceding the reference month, months borrow
/// from years. A birth date after the reference date has no age.
pub fn age_on(birth: Date, reference: Date) -> Option<Age> {
    if birth > reference {
        return None;
    }

    let mut years = i32::from(reference.year()) - i32::from(birth.year());
    let mut months = i32::from(reference.month()) - i32::from(birth.month());
    let mut days = i32::from(reference.day()) - i32::from(birth.day());

    // A 31st birthday day can exceed a short preceding month (e.g. February),
    // so keep borrowing until the day count is non-negative.
    let mut cursor = reference.first_of_month();
    while days < 0 {
        months -= 1;
        cursor = cursor.yesterday().ok()?.first_of_month();
        days += i32::from(cursor.days_in_month());
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    Some(Age {
        years: u32::try_from(years).ok()?,
        months: u32::try_from(months).ok()?,
        days: u32::try_from(days).ok()?,
    })
}

/// Parse a birth date and compute the age at `today` in one step.
pub fn parse_and_age(birth_date: &str, today: Date) -> Option<Age> {
    let birth = parse_birth_date(birth_date, today)?;
    age_on(birth, today)
}

/// Long-form date used in result documents, e.g. `17 October 2026`.
pub fn format_long_date(date: Date) -> String {
    let month = MONTH_NAMES[usize::try_from(date.month() - 1).unwrap_or(0)];
    format!("{} {} {}", date.day(), month, date.year())
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
