use chrono::{Datelike, Duration, Local, NaiveDate};

/// Current calendar date in the local timezone. All day bookkeeping keys off
/// this, so "today" follows the machine clock, not UTC.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fixed-width `YYYY-MM-DD` key. Lexical order on these strings equals
/// chronological order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 0 = Monday .. 6 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}
