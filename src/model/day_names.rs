//! Weekday and month naming.
//!
//! The grid core only ever asks for a short weekday name; which language it
//! comes back in is up to the [`DayNameLookup`] the host supplies.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Short weekday names, indexed Sunday-first (0 = Sunday ... 6 = Saturday).
const KOREAN_SHORT: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];
const ENGLISH_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Maps a weekday to the short label drawn in the column header.
pub trait DayNameLookup {
    /// Short name for `weekday`.
    fn short_name(&self, weekday: Weekday) -> &str;

    /// Label for the month containing `date`, shown by hosts next to the
    /// current date.
    fn month_label(&self, date: NaiveDate) -> String {
        date.format("%B %Y").to_string()
    }
}

impl<F> DayNameLookup for F
where
    F: Fn(Weekday) -> &'static str,
{
    fn short_name(&self, weekday: Weekday) -> &str {
        self(weekday)
    }
}

/// Built-in name tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Korean single-syllable names (일, 월, ...).
    #[default]
    #[serde(rename = "ko", alias = "korean")]
    Korean,
    /// English three-letter names.
    #[serde(rename = "en", alias = "english")]
    English,
}

impl DayNameLookup for Locale {
    fn short_name(&self, weekday: Weekday) -> &str {
        let index = weekday.num_days_from_sunday() as usize;
        match self {
            Locale::Korean => KOREAN_SHORT[index],
            Locale::English => ENGLISH_SHORT[index],
        }
    }

    fn month_label(&self, date: NaiveDate) -> String {
        match self {
            Locale::Korean => format!("{}년 {}월", date.year(), date.month()),
            Locale::English => date.format("%B %Y").to_string(),
        }
    }
}

/// Returned when a locale name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown locale '{0}' (expected 'ko' or 'en')")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "korean" => Ok(Locale::Korean),
            "en" | "english" => Ok(Locale::English),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}
