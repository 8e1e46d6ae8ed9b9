use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::{
    error::FeloError,
    model::constants::{NEUTRAL_RESULT, POINTS_PER_WEIGHTING, UNTARGETED_WEIGHTING}
};

lazy_static! {
    static ref DATE: Regex = Regex::new(r"^(?P<year>\d{4})/(?P<month>\d{1,2})/(?P<day>[\d.]{1,5})$").unwrap();
}

/// Offset between chrono's day count from the common era and the Julian day number.
const JULIAN_DAY_OFFSET: i64 = 1_721_425;

/// Date of a bout. `index` holds the hundredths of a fractional day, which
/// only orders bouts of the same day for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContestDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub index: u32
}

impl ContestDate {
    pub fn new(year: i32, month: u32, day: u32) -> ContestDate {
        ContestDate {
            year,
            month,
            day,
            index: 0
        }
    }

    pub fn with_index(self, index: u32) -> ContestDate {
        ContestDate { index, ..self }
    }

    /// The calendar day, without the sub-day index. Ratings are batched per
    /// calendar day.
    pub fn calendar_day(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Julian day number, `None` for dates like `1500/00/00` that are not on
    /// the calendar.
    pub fn julian_day(&self) -> Option<i64> {
        self.naive_date().map(|date| date.num_days_from_ce() as i64 + JULIAN_DAY_OFFSET)
    }
}

impl FromStr for ContestDate {
    type Err = FeloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = DATE
            .captures(s.trim())
            .ok_or_else(|| FeloError::Format(format!("\"{}\" is not a date of the form YYYY/MM/DD", s)))?;
        let year: i32 = captures["year"]
            .parse()
            .map_err(|_| FeloError::Format(format!("invalid year in \"{}\"", s)))?;
        let month: u32 = captures["month"]
            .parse()
            .map_err(|_| FeloError::Format(format!("invalid month in \"{}\"", s)))?;
        let day: f64 = captures["day"]
            .parse()
            .map_err(|_| FeloError::Format(format!("invalid day in \"{}\"", s)))?;
        let index = (day.fract() * 100.0).round() as u32;
        if index >= 100 {
            return Err(FeloError::Format(format!(
                "the day index in \"{}\" has more than two digits",
                s
            )));
        }

        Ok(ContestDate {
            year,
            month,
            day: day.trunc() as u32,
            index
        })
    }
}

impl From<NaiveDate> for ContestDate {
    fn from(date: NaiveDate) -> Self {
        ContestDate::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for ContestDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)?;
        if self.index == 0 {
            Ok(())
        } else if self.index % 10 == 0 {
            write!(f, ".{}", self.index / 10)
        } else {
            write!(f, ".{:02}", self.index)
        }
    }
}

/// A single bout between two participants, referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contest {
    pub date: ContestDate,
    pub first: String,
    pub second: String,
    pub points_first: u32,
    pub points_second: u32,
    /// Winning points of the bout. 0 marks a bout of a relay team competition.
    pub fenced_to: u32
}

impl Contest {
    /// Number of equivalent 5-hit bouts this bout counts for.
    pub fn weighting(&self) -> f64 {
        if self.fenced_to > 0 {
            self.total_points() / POINTS_PER_WEIGHTING
        } else {
            UNTARGETED_WEIGHTING
        }
    }

    /// Fraction of the hits made by the first participant.
    pub fn result_first(&self) -> f64 {
        let total_points = self.total_points();
        if total_points == 0.0 {
            NEUTRAL_RESULT
        } else {
            self.points_first as f64 / total_points
        }
    }

    fn total_points(&self) -> f64 {
        self.points_first as f64 + self.points_second as f64
    }

    /// True if one participant reached the target and thereby stopped the bout.
    pub fn reached_target(&self) -> bool {
        self.fenced_to > 0 && (self.points_first == self.fenced_to || self.points_second == self.fenced_to)
    }
}
