//! Rule Dates - Positional dd-mm-yyyy Parsing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("expected dd-mm-yyyy, got {0:?}")]
    BadShape(String),

    #[error("non-numeric date component {0:?}")]
    BadComponent(String),
}

/// A calendar date parsed from `dd-mm-yyyy` input.
///
/// Field order matters: the derived `Ord` compares `(year, month, day)`
/// lexicographically, which is the total order rule replay depends on.
/// Components are positional only - no calendar validation is applied,
/// so `99-99-9999` parses and orders like any other triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl RuleDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl FromStr for RuleDate {
    type Err = DateParseError;

    /// Splits on `-` and reverses the component order to (year, month, day).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('-');

        let (day, month, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(d), Some(m), Some(y), None) => (d, m, y),
            _ => return Err(DateParseError::BadShape(trimmed.to_string())),
        };

        Ok(Self {
            year: parse_component(year)?,
            month: parse_component(month)?,
            day: parse_component(day)?,
        })
    }
}

fn parse_component<T: FromStr>(raw: &str) -> Result<T, DateParseError> {
    raw.parse()
        .map_err(|_| DateParseError::BadComponent(raw.to_string()))
}

impl fmt::Display for RuleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

/// Parse one date per line, skipping blank lines.
pub fn parse_date_list(text: &str) -> Result<Vec<RuleDate>, DateParseError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RuleDate::from_str)
        .collect()
}
