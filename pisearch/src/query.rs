use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::candidates::{date_candidates, name_candidates, name_digits};
use crate::errors::{SearchError, SearchResult};

static US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{4})$").expect("valid date regex"));
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid date regex"));

/// A calendar date whose fields are within the searchable ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateQuery {
    month: u32,
    day: u32,
    year: u32,
}

impl DateQuery {
    /// Validates month 1-12, day 1-31 and year 1-9999
    pub fn new(month: u32, day: u32, year: u32) -> SearchResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(SearchError::input_error(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(SearchError::input_error(format!(
                "day must be between 1 and 31, got {day}"
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(SearchError::input_error(format!(
                "year must be between 1 and 9999, got {year}"
            )));
        }
        Ok(Self { month, day, year })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn candidates(&self) -> Vec<String> {
        date_candidates(self.month, self.day, self.year)
    }
}

impl fmt::Display for DateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

/// Something a user can look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Date(DateQuery),
    Name(String),
}

impl Query {
    /// Builds a name query, rejecting names without a single Latin letter
    pub fn name(name: impl Into<String>) -> SearchResult<Self> {
        let name = name.into();
        if name_digits(&name).is_none() {
            return Err(SearchError::input_error(format!(
                "{name:?} contains no letters A-Z"
            )));
        }
        Ok(Self::Name(name))
    }

    /// Interprets free-form text.
    ///
    /// `7/20/1991`, `7-20-1991` and `1991-07-20` are dates, month first unless
    /// the year leads. The year is always written with four digits, so `7-20-91`
    /// is not a date. Anything else with a letter is a name.
    pub fn parse(text: &str) -> SearchResult<Self> {
        let text = text.trim();

        if let Some(caps) = ISO_DATE.captures(text) {
            return Ok(Self::Date(DateQuery::new(
                parse_field(&caps[2])?,
                parse_field(&caps[3])?,
                parse_field(&caps[1])?,
            )?));
        }
        if let Some(caps) = US_DATE.captures(text) {
            return Ok(Self::Date(DateQuery::new(
                parse_field(&caps[1])?,
                parse_field(&caps[2])?,
                parse_field(&caps[3])?,
            )?));
        }

        Self::name(text)
    }

    /// Ordered candidates for this query; never empty for a constructed query
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Self::Date(date) => date.candidates(),
            Self::Name(name) => name_candidates(name),
        }
    }
}

impl FromStr for Query {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "date {date}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

fn parse_field(digits: &str) -> SearchResult<u32> {
    digits
        .parse()
        .map_err(|_| SearchError::input_error(format!("invalid number {digits:?}")))
}
