use crate::date::parse_date;
use chrono::{Months, NaiveDate};
use std::str::FromStr;
use thiserror::Error;

/// Fixed renewal periods an admin can extend a subscription with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalTerm {
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
}

impl RenewalTerm {
    pub fn months(&self) -> u32 {
        match self {
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
            Self::TwentyFourMonths => 24,
        }
    }
}

impl FromStr for RenewalTerm {
    type Err = InvalidRenewal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+6m" => Ok(Self::SixMonths),
            "+12m" | "+1y" => Ok(Self::TwelveMonths),
            "+24m" => Ok(Self::TwentyFourMonths),
            other => Err(InvalidRenewal::UnknownTerm(other.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidRenewal {
    #[error("Either term or date must be provided")]
    MissingTermOrDate,
    #[error("Only one of term or date can be provided")]
    BothTermAndDate,
    #[error("Invalid term: `{0}`. Expected one of +6m, +12m, +1y, +24m")]
    UnknownTerm(String),
    #[error("Invalid date: `{0}`. Use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("The renewed expiration date is out of range")]
    OutOfRange,
}

/// How the expiration date of a `Customer` should be moved on renewal
#[derive(Debug, Clone, PartialEq)]
pub enum Renewal {
    /// Extend the current expiration date by a `RenewalTerm`
    Term(RenewalTerm),
    /// Set the expiration date to exactly this date
    Date(NaiveDate),
}

impl Renewal {
    pub fn parse(term: Option<&str>, date: Option<&str>) -> Result<Self, InvalidRenewal> {
        match (term, date) {
            (Some(term), None) => term.parse().map(Self::Term),
            (None, Some(date)) => parse_date(date.trim())
                .map(Self::Date)
                .map_err(|_| InvalidRenewal::InvalidDate(date.to_string())),
            (Some(_), Some(_)) => Err(InvalidRenewal::BothTermAndDate),
            (None, None) => Err(InvalidRenewal::MissingTermOrDate),
        }
    }

    /// Computes the new expiration date. A term is added to `current`, or to
    /// `today` when there is no current expiration date. Adding months clamps
    /// to the last day of the resulting month, e.g. Aug 31 + 6 months is Feb 28.
    pub fn new_expiration(
        &self,
        current: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<NaiveDate, InvalidRenewal> {
        match self {
            Self::Date(date) => Ok(*date),
            Self::Term(term) => current
                .unwrap_or(today)
                .checked_add_months(Months::new(term.months()))
                .ok_or(InvalidRenewal::OutOfRange),
        }
    }
}
