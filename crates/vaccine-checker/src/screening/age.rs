use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Elapsed calendar time between a birth date and a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// Banding aid: `years * 12 + months`, plus half a month once `days >= 15`.
    pub total_months: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("'{0}' is not a YYYY-MM-DD calendar date")]
    InvalidDate(String),
    #[error("birth date {birth} is after the reference date {reference}")]
    FutureBirthDate {
        birth: NaiveDate,
        reference: NaiveDate,
    },
}

impl AgeBreakdown {
    pub fn between(birth: NaiveDate, reference: NaiveDate) -> Result<Self, AgeError> {
        if birth > reference {
            return Err(AgeError::FutureBirthDate { birth, reference });
        }

        let mut years = reference.year() - birth.year();
        let mut months = reference.month() as i32 - birth.month() as i32;
        let mut days = reference.day() as i32 - birth.day() as i32;

        if days < 0 {
            days += days_in_previous_month(reference) as i32;
            months -= 1;
        }
        if months < 0 {
            months += 12;
            years -= 1;
        }

        // A birth day past the end of the borrowed month can still leave a deficit.
        let days = days.max(0) as u32;
        let years = years as u32;
        let months = months as u32;

        let half = if days >= 15 { 0.5 } else { 0.0 };
        let total_months = f64::from(years * 12 + months) + half;

        Ok(Self {
            years,
            months,
            days,
            total_months,
        })
    }

    pub fn display(&self) -> String {
        format!("{}y {}m {}d", self.years, self.months, self.days)
    }
}

/// Parses a `YYYY-MM-DD` birth date, ignoring surrounding whitespace.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

pub fn compute_age(raw_birth_date: &str, reference: NaiveDate) -> Result<AgeBreakdown, AgeError> {
    let birth = parse_birth_date(raw_birth_date)
        .ok_or_else(|| AgeError::InvalidDate(raw_birth_date.to_string()))?;
    AgeBreakdown::between(birth, reference)
}

fn days_in_previous_month(reference: NaiveDate) -> u32 {
    reference
        .with_day(1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
