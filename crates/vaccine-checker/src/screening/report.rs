use super::age::{parse_birth_date, AgeBreakdown};
use super::band::{classify_age_band, AgeBand};
use super::labs::{recommend_labs, LabRecommendation};
use super::vaccines::{classify_vaccines, VaccineGroups, VaccineTable};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error};

pub const INVALID_DATE_MESSAGE: &str = "Enter a valid date of birth to view results.";
pub const BAND_UNAVAILABLE_MESSAGE: &str = "No age band matched this date of birth.";
pub const NO_LABS_MESSAGE: &str = "No lab tests are required for this age.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub required: usize,
    pub not_required: usize,
    pub other: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub birth_date: NaiveDate,
    pub reference_date: NaiveDate,
    pub age: AgeBreakdown,
    pub age_display: String,
    pub band: AgeBand,
    pub band_label: &'static str,
    pub counts: GroupCounts,
    pub vaccines: VaccineGroups,
    pub labs: Vec<LabRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labs_note: Option<&'static str>,
}

/// Result of screening one birth date. Bad input is a state, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreeningOutcome {
    Ready(ScreeningReport),
    InvalidDate { message: &'static str },
    BandUnavailable { message: &'static str },
}

impl ScreeningOutcome {
    pub fn evaluate(raw_birth_date: &str, reference: NaiveDate, table: &VaccineTable) -> Self {
        let Some(birth_date) = parse_birth_date(raw_birth_date) else {
            debug!(input = raw_birth_date, "birth date did not parse");
            return Self::invalid_date();
        };

        let age = match AgeBreakdown::between(birth_date, reference) {
            Ok(age) => age,
            Err(err) => {
                debug!(%err, "birth date rejected");
                return Self::invalid_date();
            }
        };

        let Some(band) = classify_age_band(&age) else {
            error!(?age, "no age band matched a valid age");
            return Self::BandUnavailable {
                message: BAND_UNAVAILABLE_MESSAGE,
            };
        };

        let vaccines = classify_vaccines(band, table);
        let labs = recommend_labs(&age);
        let labs_note = labs.is_empty().then_some(NO_LABS_MESSAGE);

        Self::Ready(ScreeningReport {
            birth_date,
            reference_date: reference,
            age,
            age_display: age.display(),
            band,
            band_label: band.label(),
            counts: GroupCounts {
                required: vaccines.required.len(),
                not_required: vaccines.not_required.len(),
                other: vaccines.other.len(),
            },
            vaccines,
            labs,
            labs_note,
        })
    }

    pub fn report(&self) -> Option<&ScreeningReport> {
        match self {
            Self::Ready(report) => Some(report),
            _ => None,
        }
    }

    fn invalid_date() -> Self {
        Self::InvalidDate {
            message: INVALID_DATE_MESSAGE,
        }
    }
}
