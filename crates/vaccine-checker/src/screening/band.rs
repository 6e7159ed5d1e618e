use super::age::AgeBreakdown;
use serde::{Deserialize, Serialize};

/// Clinical age bands, ordered by increasing age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "birth_to_1_month")]
    BirthToOneMonth,
    #[serde(rename = "2_to_11_months")]
    Age2To11Months,
    #[serde(rename = "12_months_to_6_years")]
    Age12MonthsTo6Years,
    #[serde(rename = "7_to_10_years")]
    Age7To10Years,
    #[serde(rename = "11_to_17_years")]
    Age11To17Years,
    #[serde(rename = "18_to_64_years")]
    Age18To64Years,
    #[serde(rename = "65_plus")]
    Age65Plus,
}

impl AgeBand {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::BirthToOneMonth,
            Self::Age2To11Months,
            Self::Age12MonthsTo6Years,
            Self::Age7To10Years,
            Self::Age11To17Years,
            Self::Age18To64Years,
            Self::Age65Plus,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BirthToOneMonth => "Birth to 1 month",
            Self::Age2To11Months => "2–11 months",
            Self::Age12MonthsTo6Years => "12 months–6 years",
            Self::Age7To10Years => "7–10 years",
            Self::Age11To17Years => "11–17 years",
            Self::Age18To64Years => "18–64 years",
            Self::Age65Plus => "≥65 years",
        }
    }
}

/// First matching rule wins. The sub-seven-year bands read `total_months`
/// (half-month rounding included); the rest read whole `years`.
pub fn classify_age_band(age: &AgeBreakdown) -> Option<AgeBand> {
    let total = age.total_months;
    let years = age.years;

    if total < 2.0 {
        Some(AgeBand::BirthToOneMonth)
    } else if (2.0..12.0).contains(&total) {
        Some(AgeBand::Age2To11Months)
    } else if total >= 12.0 && years < 7 {
        Some(AgeBand::Age12MonthsTo6Years)
    } else if (7..=10).contains(&years) {
        Some(AgeBand::Age7To10Years)
    } else if (11..=17).contains(&years) {
        Some(AgeBand::Age11To17Years)
    } else if (18..=64).contains(&years) {
        Some(AgeBand::Age18To64Years)
    } else if years >= 65 {
        Some(AgeBand::Age65Plus)
    } else {
        None
    }
}
