use super::normalizer::normalize_header;
use crate::screening::band::AgeBand;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Literal header strings used by the reference table source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    pub name_column: String,
    pub band_columns: Vec<(AgeBand, String)>,
}

impl TableColumns {
    pub fn standard() -> Self {
        const BAND_HEADERS: [(AgeBand, &str); 7] = [
            (AgeBand::BirthToOneMonth, "Birth— I month"),
            (AgeBand::Age2To11Months, "2—11 months"),
            (AgeBand::Age12MonthsTo6Years, "12 months - 6 years"),
            (AgeBand::Age7To10Years, "7—10 years"),
            (AgeBand::Age11To17Years, "11—17 years"),
            (AgeBand::Age18To64Years, "18-64 years"),
            (AgeBand::Age65Plus, ">= 65 years"),
        ];

        Self {
            name_column: "Vaccines by applicant".to_string(),
            band_columns: BAND_HEADERS
                .iter()
                .map(|(band, header)| (*band, header.to_string()))
                .collect(),
        }
    }

    pub fn header_for(&self, band: AgeBand) -> Option<&str> {
        self.band_columns
            .iter()
            .find(|(candidate, _)| *candidate == band)
            .map(|(_, header)| header.as_str())
    }

    pub(crate) fn matches_name(&self, header: &str) -> bool {
        normalize_header(header) == normalize_header(&self.name_column)
    }

    pub(crate) fn band_lookup(&self) -> HashMap<String, AgeBand> {
        self.band_columns
            .iter()
            .map(|(band, header)| (normalize_header(header), *band))
            .collect()
    }
}

impl Default for TableColumns {
    fn default() -> Self {
        Self::standard()
    }
}
