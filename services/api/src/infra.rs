use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use vaccine_checker::screening::{TableColumns, VaccineTable, VaccineTableError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured table, falling back to the bundled sample.
pub(crate) fn load_reference_table(path: Option<&Path>) -> Result<VaccineTable, VaccineTableError> {
    match path {
        Some(path) => VaccineTable::from_path(path, &TableColumns::standard()),
        None => {
            let table = VaccineTable::bundled()?;
            info!(vaccines = table.len(), "using bundled sample vaccine table");
            Ok(table)
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_reports_bad_input() {
        assert_eq!(
            parse_date(" 2024-06-15 "),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date"))
        );
        let message = parse_date("06/15/2024").expect_err("wrong format");
        assert!(message.contains("06/15/2024"));
    }

    #[test]
    fn missing_table_path_uses_bundled_sample() {
        let table = load_reference_table(None).expect("bundled table loads");
        assert!(!table.is_empty());
    }

    #[test]
    fn unreadable_table_path_is_an_error() {
        let error = load_reference_table(Some(Path::new("./no-such-table.csv")))
            .expect_err("missing file");
        assert!(matches!(error, VaccineTableError::Io(_)));
    }
}
