mod columns;
mod normalizer;
mod parser;

pub use columns::TableColumns;

use crate::screening::band::AgeBand;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

const BUNDLED_TABLE: &str = include_str!("../../../data/vaccines.sample.json");

#[derive(Debug, thiserror::Error)]
pub enum VaccineTableError {
    #[error("failed to read vaccine table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vaccine table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid vaccine table CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("vaccine table is missing the '{0}' column")]
    MissingNameColumn(String),
    #[error("unsupported vaccine table format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

/// One row of the reference table: a vaccine and its free-text cell per band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccineRecord {
    pub name: String,
    pub cells: BTreeMap<AgeBand, String>,
}

impl VaccineRecord {
    pub fn new(name: impl Into<String>, cells: BTreeMap<AgeBand, String>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Cell text for `band`, or an empty string when the row lacks that column.
    pub fn cell(&self, band: AgeBand) -> &str {
        self.cells.get(&band).map(String::as_str).unwrap_or("")
    }
}

/// Ordered, read-only reference table loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaccineTable {
    records: Vec<VaccineRecord>,
}

impl VaccineTable {
    pub fn from_records(records: Vec<VaccineRecord>) -> Self {
        Self { records }
    }

    pub fn bundled() -> Result<Self, VaccineTableError> {
        Self::from_json_reader(BUNDLED_TABLE.as_bytes(), &TableColumns::standard())
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        columns: &TableColumns,
    ) -> Result<Self, VaccineTableError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let table = match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?, columns)?,
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?, columns)?,
            _ => return Err(VaccineTableError::UnsupportedFormat(path.display().to_string())),
        };

        info!(path = %path.display(), vaccines = table.len(), "vaccine table loaded");
        Ok(table)
    }

    pub fn from_json_reader<R: Read>(
        reader: R,
        columns: &TableColumns,
    ) -> Result<Self, VaccineTableError> {
        parser::parse_json_rows(reader, columns).map(Self::from_records)
    }

    pub fn from_csv_reader<R: Read>(
        reader: R,
        columns: &TableColumns,
    ) -> Result<Self, VaccineTableError> {
        parser::parse_csv_rows(reader, columns).map(Self::from_records)
    }

    pub fn records(&self) -> &[VaccineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusType {
    Required,
    NotRequired,
    SometimesOrInfo,
}

impl StatusType {
    /// Prefix match on trimmed, upper-cased text: YES, then SOMETIMES, then NO.
    /// Anything else, including an empty cell, falls back to `SometimesOrInfo`.
    pub fn from_cell(cell: &str) -> Self {
        let text = cell.trim().to_uppercase();
        if text.starts_with("YES") {
            Self::Required
        } else if text.starts_with("SOMETIMES") {
            Self::SometimesOrInfo
        } else if text.starts_with("NO") {
            Self::NotRequired
        } else {
            Self::SometimesOrInfo
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::NotRequired => "Not Required",
            Self::SometimesOrInfo => "Case-by-case / Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedVaccine {
    pub vaccine_name: String,
    pub cell_text: String,
    pub status: StatusType,
}

impl ClassifiedVaccine {
    /// Short marker shown next to the vaccine name.
    pub fn badge(&self) -> &'static str {
        match self.status {
            StatusType::Required => "YES",
            StatusType::NotRequired => "NO",
            StatusType::SometimesOrInfo => {
                if self.cell_text.trim().to_uppercase().starts_with("SOMETIMES") {
                    "SOMETIMES"
                } else {
                    "INFO"
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VaccineGroups {
    pub required: Vec<ClassifiedVaccine>,
    pub not_required: Vec<ClassifiedVaccine>,
    pub other: Vec<ClassifiedVaccine>,
}

impl VaccineGroups {
    pub fn total(&self) -> usize {
        self.required.len() + self.not_required.len() + self.other.len()
    }
}

/// Partitions the table for `band`, keeping table order inside each group.
pub fn classify_vaccines(band: AgeBand, table: &VaccineTable) -> VaccineGroups {
    let mut groups = VaccineGroups::default();

    for record in table.records() {
        let cell_text = record.cell(band).to_string();
        let status = StatusType::from_cell(&cell_text);
        let classified = ClassifiedVaccine {
            vaccine_name: record.name.clone(),
            cell_text,
            status,
        };

        match status {
            StatusType::Required => groups.required.push(classified),
            StatusType::NotRequired => groups.not_required.push(classified),
            StatusType::SometimesOrInfo => groups.other.push(classified),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cells: &[(AgeBand, &str)]) -> VaccineRecord {
        VaccineRecord::new(
            name,
            cells
                .iter()
                .map(|(band, text)| (*band, text.to_string()))
                .collect(),
        )
    }

    #[test]
    fn status_prefix_priority() {
        assert_eq!(StatusType::from_cell("YES"), StatusType::Required);
        assert_eq!(StatusType::from_cell("  yes, 2 doses"), StatusType::Required);
        assert_eq!(StatusType::from_cell("Sometimes"), StatusType::SometimesOrInfo);
        assert_eq!(StatusType::from_cell("no"), StatusType::NotRequired);
        assert_eq!(StatusType::from_cell("Not recommended"), StatusType::NotRequired);
        assert_eq!(StatusType::from_cell("None"), StatusType::NotRequired);
        assert_eq!(StatusType::from_cell("Seasonal"), StatusType::SometimesOrInfo);
        assert_eq!(StatusType::from_cell(""), StatusType::SometimesOrInfo);
        assert_eq!(StatusType::from_cell("   "), StatusType::SometimesOrInfo);
        assert_eq!(StatusType::from_cell("See note: YES"), StatusType::SometimesOrInfo);
    }

    #[test]
    fn status_labels_name_each_group() {
        assert_eq!(StatusType::Required.label(), "Required");
        assert_eq!(StatusType::NotRequired.label(), "Not Required");
        assert_eq!(StatusType::SometimesOrInfo.label(), "Case-by-case / Info");
    }

    #[test]
    fn sometimes_cell_keeps_original_text() {
        let table = VaccineTable::from_records(vec![record(
            "Hepatitis A",
            &[(AgeBand::Age18To64Years, "Sometimes — consult physician")],
        )]);

        let groups = classify_vaccines(AgeBand::Age18To64Years, &table);

        assert!(groups.required.is_empty());
        assert!(groups.not_required.is_empty());
        assert_eq!(groups.other.len(), 1);
        let item = &groups.other[0];
        assert_eq!(item.vaccine_name, "Hepatitis A");
        assert_eq!(item.cell_text, "Sometimes — consult physician");
        assert_eq!(item.status, StatusType::SometimesOrInfo);
        assert_eq!(item.badge(), "SOMETIMES");
    }

    fn names(items: &[ClassifiedVaccine]) -> Vec<&str> {
        items.iter().map(|item| item.vaccine_name.as_str()).collect()
    }

    #[test]
    fn partition_is_stable_and_total() {
        let band = AgeBand::Age11To17Years;
        let table = VaccineTable::from_records(vec![
            record("A", &[(band, "YES")]),
            record("B", &[(band, "NO")]),
            record("C", &[(band, "yes - booster")]),
            record("D", &[(band, "Info only")]),
            record("E", &[(AgeBand::Age65Plus, "YES")]),
            record("F", &[(band, "No")]),
        ]);

        let groups = classify_vaccines(band, &table);

        assert_eq!(names(&groups.required), vec!["A", "C"]);
        assert_eq!(names(&groups.not_required), vec!["B", "F"]);
        assert_eq!(names(&groups.other), vec!["D", "E"]);
        assert_eq!(groups.total(), table.len());
    }

    #[test]
    fn missing_band_cell_is_info() {
        let table = VaccineTable::from_records(vec![record("Orphan", &[])]);
        let groups = classify_vaccines(AgeBand::BirthToOneMonth, &table);

        assert_eq!(groups.other.len(), 1);
        assert_eq!(groups.other[0].cell_text, "");
        assert_eq!(groups.other[0].badge(), "INFO");
    }

    #[test]
    fn empty_table_yields_empty_groups() {
        let groups = classify_vaccines(AgeBand::Age65Plus, &VaccineTable::default());
        assert_eq!(groups, VaccineGroups::default());
    }

    #[test]
    fn bundled_table_loads_with_every_band() {
        let table = VaccineTable::bundled().expect("bundled table parses");
        assert!(!table.is_empty());
        for record in table.records() {
            assert_eq!(record.cells.len(), AgeBand::ordered().len(), "{}", record.name);
        }
    }

    #[test]
    fn from_path_rejects_unknown_extensions() {
        let error = VaccineTable::from_path("table.xlsx", &TableColumns::standard())
            .expect_err("unsupported format");
        assert!(matches!(error, VaccineTableError::UnsupportedFormat(_)));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = VaccineTable::from_path("./does-not-exist.json", &TableColumns::standard())
            .expect_err("missing file");
        assert!(matches!(error, VaccineTableError::Io(_)));
    }
}
