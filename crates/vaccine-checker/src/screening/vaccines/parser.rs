use super::columns::TableColumns;
use super::normalizer::normalize_header;
use super::{VaccineRecord, VaccineTableError};
use crate::screening::band::AgeBand;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::warn;

pub(crate) fn parse_json_rows<R: Read>(
    reader: R,
    columns: &TableColumns,
) -> Result<Vec<VaccineRecord>, VaccineTableError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
    let lookup = columns.band_lookup();
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let mut name = None;
        let mut cells = BTreeMap::new();

        for (header, value) in row {
            if columns.matches_name(&header) {
                name = Some(cell_text(value));
            } else if let Some(band) = lookup.get(&normalize_header(&header)) {
                cells.insert(*band, cell_text(value));
            }
        }

        let name = name.unwrap_or_default();
        if name.trim().is_empty() {
            warn!(row = index + 1, "vaccine row has no name");
        }
        records.push(VaccineRecord::new(name, cells));
    }

    Ok(records)
}

pub(crate) fn parse_csv_rows<R: Read>(
    reader: R,
    columns: &TableColumns,
) -> Result<Vec<VaccineRecord>, VaccineTableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let lookup = columns.band_lookup();
    let headers = csv_reader.headers()?.clone();
    let name_index = headers
        .iter()
        .position(|header| columns.matches_name(header))
        .ok_or_else(|| VaccineTableError::MissingNameColumn(columns.name_column.clone()))?;
    let band_indices: Vec<(AgeBand, usize)> = headers
        .iter()
        .enumerate()
        .filter_map(|(index, header)| {
            lookup
                .get(&normalize_header(header))
                .map(|band| (*band, index))
        })
        .collect();

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let name = row.get(name_index).unwrap_or_default();
        if name.trim().is_empty() {
            warn!(row = index + 1, "vaccine row has no name");
        }

        let cells = band_indices
            .iter()
            .filter_map(|(band, column)| row.get(*column).map(|cell| (*band, cell.to_string())))
            .collect();
        records.push(VaccineRecord::new(name.to_string(), cells));
    }

    Ok(records)
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
