use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{Record, Table};
use super::stats::TableStats;

/// Errors from writing a snapshot. They propagate to the caller untouched;
/// there is no retry and no cleanup of a partially written file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Snapshot document
// ---------------------------------------------------------------------------

/// Calculation results accumulated over one interactive session. Entries
/// stay `None` until the corresponding menu action runs; absent entries are
/// omitted from the exported document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Calculations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TableStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rankings: Option<Vec<(String, u64)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_count: Option<usize>,
}

/// The exported document: the current filtered record sequence plus the
/// session's accumulated calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub filtered_listings: Vec<Record>,
    pub calculations: Calculations,
}

/// Serialize the table and calculations to `path` as indented JSON.
///
/// The table itself is unchanged; this is the one side-effecting operation
/// in the data layer.
pub fn write_snapshot(
    path: &Path,
    table: &Table,
    calculations: &Calculations,
) -> Result<(), ExportError> {
    let snapshot = Snapshot {
        filtered_listings: table.records().to_vec(),
        calculations: calculations.clone(),
    };

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writer.flush()?;

    info!(
        "exported {} listings to {}",
        snapshot.filtered_listings.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;
    use std::collections::BTreeMap;

    fn sample_calculations() -> Calculations {
        Calculations {
            stats: Some(TableStats {
                count: 2,
                avg_price_per_bedroom: BTreeMap::from([(1, 140.0), (2, 99.5)]),
            }),
            rankings: Some(vec![("A".to_string(), 2), ("B".to_string(), 1)]),
            location_count: Some(1),
        }
    }

    #[test]
    fn snapshot_round_trips_losslessly() {
        let table = Table::new(vec![
            record(&[("price", "$140.00"), ("host_id", "A")]),
            record(&[("price", ""), ("host_id", "B")]),
        ]);
        let calculations = sample_calculations();

        let path = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap()
            .into_temp_path();
        write_snapshot(&path, &table, &calculations).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let read_back: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(read_back.filtered_listings, table.records());
        assert_eq!(read_back.calculations, calculations);
    }

    #[test]
    fn export_uses_the_documented_field_names() {
        let table = Table::new(vec![record(&[("price", "$10")])]);
        let path = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap()
            .into_temp_path();
        write_snapshot(&path, &table, &sample_calculations()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"filteredListings\""));
        assert!(text.contains("\"avgPricePerBedroom\""));
        assert!(text.contains("\"locationCount\""));
    }

    #[test]
    fn unrecorded_calculations_are_omitted() {
        let table = Table::new(Vec::new());
        let path = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap()
            .into_temp_path();
        write_snapshot(&path, &table, &Calculations::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("\"stats\""));
        assert!(!text.contains("\"rankings\""));
        assert!(!text.contains("\"locationCount\""));
    }

    #[test]
    fn write_failure_propagates() {
        let table = Table::new(Vec::new());
        let err = write_snapshot(
            Path::new("/no/such/dir/out.json"),
            &table,
            &Calculations::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
