use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::info;
use thiserror::Error;

use super::model::{Record, Table};

/// Errors surfaced while turning a file into a [`Table`]. All of them are
/// fatal to the caller; there is no recovery or retry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Malformed tabular content, or an I/O / decompression failure while
    /// reading rows (the csv error wraps those).
    #[error("malformed listings table: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings table from a file.  Dispatch by extension.
///
/// * `.gz` – gzip-compressed delimited text, decompressed transparently
/// * anything else – plain delimited text
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Box<dyn Read> = match ext.as_str() {
        "gz" => Box::new(GzDecoder::new(file)),
        _ => Box::new(file),
    };

    let table = read_table(raw)?;
    info!("loaded {} listings from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV tokenization
// ---------------------------------------------------------------------------

/// Parse delimited text into records keyed by the header row.
///
/// Quoted fields may contain the delimiter and embedded newlines, blank
/// lines are skipped, and both headers and values are whitespace-trimmed.
fn read_table(input: impl Read) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(input));

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut fields = BTreeMap::new();
        for (i, value) in row.iter().enumerate() {
            if let Some(name) = headers.get(i) {
                fields.insert(name.clone(), value.to_string());
            }
        }
        records.push(Record::new(fields));
    }

    Ok(Table::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
id, price ,room_type,host_location
1,$140.00,Entire home/apt,\"Paris, France\"

2, $65.00 ,Private room,\"Lyon,
France\"
";

    fn write_temp(contents: &[u8], suffix: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents).expect("write temp file");
        file.into_temp_path()
    }

    #[test]
    fn loads_plain_csv_with_quotes_blanks_and_trimming() {
        let path = write_temp(SAMPLE.as_bytes(), ".csv");
        let table = load_file(&path).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        // Headers and values are trimmed.
        assert_eq!(first.get("price"), Some("$140.00"));
        // The quoted field keeps its embedded delimiter.
        assert_eq!(first.get("host_location"), Some("Paris, France"));

        let second = &table.records()[1];
        assert_eq!(second.get("price"), Some("$65.00"));
        // Embedded newline survives inside quotes.
        assert_eq!(second.get("host_location"), Some("Lyon,\nFrance"));
    }

    #[test]
    fn gz_extension_triggers_decompression() {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let path = write_temp(&compressed, ".csv.gz");
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].get("id"), Some("1"));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_file(Path::new("/no/such/listings.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("/no/such/listings.csv"));
    }

    #[test]
    fn garbage_behind_gz_suffix_fails() {
        let path = write_temp(b"not actually gzip", ".gz");
        assert!(load_file(&path).is_err());
    }
}
