use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::{Error, RawTable, Result};

/// Read an incident export with a header row.
///
/// Ragged rows are accepted (short rows read as empty cells); malformed CSV is fatal.
pub fn read_incident_csv(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(Error::input_not_found(path));
    }
    let file = File::open(path).map_err(|_| Error::input_not_found(path))?;
    let table = read_incident_csv_from(file)?;
    log::debug!(
        "Read {} rows with {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

pub fn read_incident_csv_from<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_reads_header_and_rows() {
        let csv = indoc! {"
            incident_id, opened_at ,priority
            INC1,2025-01-01 08:00,P2
            INC2,,P3,extra
            INC3
        "};
        let table = read_incident_csv_from(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["incident_id", "opened_at", "priority"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(1, 1), "");
        assert_eq!(table.cell(2, 2), "");
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let csv = "incident_id,issue_category\nINC1,\"Teams Audio, Video\"\n";
        let table = read_incident_csv_from(csv.as_bytes()).unwrap();
        assert_eq!(table.cell(0, 1), "Teams Audio, Video");
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let csv = "\u{feff}incident_id,priority\nINC1,P1\n";
        let table = read_incident_csv_from(csv.as_bytes()).unwrap();
        assert_eq!(table.column_index("incident_id"), Some(0));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.csv");
        assert!(matches!(
            read_incident_csv(&missing),
            Err(Error::InputNotFound { .. })
        ));
        assert!(matches!(
            read_incident_csv(dir.path()),
            Err(Error::InputNotFound { .. })
        ));
    }
}
