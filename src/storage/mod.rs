// src/storage/mod.rs
use std::path::Path;

use crate::naia::StandingRecord;
use crate::utils::error::StorageError;

pub mod processed;

pub use processed::ProcessedUrlStore;

// Column B of the results sheet holds the school name.
const SCHOOL_COLUMN: usize = 1;

/// Name of the results column that holds conference places for `year`.
pub fn year_column(year: u32) -> String {
    format!("{} Conference Team Place", year)
}

/// What `apply_standings` changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub column: String,
    pub missing_column: bool,
    /// (school as written in the table, place written)
    pub updated: Vec<(String, u32)>,
    pub unmatched: Vec<String>,
}

/// The results sheet: a header row plus one row per school.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl StandingsTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a results sheet. Rows may be shorter or longer than the header.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(String::from).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        let table = Self { headers, rows };
        tracing::info!("Read {} rows from {}", table.rows.len(), path.display());
        Ok(table)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StorageError> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)?;

        if !self.headers.is_empty() {
            writer.write_record(&self.headers)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        tracing::info!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    /// Writes each record's rank into the year's place column of the first
    /// row whose school name contains, or is contained in, the record's
    /// school (case-insensitive).
    pub fn apply_standings(&mut self, records: &[StandingRecord], year: u32) -> ApplyReport {
        let column = year_column(year);
        let mut report = ApplyReport { column: column.clone(), ..Default::default() };

        let Some(col) = self.headers.iter().position(|h| *h == column) else {
            tracing::warn!("Column '{}' not found in results table", column);
            report.missing_column = true;
            report.unmatched = records.iter().map(|r| r.school.clone()).collect();
            return report;
        };

        for record in records {
            let school = record.school.to_lowercase();

            let row = self.rows.iter_mut().find(|row| {
                row.get(SCHOOL_COLUMN).is_some_and(|name| {
                    let name = name.trim().to_lowercase();
                    // A blank cell would "contain" every school.
                    !name.is_empty() && (name.contains(&school) || school.contains(&name))
                })
            });

            let Some(row) = row else {
                tracing::debug!("No row matches school '{}'", record.school);
                report.unmatched.push(record.school.clone());
                continue;
            };

            if row.len() <= col {
                row.resize(col + 1, String::new());
            }
            row[col] = record.rank.to_string();

            tracing::info!("Updated {} - {}: {}", row[SCHOOL_COLUMN], year, record.rank);
            report.updated.push((row[SCHOOL_COLUMN].clone(), record.rank));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank: u32, school: &str) -> StandingRecord {
        StandingRecord {
            rank,
            school: school.to_string(),
            score: "100".to_string(),
            conference: "Heart of America Conference".to_string(),
            year: 2024,
        }
    }

    fn table() -> StandingsTable {
        StandingsTable::new(
            vec!["State".into(), "School".into(), "2023 Conference Team Place".into(), "2024 Conference Team Place".into()],
            vec![
                vec!["IA".into(), "Grand View University".into()],
                vec!["MO".into(), "Missouri Valley".into(), "3".into(), "".into()],
                vec!["KS".into(), "".into()],
            ],
        )
    }

    #[test]
    fn test_year_column_name() {
        assert_eq!(year_column(2024), "2024 Conference Team Place");
    }

    #[test]
    fn test_apply_matches_by_containment_either_way() {
        let mut table = table();
        let records = vec![record(1, "grand view"), record(2, "Missouri Valley College"), record(3, "Menlo")];

        let report = table.apply_standings(&records, 2024);

        assert!(!report.missing_column);
        assert_eq!(report.updated, vec![
            ("Grand View University".to_string(), 1),
            ("Missouri Valley".to_string(), 2),
        ]);
        assert_eq!(report.unmatched, vec!["Menlo".to_string()]);

        // Short row padded out to the year column
        assert_eq!(table.rows[0], vec!["IA", "Grand View University", "", "1"]);
        assert_eq!(table.rows[1][3], "2");
        assert_eq!(table.rows[1][2], "3");
        // Blank school name never matches
        assert_eq!(table.rows[2].len(), 2);
    }

    #[test]
    fn test_apply_without_year_column_changes_nothing() {
        let mut table = table();
        let before = table.clone();

        let report = table.apply_standings(&[record(1, "Grand View")], 2019);

        assert!(report.missing_column);
        assert_eq!(report.column, "2019 Conference Team Place");
        assert_eq!(table, before);
    }

    #[test]
    fn test_save_then_load_keeps_ragged_rows() {
        let path = std::env::temp_dir().join(format!("naia_table_{}.csv", std::process::id()));
        let mut table = table();
        table.apply_standings(&[record(4, "Grand View")], 2024);
        table.rows.push(vec!["OR".into(), "Corban, University".into(), "2".into()]);
        table.save(&path).expect("save should succeed");

        let written = std::fs::read_to_string(&path).unwrap();
        let loaded = StandingsTable::load(&path).expect("load should succeed");
        std::fs::remove_file(&path).ok();

        // Commas inside a school name survive as one quoted field
        assert!(written.contains("\"Corban, University\""));
        assert_eq!(loaded.rows[3], vec!["OR", "Corban, University", "2"]);

        assert_eq!(loaded.headers, table.headers);
        assert_eq!(loaded.rows[0], vec!["IA", "Grand View University", "", "4"]);
        assert_eq!(loaded.rows[1], table.rows[1]);
        assert_eq!(loaded.rows[2], vec!["KS", ""]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = StandingsTable::load("/definitely/not/here.csv");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
