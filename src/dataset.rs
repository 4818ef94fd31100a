//! Loading, saving and memoized caching of the review table.
//!
//! The table is a flat CSV file with no relational structure. Every column of
//! the input is preserved verbatim; the only mutation this crate ever applies
//! is appending (or replacing) the sentiment label column.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::LensError;
use crate::labeler::Sentiment;

/// Column holding the product name.
pub const PRODUCT_COL: &str = "product_name";

/// Column holding the free-text review.
pub const FEEDBACK_COL: &str = "Customer_Feedback";

/// Column the labeler appends.
pub const LABEL_COL: &str = "Sentiment_Label";

/// A flat table of review records: ordered headers plus rows of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReviewTable {
    /// Builds a table from headers and rows. Rows shorter than the header are
    /// padded with empty cells so column lookups stay in bounds.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { headers, rows }
    }

    /// Reads the table from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LensError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            LensError::DatasetError(format!("Cannot read table at {}: {e}", path.display()))
        })?;
        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }
        log::info!(
            "Loaded {} records from {}",
            rows.len(),
            path.display()
        );
        Ok(Self::new(headers, rows))
    }

    /// Writes the table to a CSV file, truncating any prior content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LensError> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            LensError::DatasetError(format!("Cannot write table to {}: {e}", path.display()))
        })?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .flush()
            .map_err(|e| LensError::DatasetError(format!("Flush failed: {e}")))?;
        log::info!("Saved {} records to {}", self.rows.len(), path.display());
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell contents at (row, column name), if both exist.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// The free-text feedback column, one entry per row.
    pub fn feedback_texts(&self) -> Result<Vec<String>, LensError> {
        let col = self.column(FEEDBACK_COL).ok_or_else(|| {
            LensError::DatasetError(format!("Table is missing the {FEEDBACK_COL} column"))
        })?;
        Ok(self.rows.iter().map(|r| r[col].clone()).collect())
    }

    /// Attaches one sentiment label per row, appending the label column or
    /// replacing it in place if a previous run already added it.
    pub fn set_labels(&mut self, labels: &[Sentiment]) -> Result<(), LensError> {
        if labels.len() != self.rows.len() {
            return Err(LensError::DatasetError(format!(
                "Expected {} labels, got {}",
                self.rows.len(),
                labels.len()
            )));
        }
        match self.column(LABEL_COL) {
            Some(col) => {
                for (row, label) in self.rows.iter_mut().zip(labels) {
                    row[col] = label.as_str().to_string();
                }
            }
            None => {
                self.headers.push(LABEL_COL.to_string());
                for (row, label) in self.rows.iter_mut().zip(labels) {
                    row.push(label.as_str().to_string());
                }
            }
        }
        Ok(())
    }

    /// The first `n` rows projected onto the columns the chat page previews.
    pub fn head(&self, n: usize) -> Vec<PreviewRow> {
        self.rows
            .iter()
            .take(n)
            .enumerate()
            .map(|(i, _)| PreviewRow {
                product_name: self.cell(i, PRODUCT_COL).unwrap_or_default().to_string(),
                sentiment: self.cell(i, LABEL_COL).unwrap_or_default().to_string(),
                feedback: self.cell(i, FEEDBACK_COL).unwrap_or_default().to_string(),
            })
            .collect()
    }
}

/// One previewed record.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PreviewRow {
    pub product_name: String,
    pub sentiment: String,
    pub feedback: String,
}

/// Memoized table load keyed by file path and modification time.
///
/// The table is re-read only when the file's mtime changes. If a refresh
/// fails after a successful initial load, the last good copy keeps serving
/// and the failure is logged.
#[derive(Debug)]
pub struct CachedTable {
    path: PathBuf,
    mtime: Option<SystemTime>,
    table: ReviewTable,
}

impl CachedTable {
    /// Loads the table once; the initial load failing is fatal to the caller.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LensError> {
        let path = path.into();
        let table = ReviewTable::load(&path)?;
        let mtime = file_mtime(&path);
        Ok(Self { path, mtime, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current table, re-read from disk if the file changed underneath.
    pub fn get(&mut self) -> &ReviewTable {
        let current = file_mtime(&self.path);
        if current.is_some() && current != self.mtime {
            match ReviewTable::load(&self.path) {
                Ok(table) => {
                    log::info!("Reloaded {} after modification", self.path.display());
                    self.table = table;
                    self.mtime = current;
                }
                Err(e) => {
                    log::warn!(
                        "Keeping cached copy of {}: reload failed: {e}",
                        self.path.display()
                    );
                }
            }
        }
        &self.table
    }
}

fn file_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ReviewTable {
        ReviewTable::new(
            vec![
                "product_name".into(),
                "Customer_Feedback".into(),
                "price".into(),
            ],
            vec![
                vec!["Widget".into(), "Love it".into(), "9.99".into()],
                vec!["Gadget".into(), "Broke fast".into(), "19.99".into()],
            ],
        )
    }

    #[test]
    fn set_labels_appends_a_new_column() {
        let mut table = sample_table();
        table
            .set_labels(&[Sentiment::Positive, Sentiment::Negative])
            .unwrap();
        assert_eq!(table.headers().last().map(String::as_str), Some(LABEL_COL));
        assert_eq!(table.cell(0, LABEL_COL), Some("POSITIVE"));
        assert_eq!(table.cell(1, LABEL_COL), Some("NEGATIVE"));
    }

    #[test]
    fn set_labels_replaces_an_existing_column_in_place() {
        let mut table = sample_table();
        table
            .set_labels(&[Sentiment::Neutral, Sentiment::Neutral])
            .unwrap();
        let width = table.headers().len();
        table
            .set_labels(&[Sentiment::Positive, Sentiment::ApiError])
            .unwrap();
        assert_eq!(table.headers().len(), width);
        assert_eq!(table.cell(0, LABEL_COL), Some("POSITIVE"));
        assert_eq!(table.cell(1, LABEL_COL), Some("API_ERROR"));
    }

    #[test]
    fn set_labels_rejects_cardinality_mismatch() {
        let mut table = sample_table();
        let err = table.set_labels(&[Sentiment::Positive]).unwrap_err();
        assert!(matches!(err, LensError::DatasetError(_)));
    }

    #[test]
    fn feedback_texts_requires_the_feedback_column() {
        let table = ReviewTable::new(vec!["product_name".into()], vec![vec!["Widget".into()]]);
        let err = table.feedback_texts().unwrap_err();
        assert!(err.to_string().contains(FEEDBACK_COL));
    }

    #[test]
    fn head_projects_preview_columns() {
        let mut table = sample_table();
        table
            .set_labels(&[Sentiment::Positive, Sentiment::Negative])
            .unwrap();
        let preview = table.head(1);
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0].product_name, "Widget");
        assert_eq!(preview[0].sentiment, "POSITIVE");
        assert_eq!(preview[0].feedback, "Love it");
    }
}
