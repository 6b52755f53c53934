use indexmap::IndexMap;
use serde::Serialize;

use drp_appintg_core::SubRecord;

use crate::OutputError;

/// One output line: the files for a single image, keyed by file label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub number: usize,
    pub files: IndexMap<String, SubRecord>,
}

impl Line {
    /// Block name for this line, e.g. `line00001`.
    pub fn name(&self) -> String {
        format!("line{:05}", self.number)
    }
}

/// Pair each row's sub-records with `labels` and number the lines from `start_index`.
///
/// Every row must hold exactly one sub-record per label.
pub fn convert_multiple_files_to_lines(
    rows: Vec<Vec<SubRecord>>,
    labels: &[String],
    start_index: usize,
) -> Result<Vec<Line>, OutputError> {
    rows.into_iter()
        .enumerate()
        .map(|(offset, row)| {
            let number = start_index + offset;
            if row.len() != labels.len() {
                return Err(OutputError::LabelCount {
                    line: number,
                    expected: labels.len(),
                    found: row.len(),
                });
            }
            let files = labels.iter().cloned().zip(row).collect();
            Ok(Line { number, files })
        })
        .collect()
}
