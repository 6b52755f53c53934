//! Groups flat query rows into per-image records and flattens them into lines.
//!
//! Each result row carries one raw image and one calibration product. Rows are
//! grouped by image filename; every image gets a `raw` sub-record plus one
//! sub-record per calibration filetype. Both the image map and the label set keep
//! insertion order, which fixes the output line order and column order.

use indexmap::{IndexMap, IndexSet};

use crate::error::QueryError;
use crate::value::{FieldValue, ResultRow, SubRecord};

/// Label of the raw image sub-record. Always the first label.
pub const RAW_LABEL: &str = "raw";

/// Key under which every sub-record carries its image's filename.
pub const IMGNAME_KEY: &str = "imgname";

const IMG_PREFIX: &str = "img_";
const CALIB_PREFIX: &str = "calib_";

/// All files matched to one raw image, keyed by file label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageRecord {
    files: IndexMap<String, SubRecord>,
}

impl ImageRecord {
    pub fn raw(&self) -> Option<&SubRecord> {
        self.files.get(RAW_LABEL)
    }

    pub fn get(&self, label: &str) -> Option<&SubRecord> {
        self.files.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Store `record` under `label`, returning the sub-record it replaced.
    fn insert(&mut self, label: String, record: SubRecord) -> Option<SubRecord> {
        self.files.insert(label, record)
    }
}

/// Every file label seen in a result set, in first-seen order, starting with `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabelSet(IndexSet<String>);

impl FileLabelSet {
    pub fn new() -> Self {
        let mut labels = IndexSet::new();
        labels.insert(RAW_LABEL.to_string());
        Self(labels)
    }

    /// Add `label` at the end if it has not been seen. Returns true if it was new.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.0.insert(label.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl Default for FileLabelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Result rows grouped by image filename.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reshaped {
    pub images: IndexMap<String, ImageRecord>,
    pub labels: FileLabelSet,
}

impl Reshaped {
    pub fn flatten(&self) -> Result<Vec<Vec<SubRecord>>, QueryError> {
        flatten(&self.images, &self.labels)
    }
}

/// Group normalized rows by `img_filename`.
///
/// The first row for a filename creates its `raw` sub-record from the `img_`
/// columns named in `raw_fields`. Every row adds a calibration sub-record from
/// the `calib_` columns named in `calib_fields`, stored under its `filetype`
/// value. A second row with the same filename and filetype replaces the first.
pub fn reshape<I>(
    rows: I,
    raw_fields: &[String],
    calib_fields: &[String],
) -> Result<Reshaped, QueryError>
where
    I: IntoIterator<Item = ResultRow>,
{
    let mut reshaped = Reshaped::default();

    for (index, row) in rows.into_iter().enumerate() {
        let filename = match row.get("img_filename") {
            Some(value) if !value.is_sentinel() && !value.is_null() => value.to_string(),
            _ => {
                return Err(QueryError::malformed_row(format!(
                    "row {index} has no img_filename"
                )));
            }
        };

        let record = match reshaped.images.entry(filename.clone()) {
            indexmap::map::Entry::Occupied(entry) => entry.into_mut(),
            indexmap::map::Entry::Vacant(entry) => {
                let raw = project(&row, index, &filename, IMG_PREFIX, raw_fields)?;
                let record = entry.insert(ImageRecord::default());
                record.insert(RAW_LABEL.to_string(), raw);
                record
            }
        };

        let calib = project(&row, index, &filename, CALIB_PREFIX, calib_fields)?;
        let label = match calib.get("filetype") {
            Some(value) if !value.is_sentinel() && !value.is_null() => value.to_string(),
            _ => {
                return Err(QueryError::malformed_row(format!(
                    "row {index} for image '{filename}' has no calib_filetype"
                )));
            }
        };

        if record.insert(label.clone(), calib).is_some() {
            log::warn!("Image '{filename}' matched more than one '{label}' file; keeping the last");
        }
        reshaped.labels.insert(label);
    }

    log::debug!(
        "reshaped into {} image(s) with labels {:?}",
        reshaped.images.len(),
        reshaped.labels.to_vec()
    );
    Ok(reshaped)
}

/// Pull `<prefix><field>` out of `row` for each field, plus the image name.
fn project(
    row: &ResultRow,
    index: usize,
    filename: &str,
    prefix: &str,
    fields: &[String],
) -> Result<SubRecord, QueryError> {
    let mut record = SubRecord::new();
    record.insert(IMGNAME_KEY.to_string(), FieldValue::text(filename));
    for field in fields {
        let column = format!("{prefix}{field}");
        let value = row
            .get(&column)
            .ok_or_else(|| QueryError::malformed_row(format!("row {index} has no {column}")))?;
        record.insert(field.clone(), value.clone());
    }
    Ok(record)
}

/// One line per image, holding its sub-record for each label in `labels` order.
///
/// Fails with [`QueryError::ShapeMismatch`] if an image lacks a label that
/// another image has; missing calibrations are never padded.
pub fn flatten(
    images: &IndexMap<String, ImageRecord>,
    labels: &FileLabelSet,
) -> Result<Vec<Vec<SubRecord>>, QueryError> {
    images
        .iter()
        .map(|(filename, record)| {
            labels
                .iter()
                .map(|label| {
                    record
                        .get(label)
                        .cloned()
                        .ok_or_else(|| QueryError::ShapeMismatch {
                            filename: filename.clone(),
                            label: label.to_string(),
                        })
                })
                .collect()
        })
        .collect()
}
