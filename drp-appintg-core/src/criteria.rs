//! Selection criteria for the processccd input query.

use std::collections::HashSet;

use crate::error::QueryError;
use crate::util::{is_reason_code, is_safe_literal, is_sql_identifier};

/// Raw image filetype selected when none is given.
pub const DEFAULT_RAW_FILETYPE: &str = "hsc_raw";

/// Image columns selected when none are given.
pub const DEFAULT_RAW_FIELDS: &[&str] = &[
    "filename", "filter", "visit", "ccd", "pointing", "dateobs", "field",
];

/// Calibration columns selected when none are given.
pub const DEFAULT_CALIB_FIELDS: &[&str] = &["filename", "filter", "ccd", "filetype", "calib_date"];

/// Which raw images and calibrations to retrieve for one tract.
///
/// Empty lists and `None` mean "no constraint". Build one with [`SelectionCriteria::new`]
/// and adjust the public fields; [`SelectionCriteria::validate`] is run by the query
/// builder before any SQL is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub tract: i64,
    pub raw_filetype: String,
    pub overlap_version: String,
    pub calib_version: String,
    /// Image columns, in select-list order. Must contain `filename`.
    pub raw_fields: Vec<String>,
    /// Calibration columns, in select-list order. Must contain `filename` and `filetype`.
    pub calib_fields: Vec<String>,
    /// Must match the patch string format of the overlap table
    pub patch: Option<String>,
    pub filters: Vec<String>,
    pub visits: Vec<String>,
    pub ccd: Option<String>,
    pub visit_tags: Vec<String>,
    /// Drop images that have any blacklist entry
    pub blacklist_excluded: bool,
    /// Drop images blacklisted with one of these reason codes
    pub blacklist_codes: Vec<String>,
}

impl SelectionCriteria {
    /// Criteria with the default filetype and field lists and no optional constraints.
    pub fn new(
        tract: i64,
        overlap_version: impl Into<String>,
        calib_version: impl Into<String>,
    ) -> Self {
        Self {
            tract,
            raw_filetype: DEFAULT_RAW_FILETYPE.to_string(),
            overlap_version: overlap_version.into(),
            calib_version: calib_version.into(),
            raw_fields: DEFAULT_RAW_FIELDS.iter().map(|s| s.to_string()).collect(),
            calib_fields: DEFAULT_CALIB_FIELDS.iter().map(|s| s.to_string()).collect(),
            patch: None,
            filters: Vec::new(),
            visits: Vec::new(),
            ccd: None,
            visit_tags: Vec::new(),
            blacklist_excluded: true,
            blacklist_codes: Vec::new(),
        }
    }

    /// Check field lists and set-membership values.
    ///
    /// Set-membership values end up as SQL literals rather than bound parameters,
    /// so they are held to an allow-list: filters, visits and visit tags may only
    /// use `[A-Za-z0-9_.+-]`, reason codes must be integers.
    pub fn validate(&self) -> Result<(), QueryError> {
        check_fields("raw", &self.raw_fields, &["filename"])?;
        check_fields("calibration", &self.calib_fields, &["filename", "filetype"])?;

        check_literals("filter", &self.filters)?;
        check_literals("visit", &self.visits)?;
        check_literals("visit tag", &self.visit_tags)?;

        if let Some(bad) = self.blacklist_codes.iter().find(|c| !is_reason_code(c)) {
            return Err(QueryError::configuration(format!(
                "blacklist reason code '{bad}' is not an integer"
            )));
        }

        Ok(())
    }
}

fn check_fields(kind: &str, fields: &[String], required: &[&str]) -> Result<(), QueryError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !is_sql_identifier(field) {
            return Err(QueryError::configuration(format!(
                "{kind} field '{field}' is not a valid column name"
            )));
        }
        if !seen.insert(field.as_str()) {
            return Err(QueryError::configuration(format!(
                "{kind} field '{field}' is listed more than once"
            )));
        }
    }
    for name in required {
        if !seen.contains(name) {
            return Err(QueryError::configuration(format!(
                "{kind} fields must include '{name}'"
            )));
        }
    }
    Ok(())
}

fn check_literals(kind: &str, values: &[String]) -> Result<(), QueryError> {
    match values.iter().find(|v| !is_safe_literal(v)) {
        Some(bad) => Err(QueryError::configuration(format!(
            "{kind} value '{bad}' contains characters outside [A-Za-z0-9_.+-]"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/criteria_tests.rs"]
mod tests;
