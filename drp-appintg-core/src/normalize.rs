//! NULL handling for result rows.
//!
//! The line-based output formats have no way to express NULL, so every NULL is
//! rewritten to a text marker that the downstream reader understands. This must
//! happen before reshaping and must not be replaced with an empty string.

use crate::value::{FieldValue, ResultRow};

/// Text written in place of a database NULL.
pub const NULL_SENTINEL: &str = "__KEEP__NONE__";

/// Replace every NULL column in `row` with [`NULL_SENTINEL`].
pub fn normalize(mut row: ResultRow) -> ResultRow {
    for value in row.values_mut() {
        if value.is_null() {
            *value = FieldValue::text(NULL_SENTINEL);
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_becomes_sentinel() {
        let mut row = ResultRow::new();
        row.insert("img_filename".into(), FieldValue::text("img1.fits"));
        row.insert("calib_filter".into(), FieldValue::Null);
        row.insert("img_visit".into(), FieldValue::Int(1228));
        row.insert("img_pointing".into(), FieldValue::Float(1.5));

        let row = normalize(row);
        assert_eq!(row["calib_filter"], FieldValue::text(NULL_SENTINEL));
        assert!(row["calib_filter"].is_sentinel());
        assert_eq!(row["img_filename"], FieldValue::text("img1.fits"));
        assert_eq!(row["img_visit"], FieldValue::Int(1228));
        assert_eq!(row["img_pointing"], FieldValue::Float(1.5));
    }

    #[test]
    fn test_column_order_preserved() {
        let mut row = ResultRow::new();
        row.insert("b".into(), FieldValue::Null);
        row.insert("a".into(), FieldValue::Int(1));
        let keys: Vec<_> = normalize(row).keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_string_is_not_null() {
        let mut row = ResultRow::new();
        row.insert("calib_filter".into(), FieldValue::text(""));
        assert_eq!(normalize(row)["calib_filter"], FieldValue::text(""));
    }
}
