//! Table layout the calibration query reads from.
//!
//! Production databases are maintained elsewhere; this schema exists so the
//! query can be run against a local SQLite file or an in-memory database.

use rusqlite::Connection;

use crate::connection::CalibDb;
use crate::error::DbError;

/// Create all query tables if they don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<CalibDb, DbError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    CalibDb::from_connection(conn)
}

/// Tables referenced by the calibration query.
pub const TABLES: &[&str] = &[
    "image",
    "calibration",
    "ops_calibration_lookup",
    "ccd_overlap_patch",
    "visit_tag",
    "blacklist",
];

const SCHEMA_SQL: &str = r#"
-- Raw and processed images
CREATE TABLE IF NOT EXISTS image (
    filename TEXT PRIMARY KEY,
    filetype TEXT NOT NULL,
    filter TEXT,
    visit INTEGER NOT NULL,
    ccd INTEGER NOT NULL,
    pointing INTEGER,
    dateobs TEXT,
    field TEXT
);

CREATE INDEX IF NOT EXISTS idx_image_visit_ccd ON image(visit, ccd);

-- Calibration products (bias, dark, flat, fringe, ...)
CREATE TABLE IF NOT EXISTS calibration (
    filename TEXT PRIMARY KEY,
    filetype TEXT NOT NULL,
    filter TEXT,
    ccd INTEGER NOT NULL,
    calib_date TEXT
);

-- Validity windows for each calibration file, per calibration version
CREATE TABLE IF NOT EXISTS ops_calibration_lookup (
    filename TEXT NOT NULL,
    version TEXT NOT NULL,
    min_date TEXT NOT NULL,
    max_date TEXT NOT NULL,
    PRIMARY KEY (filename, version)
);

-- Which visit/ccd pairs overlap which tract/patch, per overlap version
CREATE TABLE IF NOT EXISTS ccd_overlap_patch (
    tract INTEGER NOT NULL,
    patch TEXT NOT NULL,
    visit INTEGER NOT NULL,
    ccd INTEGER NOT NULL,
    version TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_overlap_tract ON ccd_overlap_patch(version, tract);

CREATE TABLE IF NOT EXISTS visit_tag (
    visit INTEGER NOT NULL,
    ccd INTEGER NOT NULL,
    tag TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS blacklist (
    visit INTEGER NOT NULL,
    ccd INTEGER NOT NULL,
    reason_code INTEGER
);
"#;
