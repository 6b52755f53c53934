//! Oracle date functions for SQLite.
//!
//! The calibration query compares `to_date(i.dateobs, 'YYYY-MM-DD')` against the
//! lookup table's validity window. SQLite has no `to_date`, so one is registered
//! on every connection. It returns ISO text, which compares correctly against
//! ISO `min_date`/`max_date` columns.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

/// Register `to_date(text, format)` on `conn`.
///
/// NULL input gives NULL. Text that does not match the format is an error, so
/// the whole query fails instead of silently dropping rows.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "to_date",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            let format: String = ctx.get(1)?;
            match value {
                Some(value) => to_date(&value, &format)
                    .map(Some)
                    .map_err(|e| rusqlite::Error::UserFunctionError(e.into())),
                None => Ok(None),
            }
        },
    )
}

/// Parse `value` with an Oracle-style `format` and return ISO text.
///
/// Date-only formats give `YYYY-MM-DD`; formats with time fields give
/// `YYYY-MM-DD HH:MM:SS`.
pub fn to_date(value: &str, format: &str) -> Result<String, String> {
    let chrono_format = oracle_to_chrono(format);
    if chrono_format.contains("%H") || chrono_format.contains("%M") || chrono_format.contains("%S")
    {
        NaiveDateTime::parse_from_str(value.trim(), &chrono_format)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .map_err(|e| format!("to_date('{value}', '{format}'): {e}"))
    } else {
        NaiveDate::parse_from_str(value.trim(), &chrono_format)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|e| format!("to_date('{value}', '{format}'): {e}"))
    }
}

/// Translate Oracle date format elements to chrono's strftime syntax.
fn oracle_to_chrono(format: &str) -> String {
    const ELEMENTS: &[(&str, &str)] = &[
        ("HH24", "%H"),
        ("YYYY", "%Y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("MI", "%M"),
        ("SS", "%S"),
    ];

    let upper = format.to_ascii_uppercase();
    let mut out = String::with_capacity(format.len() + 4);
    let mut pos = 0;
    'outer: while pos < upper.len() {
        for (oracle, chrono) in ELEMENTS {
            if upper[pos..].starts_with(oracle) {
                out.push_str(chrono);
                pos += oracle.len();
                continue 'outer;
            }
        }
        let ch = format[pos..].chars().next().unwrap_or_default();
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        pos += ch.len_utf8().max(1);
    }
    out
}
