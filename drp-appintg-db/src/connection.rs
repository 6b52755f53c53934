//! Connection handle and query execution.

use std::path::Path;

use drp_appintg_core::{BindPlaceholder, FieldValue, QuerySpec, ResultRow, normalize};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OpenFlags, ToSql};

use crate::dialect::register_functions;
use crate::error::DbError;
use crate::services::{load_section, resolve_section, services_path};

/// A database connection ready to run the calibration query.
///
/// Every connection gets the `to_date` function registered, see
/// [`crate::dialect`].
pub struct CalibDb {
    conn: Connection,
}

impl CalibDb {
    /// Connect using a section of the services file.
    ///
    /// `section` falls back to `DES_DB_SECTION` when `None`.
    pub fn connect(section: Option<&str>) -> Result<Self, DbError> {
        let path = services_path()
            .ok_or_else(|| DbError::config("could not determine services file location"))?;
        Self::connect_with(&path, section)
    }

    /// Connect using a section of the services file at `services`.
    pub fn connect_with(services: &Path, section: Option<&str>) -> Result<Self, DbError> {
        let section = resolve_section(section)?;
        let service = load_section(services, &section)?;
        log::debug!(
            "connecting to section '{}' ({})",
            section,
            service.path.display()
        );
        Self::open(&service.path)
    }

    /// Open an existing SQLite database read-only.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::from_connection(conn)
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Result<Self, DbError> {
        register_functions(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run `spec` and return every row, NULLs already replaced by the sentinel.
    ///
    /// Column names are lower-cased. The full result set is read into memory.
    pub fn execute(&self, spec: &QuerySpec) -> Result<Vec<ResultRow>, DbError> {
        let mut stmt = self.conn.prepare(&spec.sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|name| name.to_lowercase())
            .collect();

        let values: Vec<(String, Value)> = spec
            .binds
            .iter()
            .map(|(name, value)| (self.bind_placeholder(name), to_sql_value(value)))
            .collect();
        let params: Vec<(&str, &dyn ToSql)> = values
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect();

        let mut rows = stmt.query(params.as_slice())?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut out = ResultRow::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                let value = match row.get_ref(idx)? {
                    ValueRef::Null => FieldValue::Null,
                    ValueRef::Integer(v) => FieldValue::Int(v),
                    ValueRef::Real(v) => FieldValue::Float(v),
                    ValueRef::Text(bytes) => {
                        FieldValue::Text(String::from_utf8_lossy(bytes).into_owned())
                    }
                    ValueRef::Blob(_) => return Err(DbError::UnsupportedColumn(column.clone())),
                };
                out.insert(column.clone(), value);
            }
            result.push(normalize(out));
        }

        log::debug!("query returned {} row(s)", result.len());
        Ok(result)
    }
}

impl BindPlaceholder for CalibDb {
    fn bind_placeholder(&self, name: &str) -> String {
        format!(":{name}")
    }
}

fn to_sql_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Int(v) => Value::Integer(*v),
        FieldValue::Float(v) => Value::Real(*v),
        FieldValue::Text(v) => Value::Text(v.clone()),
    }
}
