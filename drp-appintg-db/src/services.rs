//! Database connection sections from the services file.
//!
//! The services file is TOML with one table per section:
//!
//! ```toml
//! [db-sqlite]
//! type = "sqlite"
//! path = "/data/desoper.db"
//! ```
//!
//! The file is located with `DES_SERVICES` if set, otherwise
//! `~/.desservices.toml`. The section comes from the command line, falling
//! back to `DES_DB_SECTION`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::DbError;

/// Env var naming the services file.
pub const SERVICES_ENV: &str = "DES_SERVICES";

/// Env var naming the default section.
pub const SECTION_ENV: &str = "DES_DB_SECTION";

const SERVICES_FILE_NAME: &str = ".desservices.toml";

/// One `[section]` of the services file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceSection {
    /// Database driver; only `sqlite` is supported
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub path: PathBuf,
}

fn default_kind() -> String {
    "sqlite".to_string()
}

/// Where the services file is expected.
pub fn services_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os(SERVICES_ENV)
        && !p.is_empty()
    {
        return Some(PathBuf::from(p));
    }
    dirs::home_dir().map(|home| home.join(SERVICES_FILE_NAME))
}

/// Pick the section name: explicit argument first, then `DES_DB_SECTION`.
pub fn resolve_section(explicit: Option<&str>) -> Result<String, DbError> {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(SECTION_ENV).ok())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            DbError::config(format!(
                "no database section given; pass --section or set {SECTION_ENV}"
            ))
        })
}

/// Read `section` from the services file at `path`.
pub fn load_section(path: &Path, section: &str) -> Result<ServiceSection, DbError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DbError::config(format!("cannot read services file {}: {e}", path.display()))
    })?;
    let mut sections: BTreeMap<String, ServiceSection> = toml::from_str(&contents)?;

    let found = sections.remove(section).ok_or_else(|| {
        DbError::config(format!(
            "section '{section}' not found in {} (have: {})",
            path.display(),
            sections.keys().cloned().collect::<Vec<_>>().join(", ")
        ))
    })?;

    if !found.kind.eq_ignore_ascii_case("sqlite") {
        return Err(DbError::config(format!(
            "section '{section}' has unsupported database type '{}'",
            found.kind
        )));
    }

    // Relative database paths are taken relative to the services file.
    if found.path.is_relative()
        && let Some(dir) = path.parent()
    {
        return Ok(ServiceSection {
            path: dir.join(&found.path),
            ..found
        });
    }
    Ok(found)
}
