//! SQLite execution layer for the processccd input query.
//!
//! Provides the connection handle that runs a built [`QuerySpec`], the Oracle
//! `to_date` shim the query relies on, services-file lookup for connection
//! sections, and the table layout for local and in-memory databases.
//!
//! [`QuerySpec`]: drp_appintg_core::QuerySpec

pub mod connection;
pub mod dialect;
pub mod error;
pub mod schema;
pub mod services;

pub use connection::CalibDb;
pub use error::DbError;
pub use schema::{create_schema, open_memory};
pub use services::{ServiceSection, load_section, resolve_section, services_path};
