//! SQLite-backed generic record storage.
//!
//! # Intention
//!
//! - Provide a small, synchronous data-access layer over one SQLite file.
//! - Keep the generic plumbing (parameter binding, table creation, row
//!   insertion, result materialization) independent of any concrete record
//!   type; concrete types plug in through the [`Record`] trait.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here; no business logic.
//! - Every operation opens its own connection and releases it on return;
//!   no pooling, no transactions, no shared mutable state across calls.

pub mod error;
pub mod person;
pub mod record;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use person::{Person, PersonStore, DATETIME_FORMAT};
pub use record::Record;
pub use sqlite::{ColumnDef, ColumnType, DataTable, Params, TableStore, Value};
