//! Generic SQLite table access.
//!
//! [`TableStore`] is parameterized over a [`Record`] type and issues SQL
//! against that type's logical table without knowing any concrete field
//! names. Every operation opens a fresh connection against the stored
//! database path and releases it when the call returns, on success and
//! failure alike.

use std::marker::PhantomData;
use std::path::PathBuf;

use rusqlite::types::FromSql;
use rusqlite::{Connection, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::record::Record;

/// Core value types for SQLite operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Borrow the contained text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<rusqlite::types::Value> for Value {
    fn from(v: rusqlite::types::Value) -> Self {
        use rusqlite::types::Value as Sql;
        match v {
            Sql::Null => Value::Null,
            Sql::Integer(i) => Value::Integer(i),
            Sql::Real(f) => Value::Real(f),
            Sql::Text(s) => Value::Text(s),
            Sql::Blob(b) => Value::Blob(b),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput, Value as Sql, ValueRef};
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(Sql::Null),
            Value::Integer(i) => ToSqlOutput::Owned(Sql::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(Sql::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

/// Parameter bindings for SQL statements.
///
/// Pairs are kept in insertion order: when used to build an INSERT, the
/// order determines the generated column list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    values: Vec<(String, Value)>,
}

impl Params {
    /// Create a new Params object
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.push((name.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn pairs(&self) -> &[(String, Value)] {
        &self.values
    }

    // rusqlite wants the `:name` prefix on the binding side as well.
    fn keys(&self) -> Vec<String> {
        self.values.iter().map(|(n, _)| format!(":{n}")).collect()
    }

    fn bind<'a>(&'a self, keys: &'a [String]) -> Vec<(&'a str, &'a dyn ToSql)> {
        keys.iter()
            .map(String::as_str)
            .zip(self.values.iter().map(|(_, v)| v as &dyn ToSql))
            .collect()
    }
}

/// Declared SQLite column types for table creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    DateTime,
    Integer,
    Real,
    Blob,
}

impl ColumnType {
    fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Blob => "BLOB",
        }
    }
}

/// One column of a table definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Fully materialized result of a tabular query.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DataTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the table, yielding one owned value vector per row.
    pub fn into_rows(self) -> std::vec::IntoIter<Vec<Value>> {
        self.rows.into_iter()
    }
}

/// Generic data access for one record type's logical table.
///
/// Holds only the database file path; no connection, statement, or cache
/// survives between calls.
#[derive(Debug, Clone)]
pub struct TableStore<R: Record> {
    db_path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: Record> TableStore<R> {
    /// Create a store targeting the given SQLite database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            _record: PhantomData,
        }
    }

    /// Allocate a fresh in-memory record with a newly generated identifier.
    /// Nothing is persisted.
    pub fn new_record(&self) -> R {
        R::blank(Uuid::new_v4().to_string())
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Execute a statement expected to return exactly one value.
    pub fn execute_scalar<T: FromSql>(&self, sql: &str, params: &Params) -> Result<T> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let keys = params.keys();
        let value = stmt.query_row(&params.bind(&keys)[..], |row| row.get(0))?;
        Ok(value)
    }

    /// Execute a statement expected to return a row set, materializing the
    /// full result before returning.
    pub fn execute_query(&self, sql: &str, params: &Params) -> Result<DataTable> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let keys = params.keys();
        let mut rows = stmt.query(&params.bind(&keys)[..])?;
        let mut table = DataTable {
            columns,
            rows: Vec::new(),
        };
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(table.columns.len());
            for i in 0..table.columns.len() {
                let value: rusqlite::types::Value = row.get(i)?;
                values.push(value.into());
            }
            table.rows.push(values);
        }
        Ok(table)
    }

    /// Execute a side-effecting statement (create, insert).
    pub fn execute_non_query(&self, sql: &str, params: &Params) -> Result<()> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let keys = params.keys();
        stmt.execute(&params.bind(&keys)[..])?;
        Ok(())
    }

    /// Count all rows in the logical table.
    pub fn count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", R::TABLE);
        self.execute_scalar(&sql, &Params::new())
    }

    /// Create the logical table if it does not already exist. The fixed
    /// `ID` primary key column comes first, then the given columns in order.
    pub fn create_table(&self, columns: &[ColumnDef]) -> Result<()> {
        let mut defs = vec!["ID VARCHAR(40) PRIMARY KEY".to_string()];
        defs.extend(
            columns
                .iter()
                .map(|c| format!("\"{}\" {}", c.name, c.data_type.as_sql())),
        );
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
            R::TABLE,
            defs.join(", ")
        );
        tracing::debug!(table = R::TABLE, "ensuring table exists");
        self.execute_non_query(&sql, &Params::new())
    }

    /// Insert one row, naming exactly the given columns in their given order.
    pub fn insert(&self, values: Params) -> Result<()> {
        let columns: Vec<String> = values
            .pairs()
            .iter()
            .map(|(n, _)| format!("\"{n}\""))
            .collect();
        let placeholders: Vec<String> = values
            .pairs()
            .iter()
            .map(|(n, _)| format!(":{n}"))
            .collect();
        let sql = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            R::TABLE,
            columns.join(", "),
            placeholders.join(", ")
        );
        tracing::debug!(table = R::TABLE, "inserting row");
        self.execute_non_query(&sql, &values)
    }
}
