//! The `Person` record and its typed access layer.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::record::Record;
use crate::sqlite::{ColumnDef, ColumnType, Params, TableStore, Value};

/// Storage format for `Birthdate` values.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One person, backed by one row of the `Person` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDateTime,
}

impl Record for Person {
    const TABLE: &'static str = "Person";

    fn blank(id: String) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            birthdate: NaiveDateTime::UNIX_EPOCH,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Typed access to the `Person` table.
pub struct PersonStore {
    table: TableStore<Person>,
}

impl PersonStore {
    /// Open a store against the given database file, creating the `Person`
    /// table if it does not exist yet. Safe to call repeatedly: an existing
    /// table and its rows are left untouched.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let table = TableStore::new(db_path);
        table.create_table(&[
            ColumnDef::new("FirstName", ColumnType::Text),
            ColumnDef::new("LastName", ColumnType::Text),
            ColumnDef::new("Birthdate", ColumnType::DateTime),
        ])?;
        Ok(Self { table })
    }

    /// Allocate a person with a fresh identifier, persist it as one row,
    /// and return the in-memory instance.
    pub fn create(
        &self,
        first_name: &str,
        last_name: &str,
        birthdate: NaiveDateTime,
    ) -> Result<Person> {
        let mut person = self.table.new_record();
        person.first_name = first_name.to_string();
        person.last_name = last_name.to_string();
        person.birthdate = birthdate;

        self.table.insert(
            Params::new()
                .with_value("ID", person.id.as_str())
                .with_value("FirstName", person.first_name.as_str())
                .with_value("LastName", person.last_name.as_str())
                .with_value(
                    "Birthdate",
                    person.birthdate.format(DATETIME_FORMAT).to_string(),
                ),
        )?;
        Ok(person)
    }

    /// Number of persisted persons.
    pub fn count(&self) -> Result<i64> {
        self.table.count()
    }

    /// Scan the whole table, producing one person per row.
    ///
    /// The query runs (and the result set is fetched) up front; each row's
    /// `Birthdate` text is parsed only when that element is pulled, so a
    /// malformed stored value fails at its own row, after any rows before
    /// it. The iterator is single-pass and finite; call `all` again for a
    /// fresh scan.
    pub fn all(&self) -> Result<impl Iterator<Item = Result<Person>>> {
        let table = self.table.execute_query(
            "SELECT ID, FirstName, LastName, Birthdate FROM Person",
            &Params::new(),
        )?;
        Ok(table.into_rows().map(person_from_row))
    }
}

fn person_from_row(row: Vec<Value>) -> Result<Person> {
    let mut fields = row.into_iter();
    let id = text(fields.next(), "ID")?;
    let first_name = text(fields.next(), "FirstName")?;
    let last_name = text(fields.next(), "LastName")?;
    let raw = text(fields.next(), "Birthdate")?;
    let birthdate =
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(|source| {
            StoreError::Timestamp {
                column: "Birthdate",
                value: raw,
                source,
            }
        })?;
    Ok(Person {
        id,
        first_name,
        last_name,
        birthdate,
    })
}

fn text(value: Option<Value>, column: &'static str) -> Result<String> {
    match value {
        Some(Value::Text(s)) => Ok(s),
        _ => Err(StoreError::Decode {
            column,
            expected: "TEXT",
        }),
    }
}
