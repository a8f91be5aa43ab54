use record_sqlite::{ColumnDef, ColumnType, Params, Record, StoreError, TableStore, Value};
use tempfile::TempDir;
use uuid::Uuid;

// A second record type, to exercise the generic layer with a schema the
// crate does not ship.
#[derive(Debug, Clone, PartialEq)]
struct Note {
    id: String,
    title: String,
    priority: i64,
}

impl Record for Note {
    const TABLE: &'static str = "Note";

    fn blank(id: String) -> Self {
        Self {
            id,
            title: String::new(),
            priority: 0,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

fn create_temp_store() -> (TableStore<Note>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = TableStore::new(dir.path().join("notes.db"));
    store
        .create_table(&[
            ColumnDef::new("Title", ColumnType::Text),
            ColumnDef::new("Priority", ColumnType::Integer),
        ])
        .unwrap();
    (store, dir)
}

fn insert_note(store: &TableStore<Note>, title: &str, priority: i64) -> Note {
    let mut note = store.new_record();
    note.title = title.to_string();
    note.priority = priority;
    store
        .insert(
            Params::new()
                .with_value("ID", note.id.as_str())
                .with_value("Title", note.title.as_str())
                .with_value("Priority", note.priority),
        )
        .unwrap();
    note
}

#[test]
fn fresh_records_get_unique_uuid_identifiers() {
    let (store, _dir) = create_temp_store();

    let a = store.new_record();
    let b = store.new_record();
    assert_ne!(a.id(), b.id());
    assert!(Uuid::parse_str(a.id()).is_ok());

    // Allocation alone persists nothing.
    assert_eq!(store.count().unwrap(), 0);
    assert!(a.title.is_empty());
}

#[test]
fn insert_and_materialize_rows() {
    let (store, _dir) = create_temp_store();
    let note = insert_note(&store, "groceries", 2);

    let table = store
        .execute_query("SELECT ID, Title, Priority FROM Note", &Params::new())
        .unwrap();
    assert_eq!(table.columns, vec!["ID", "Title", "Priority"]);
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows[0],
        vec![
            Value::Text(note.id.clone()),
            Value::Text("groceries".to_string()),
            Value::Integer(2),
        ]
    );
}

#[test]
fn scalar_query_with_named_parameter() {
    let (store, _dir) = create_temp_store();
    insert_note(&store, "low", 1);
    insert_note(&store, "high", 5);

    let above: i64 = store
        .execute_scalar(
            "SELECT COUNT(*) FROM Note WHERE Priority >= :min",
            &Params::new().with_value("min", 3),
        )
        .unwrap();
    assert_eq!(above, 1);
}

#[test]
fn create_table_is_idempotent() {
    let (store, _dir) = create_temp_store();
    insert_note(&store, "kept", 1);

    store
        .create_table(&[
            ColumnDef::new("Title", ColumnType::Text),
            ColumnDef::new("Priority", ColumnType::Integer),
        ])
        .unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn missing_table_surfaces_driver_error() {
    let dir = tempfile::tempdir().unwrap();
    let store: TableStore<Note> = TableStore::new(dir.path().join("empty.db"));

    // No create_table call; the COUNT must fail with the driver's error.
    match store.count() {
        Err(StoreError::Database(_)) => {}
        other => panic!("expected database error, got {other:?}"),
    }
}

#[test]
fn duplicate_primary_key_is_rejected() {
    let (store, _dir) = create_temp_store();
    let note = insert_note(&store, "original", 1);

    let result = store.insert(
        Params::new()
            .with_value("ID", note.id.as_str())
            .with_value("Title", "imposter")
            .with_value("Priority", 9),
    );
    assert!(matches!(result, Err(StoreError::Database(_))));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn value_conversions() {
    assert_eq!(Value::from("text"), Value::Text("text".to_string()));
    assert_eq!(Value::from(7i32), Value::Integer(7));
    assert_eq!(Value::from(1.5f64), Value::Real(1.5));
    assert_eq!(Value::Text("x".into()).as_text(), Some("x"));
    assert_eq!(Value::Integer(1).as_text(), None);
}
