use parcel_core::db::{ensure_schema, open_db, open_db_in_memory};
use parcel_core::{Parcel, ParcelRepository, SqliteParcelRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_parcel_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(sqlite_object_count(&conn, "table", "parcel"), 1);
    assert_eq!(sqlite_object_count(&conn, "index", "idx_parcel_client"), 1);
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parcels.db");

    let number = {
        let conn = open_db(&path).unwrap();
        let store = SqliteParcelRepository::try_new(&conn).unwrap();
        store
            .add(&Parcel::new(3, "Elm St 5", "2024-01-01T00:00:00Z"))
            .unwrap()
    };

    let conn = open_db(&path).unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    assert_eq!(store.get(number).unwrap().client, 3);
}

#[test]
fn ensure_schema_leaves_existing_table_and_rows_alone() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE parcel (
            number INTEGER PRIMARY KEY AUTOINCREMENT,
            client INTEGER NOT NULL,
            status TEXT NOT NULL,
            address TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        INSERT INTO parcel (client, status, address, created_at)
        VALUES (8, 'sent', 'Elm St 5', '2024-01-01T00:00:00Z');",
    )
    .unwrap();

    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();

    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcels = store.get_by_client(8).unwrap();
    assert_eq!(parcels.len(), 1);
    assert_eq!(parcels[0].status.as_str(), "sent");
    assert_eq!(sqlite_object_count(&conn, "index", "idx_parcel_client"), 1);
}

fn sqlite_object_count(conn: &Connection, kind: &str, name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2;",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}
