#[cfg(test)]
mod tests {
    use slate_core::{Code, Error};
    use slate_sqlite::{Connection, OpenFlags};
    use slate_tests::{init_logs, silent_logs};
    use std::{fs, path::Path, sync::Mutex, thread};

    static MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        let connection = Connection::connect(&format!("sqlite://{}?mode=rwc", DB_PATH))
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        let path = connection.path().expect("A file database has a path");
        assert!(path.ends_with("creation.sqlite"), "Unexpected path {path}");
        connection
            .execute_batch("CREATE TABLE numbers (value INTEGER); INSERT INTO numbers VALUES (1);")
            .expect("Could not create the table");
        drop(connection);

        let connection = Connection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
            .expect("Could not open the database");
        let error = silent_logs! { connection.execute_batch("INSERT INTO numbers VALUES (2)") }
            .expect_err("A read only database must reject writes");
        assert_eq!(error.code(), Some(Code::ReadOnly));
        drop(connection);

        fs::remove_file(DB_PATH)
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        let error = silent_logs! { Connection::connect(&format!("sqlite://{}?mode=ro", DB_PATH)) }
            .err()
            .expect("Should not be able to open in read only unexisting database");
        assert_eq!(error.code(), Some(Code::CannotOpen));
    }

    #[test]
    fn open_with_flags() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/flags.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        let error = silent_logs! { Connection::open_with_flags(DB_PATH, OpenFlags::READ_WRITE) }
            .err()
            .expect("Opening a missing file without CREATE must fail");
        assert_eq!(error.code(), Some(Code::CannotOpen));
        assert!(!Path::new(DB_PATH).exists());

        let flags = OpenFlags::READ_WRITE | OpenFlags::CREATE;
        assert!(flags.contains(OpenFlags::CREATE));
        assert!(!flags.contains(OpenFlags::READ_ONLY));
        assert_eq!(flags, OpenFlags::default());
        Connection::open_with_flags(DB_PATH, flags).expect("Could not create the database");
        assert!(Path::new(DB_PATH).exists());
        Connection::open(DB_PATH).expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
    }

    #[test]
    fn in_memory_databases_are_private() {
        init_logs();
        let first = Connection::open_in_memory().expect("Could not open the database");
        let second = Connection::open_in_memory().expect("Could not open the database");
        first
            .execute_batch("CREATE TABLE private (id INTEGER)")
            .expect("Could not create the table");
        let error = silent_logs! { second.prepare("SELECT * FROM private") }
            .err()
            .expect("The table must not exist on the other database");
        assert!(error.to_string().contains("no such table"), "{error}");
    }

    #[test]
    fn connection_moves_across_threads() {
        init_logs();
        let connection = Connection::open_in_memory().expect("Could not open the database");
        connection
            .execute_batch("CREATE TABLE moved (id INTEGER); INSERT INTO moved VALUES (7);")
            .expect("Could not create the table");
        let value = thread::spawn(move || {
            let mut statement = connection
                .prepare("SELECT id FROM moved")
                .expect("Could not prepare the query");
            let row = statement
                .query(&[])
                .expect("Could not run the query")
                .next()
                .expect("The table has one row")
                .expect("Could not read the row");
            row.get::<i64>(0).expect("Could not decode the value")
        })
        .join()
        .expect("The thread panicked");
        assert_eq!(value, 7);
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            assert!(matches!(
                Connection::connect("duckdb://some_value"),
                Err(Error::InvalidUrl(..))
            ));
        };
    }
}
