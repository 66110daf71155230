#[cfg(test)]
mod tests {
    use slate_sqlite::{Connection, params};
    use slate_tests::{init_logs, silent_logs};

    #[test]
    #[should_panic(expected = "The statement expects 2 parameters but 1 were provided")]
    fn bind_count_mismatch() {
        init_logs();
        let connection = Connection::open_in_memory().expect("Could not open the database");
        let mut statement = connection
            .prepare("SELECT ?, ?")
            .expect("Could not prepare the query");
        let _ = statement.bind(params![1]);
    }

    #[test]
    #[should_panic(expected = "Called execute on a statement that returns rows")]
    fn execute_query() {
        init_logs();
        let connection = Connection::open_in_memory().expect("Could not open the database");
        let mut statement = connection
            .prepare("SELECT 1")
            .expect("Could not prepare the query");
        let _ = statement.execute(params![]);
    }

    #[test]
    fn statement_survives_failures() {
        init_logs();
        let connection = Connection::open_in_memory().expect("Could not open the database");
        connection
            .execute_batch("CREATE TABLE items (id INTEGER PRIMARY KEY)")
            .expect("Could not create the table");
        let mut insert = connection
            .prepare("INSERT INTO items (id) VALUES (?)")
            .expect("Could not prepare the query");
        assert_eq!(insert.execute(params![1]).expect("Could not insert"), 1);
        for _ in 0..3 {
            silent_logs! {
                assert!(insert.execute(params![1]).is_err());
            };
        }
        assert_eq!(insert.execute(params![2]).expect("Could not insert"), 1);
        assert_eq!(connection.last_insert_rowid(), 2);
    }
}
