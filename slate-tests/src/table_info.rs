use anyhow::Result;
use indoc::indoc;
use slate::{Connection, params};

pub fn table_info(connection: &Connection) -> Result<()> {
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS members;
        CREATE TABLE members (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            username TEXT,
            age INT NOT NULL
        );
    "})?;
    let mut statement = connection.prepare("PRAGMA table_info(members)")?;
    let rows = statement
        .query(params![])?
        .collect::<slate::Result<Vec<_>>>()?;
    assert_eq!(rows.len(), 4);

    let expected = [
        ("id", "INTEGER", false, 1),
        ("name", "TEXT", true, 0),
        ("username", "TEXT", false, 0),
        ("age", "INT", true, 0),
    ];
    for (row, (name, data_type, not_null, primary_key)) in rows.iter().zip(expected) {
        assert_eq!(row.get::<String>(1)?, name);
        assert_eq!(row.get::<String>(2)?, data_type);
        assert_eq!(row.get::<bool>(3)?, not_null);
        assert_eq!(row.get::<Option<String>>(4)?, None);
        assert_eq!(row.get::<i64>(5)?, primary_key);
    }
    Ok(())
}
