use crate::silent_logs;
use anyhow::{Context, Result};
use indoc::indoc;
use slate::{Code, Connection, params};

fn count(connection: &Connection) -> Result<i64> {
    let mut statement = connection.prepare("SELECT COUNT(*) FROM users")?;
    let row = statement
        .query(params![])?
        .next()
        .context("COUNT(*) must produce one row")??;
    Ok(row.get(0)?)
}

pub fn users(connection: &Connection) -> Result<()> {
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS users;
        CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );
    "})?;

    let mut insert = connection.prepare("INSERT INTO users (id, name) VALUES (?, ?)")?;
    assert_eq!(insert.execute(params![1, "A"])?, 1);
    assert_eq!(insert.execute(params![2, "B"])?, 1);
    assert_eq!(connection.last_insert_rowid(), 2);

    let mut select = connection.prepare("SELECT * FROM users")?;
    let rows = select.query(params![])?;
    assert_eq!(rows.column_count(), 2);
    assert_eq!(rows.column_names(), ["id", "name"]);
    let rows = rows.collect::<slate::Result<Vec<_>>>()?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get::<i64>(0)?, 1);
    assert_eq!(rows[0].get::<String>(1)?, "A");
    assert_eq!(rows[1].get::<i64>(0)?, 2);
    assert_eq!(rows[1].get::<String>(1)?, "B");
    assert_eq!(rows[1].column_names(), ["id", "name"]);

    // Duplicate primary key
    let error = silent_logs! { insert.execute(params![1, "C"]) }
        .expect_err("Inserting a duplicate primary key must fail");
    assert_eq!(error.code(), Some(Code::ConstraintViolation));
    let slate::Error::Sqlite { description, .. } = &error else {
        panic!("Expected a sqlite error, found {error:?}");
    };
    assert!(
        description
            .as_deref()
            .is_some_and(|v| v.contains("UNIQUE constraint failed")),
        "Unexpected description {description:?}"
    );
    assert_eq!(count(connection)?, 2);

    // Missing NOT NULL value
    let error = silent_logs! { insert.execute(params![3, None::<String>]) }
        .expect_err("Inserting NULL into a NOT NULL column must fail");
    assert_eq!(error.code(), Some(Code::ConstraintViolation));
    assert_eq!(count(connection)?, 2);

    // The statement is still usable after the failures
    assert_eq!(insert.execute(params![3, "C"])?, 1);
    assert_eq!(count(connection)?, 3);
    Ok(())
}
