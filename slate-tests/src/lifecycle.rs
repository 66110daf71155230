use crate::silent_logs;
use anyhow::{Context, Result};
use indoc::indoc;
use slate::{Code, Connection, State, Value, params};

pub fn lifecycle(connection: &Connection) -> Result<()> {
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS lifecycle;
        CREATE TABLE lifecycle (id INTEGER PRIMARY KEY, value INTEGER);
    "})?;

    // Introspection
    let mut insert = connection.prepare("INSERT INTO lifecycle (id, value) VALUES (?, ?)")?;
    assert_eq!(insert.state(), State::Prepared);
    assert_eq!(insert.parameter_count(), 2);
    assert_eq!(insert.column_count(), 0);
    assert_eq!(insert.column_name(0), None);
    assert_eq!(
        insert.sql(),
        "INSERT INTO lifecycle (id, value) VALUES (?, ?)"
    );
    assert_eq!(insert.to_string(), insert.sql());

    // Transitions
    insert.bind(params![1, 10])?;
    assert_eq!(insert.state(), State::Bound);
    assert!(!insert.step()?);
    assert_eq!(insert.state(), State::Done);
    insert.reset();
    assert_eq!(insert.state(), State::Bound);
    insert.clear_bindings();
    assert_eq!(insert.state(), State::Prepared);

    // Slots set one at a time, the unbound ones are NULL
    insert.bind_value(1, &Value::Integer(2))?;
    assert_eq!(insert.state(), State::Bound);
    assert!(!insert.step()?);
    insert.reset();
    let mut by_id = connection.prepare("SELECT value FROM lifecycle WHERE id = ?")?;
    let row = by_id
        .query(params![2])?
        .next()
        .context("The row with id 2 must exist")??;
    assert_eq!(row.get::<Option<i64>>(0)?, None);
    // The sequence was dropped on a row, the statement went back to the start
    assert_eq!(by_id.state(), State::Bound);

    // Slot out of range
    let error = silent_logs! { insert.bind_value(3, &Value::Integer(0)) }
        .expect_err("Binding a slot that does not exist must fail");
    assert_eq!(error.code(), Some(Code::ParameterOutOfRange));

    // Changes reported by execute
    let mut insert_many = connection
        .prepare("INSERT INTO lifecycle (id, value) VALUES (?, 1), (?, 1), (?, 1)")?;
    assert_eq!(insert_many.execute(params![3, 4, 5])?, 3);
    let mut update = connection.prepare("UPDATE lifecycle SET value = ? WHERE value = 1")?;
    assert_eq!(update.execute(params![100])?, 3);
    assert_eq!(update.execute(params![100])?, 0);
    let mut delete = connection.prepare("DELETE FROM lifecycle WHERE id > ?")?;
    assert_eq!(delete.execute(params![1])?, 4);
    assert_eq!(connection.changes(), 4);
    assert!(connection.total_changes() >= 4);

    // Rows are produced lazily and the cursor follows the iteration
    let mut select = connection.prepare("SELECT id, value FROM lifecycle ORDER BY id")?;
    assert_eq!(select.column_names(), ["id", "value"]);
    assert_eq!(select.column_name(1).as_deref(), Some("value"));
    let mut rows = select.query(params![])?;
    let row = rows.next().context("The table has one row")??;
    assert_eq!(row.len(), 2);
    assert!(!row.is_empty());
    assert_eq!(row.values()?, [Value::Integer(1), Value::Integer(10)]);
    assert!(rows.next().is_none());
    assert!(rows.next().is_none());
    drop(rows);
    assert_eq!(select.state(), State::Done);

    // Out of range column
    let error = silent_logs! { row.get::<i64>(2) }
        .expect_err("Reading a column that does not exist must fail");
    assert_eq!(error, slate::Error::NoSuchColumn(2));
    assert_eq!(error.code(), None);

    // Empty result
    let mut empty = connection.prepare("SELECT id FROM lifecycle WHERE id < 0")?;
    assert_eq!(empty.query(params![])?.count(), 0);
    assert_eq!(empty.state(), State::Done);

    // Errors surface while iterating, the sequence then ends
    let mut overflow = connection.prepare("SELECT abs(-9223372036854775808)")?;
    let mut rows = overflow.query(params![])?;
    let error = silent_logs! { rows.next() }
        .context("The failing step must be yielded")?
        .expect_err("The integer overflow must be reported");
    assert_eq!(error.code(), Some(Code::Unknown));
    assert!(rows.next().is_none());
    drop(rows);

    // Run again, the same statement yields the same error
    let error = silent_logs! { overflow.query(params![])?.next() }
        .context("The failing step must be yielded")?
        .expect_err("The integer overflow must be reported again");
    assert!(error.to_string().contains("integer overflow"), "{error}");

    // A sequence dropped halfway releases the table
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS half_read;
        CREATE TABLE half_read (value INTEGER);
        INSERT INTO half_read VALUES (1), (2), (3);
    "})?;
    let mut half = connection.prepare("SELECT value FROM half_read")?;
    let mut rows = half.query(params![])?;
    rows.next().context("The table has three rows")??;
    drop(rows);
    assert_eq!(half.state(), State::Bound);
    connection.execute_batch("DROP TABLE half_read")?;

    // State of the connection
    assert!(connection.is_autocommit());
    connection.execute_batch("BEGIN")?;
    assert!(!connection.is_autocommit());
    connection.execute_batch("ROLLBACK")?;
    assert!(connection.is_autocommit());
    Ok(())
}
