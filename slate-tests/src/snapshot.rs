use anyhow::Result;
use indoc::indoc;
use slate::{Connection, Row, params};
use std::thread;

fn labels(rows: &[Row]) -> Result<Vec<(i64, String)>> {
    rows.iter()
        .map(|row| Ok((row.get(0)?, row.get(1)?)))
        .collect()
}

pub fn snapshot(connection: &Connection) -> Result<()> {
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS snapshot;
        CREATE TABLE snapshot (id INTEGER PRIMARY KEY, label TEXT NOT NULL);
        INSERT INTO snapshot (id, label) VALUES (1, 'one'), (2, 'two'), (3, 'three');
    "})?;
    let mut select =
        connection.prepare("SELECT id, label FROM snapshot WHERE id >= ? ORDER BY id")?;

    let first = select
        .query(params![1])?
        .collect::<slate::Result<Vec<_>>>()?;
    let expected = vec![
        (1, "one".to_string()),
        (2, "two".to_string()),
        (3, "three".to_string()),
    ];
    assert_eq!(labels(&first)?, expected);

    // Reset and run again with different parameters
    select.reset();
    let second = select
        .query(params![3])?
        .collect::<slate::Result<Vec<_>>>()?;
    assert_eq!(labels(&second)?, [(3, "three".to_string())]);
    assert_eq!(labels(&first)?, expected);

    // Partially consumed sequence, the statement is then run again without an explicit reset
    let mut rows = select.query(params![2])?;
    let partial = rows.next().expect("Expected a row")?;
    drop(rows);
    let third = select
        .query(params![1])?
        .collect::<slate::Result<Vec<_>>>()?;
    assert_eq!(third.len(), 3);
    assert_eq!(partial.get::<String>(1)?, "two");

    // Changing the table does not touch the rows already fetched
    connection.execute_batch("UPDATE snapshot SET label = upper(label); DELETE FROM snapshot;")?;
    assert_eq!(labels(&first)?, expected);
    assert_eq!(partial.get::<i64>(0)?, 2);

    // Rows outlive the statement
    drop(select);
    assert_eq!(labels(&first)?, expected);

    // Rows move across threads
    let handle = thread::spawn(move || labels(&first));
    let moved = handle.join().expect("The thread panicked")?;
    assert_eq!(moved, expected);
    Ok(())
}
