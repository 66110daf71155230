use anyhow::Result;
use indoc::indoc;
use slate::{Connection, Table, params};

pub fn table(connection: &Connection) -> Result<()> {
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS planets;
        CREATE TABLE planets (id INTEGER PRIMARY KEY, name TEXT, radius REAL, rings BLOB);
        INSERT INTO planets VALUES
            (1, 'Mercury', 0.383, NULL),
            (2, 'Saturn', 9.45, x'01'),
            (3, NULL, 1.0, NULL),
            (4, 'Sun', 1e20, NULL);
    "})?;
    let mut select = connection.prepare("SELECT * FROM planets WHERE id <= ? ORDER BY id")?;
    let table = Table::new(select.query(params![3])?)?;
    assert_eq!(table.columns(), ["id", "name", "radius", "rings"]);
    assert_eq!(table.rows().len(), 3);
    assert_eq!(
        table.to_string(),
        indoc! {"
            +----+---------+--------+-------+
            | id | name    | radius | rings |
            +====+=========+========+=======+
            | 1  | Mercury | 0.383  | NULL  |
            +----+---------+--------+-------+
            | 2  | Saturn  | 9.45   | X'01' |
            +----+---------+--------+-------+
            | 3  | NULL    | 1.0    | NULL  |
            +----+---------+--------+-------+"
        }
    );

    // Reals are shown as sqlite turns them into text
    let mut sun =
        connection.prepare("SELECT name, radius, CAST(radius AS TEXT) FROM planets WHERE id = 4")?;
    let table = Table::new(sun.query(params![])?)?;
    assert_eq!(table.rows(), [["Sun", "1.0e+20", "1.0e+20"]]);

    // No rows, only the header
    let table = Table::new(select.query(params![0])?)?;
    assert!(table.rows().is_empty());
    assert_eq!(
        table.to_string(),
        indoc! {"
            +----+------+--------+-------+
            | id | name | radius | rings |
            +====+======+========+=======+"
        }
    );
    Ok(())
}
