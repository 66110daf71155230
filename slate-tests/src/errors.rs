use crate::silent_logs;
use anyhow::{Context, Result};
use indoc::indoc;
use slate::{Code, Connection, Error, params};

fn description(error: &Error) -> &str {
    match error {
        Error::Sqlite { description, .. } => description.as_deref().unwrap_or_default(),
        _ => "",
    }
}

pub fn errors(connection: &Connection) -> Result<()> {
    // Compilation failures
    let error = silent_logs! { connection.prepare("SELEC 1") }
        .err()
        .context("A syntax error must be reported")?;
    assert_eq!(error.code(), Some(Code::Unknown));
    assert!(description(&error).contains("syntax error"), "{error}");
    assert!(error.to_string().contains("syntax error"), "{error}");

    let error = silent_logs! { connection.prepare("SELECT * FROM missing_table") }
        .err()
        .context("A missing table must be reported")?;
    assert_eq!(error.code(), Some(Code::Unknown));
    assert!(description(&error).contains("no such table"), "{error}");

    let error = silent_logs! { connection.prepare("SELECT 1; SELECT 2") }
        .err()
        .context("Two statements must be rejected")?;
    assert!(
        matches!(&error, Error::MultipleStatements(rest) if rest == "SELECT 2"),
        "{error:?}"
    );

    // The rest is rejected even when it would not compile on its own
    for sql in [
        "SELECT 1; SELEC 2",
        "CREATE TABLE later (id INTEGER); INSERT INTO later VALUES (1)",
    ] {
        let error = silent_logs! { connection.prepare(sql) }
            .err()
            .with_context(|| format!("`{sql}` must be rejected"))?;
        assert!(matches!(error, Error::MultipleStatements(..)), "{error:?}");
    }

    let error = silent_logs! { connection.prepare("   -- nothing to run\n") }
        .err()
        .context("An empty statement must be rejected")?;
    assert_eq!(error.code(), Some(Code::Misuse));

    // Trailing whitespace, semicolons and comments are fine
    connection.prepare("SELECT 1;  ")?;
    connection.prepare("SELECT 1; -- comment")?;

    // Scripts
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS ledger;
        CREATE TABLE ledger (id INTEGER PRIMARY KEY, amount INTEGER NOT NULL CHECK (amount > 0));
        -- rows produced by queries inside a script are discarded
        SELECT 1;
        INSERT INTO ledger (amount) VALUES (10), (20);
    "})?;
    connection.execute_batch("")?;
    connection.execute_batch("  -- only a comment")?;

    // A failing script stops at the failing statement, the previous ones stay applied
    let error = silent_logs! {
        connection.execute_batch(indoc! {"
            INSERT INTO ledger (amount) VALUES (30);
            INSERT INTO ledger (amount) VALUES (-1);
            INSERT INTO ledger (amount) VALUES (40);
        "})
    }
    .err()
    .context("The CHECK constraint must fail")?;
    assert_eq!(error.code(), Some(Code::ConstraintViolation));
    assert!(description(&error).contains("CHECK constraint failed"), "{error}");
    let mut total = connection.prepare("SELECT SUM(amount) FROM ledger")?;
    let row = total
        .query(params![])?
        .next()
        .context("SUM must produce one row")??;
    assert_eq!(row.get::<i64>(0)?, 60);

    // Malformed script
    let error = silent_logs! { connection.execute_batch("SELECT 1; SELEC 2;") }
        .err()
        .context("The syntax error in the script must be reported")?;
    assert!(description(&error).contains("syntax error"), "{error}");

    // Strings with a NUL byte cannot reach sqlite
    let error = silent_logs! { connection.prepare("SELECT 1\0 DROP TABLE ledger") }
        .err()
        .context("A query with a NUL byte must be rejected")?;
    assert!(matches!(error, Error::InvalidString(..)), "{error:?}");
    let error = silent_logs! { Connection::open("with\0nul") }
        .err()
        .context("A location with a NUL byte must be rejected")?;
    assert!(matches!(error, Error::InvalidString(..)), "{error:?}");
    Ok(())
}
