#[cfg(test)]
mod tests {
    use indoc::indoc;
    use slate::{Connection, Table, Value, params};
    use uuid::Uuid;

    #[test]
    fn accounts() {
        let connection = Connection::open_in_memory().expect("Could not open the database");
        connection
            .execute_batch(indoc! {"
                CREATE TABLE accounts (
                    id BLOB PRIMARY KEY,
                    owner TEXT NOT NULL,
                    balance INTEGER NOT NULL DEFAULT 0
                );
            "})
            .expect("Could not create the table");
        let alice = Uuid::from_u128(1);
        let bob = Uuid::from_u128(2);
        let mut insert = connection
            .prepare("INSERT INTO accounts (id, owner, balance) VALUES (?, ?, ?)")
            .expect("Could not prepare the insert");
        insert
            .execute(params![alice, "alice", 100])
            .expect("Could not insert alice");
        insert
            .execute(params![bob, "bob", 5])
            .expect("Could not insert bob");

        let mut select = connection
            .prepare("SELECT owner, balance FROM accounts WHERE id = ?")
            .expect("Could not prepare the select");
        let row = select
            .query(params![bob])
            .expect("Could not run the select")
            .next()
            .expect("Bob must exist")
            .expect("Could not read the row");
        assert_eq!(row.get::<String>(0).expect("Could not decode"), "bob");
        assert_eq!(row.get::<u32>(1).expect("Could not decode"), 5);
        assert_eq!(
            row.values().expect("Could not decode"),
            [Value::Text("bob".into()), Value::Integer(5)]
        );

        let mut all = connection
            .prepare("SELECT owner, balance FROM accounts ORDER BY balance DESC")
            .expect("Could not prepare the select");
        let table = Table::new(all.query(params![]).expect("Could not run the select"))
            .expect("Could not read the rows");
        assert_eq!(
            table.to_string(),
            indoc! {"
                +-------+---------+
                | owner | balance |
                +=======+=========+
                | alice | 100     |
                +-------+---------+
                | bob   | 5       |
                +-------+---------+"
            }
        );
    }
}
