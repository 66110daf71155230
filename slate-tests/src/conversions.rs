use crate::silent_logs;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use slate::{
    Connection, FromSql, RawRepresentable, Row, Type, Value, impl_raw_representable, params,
};
use std::{fmt::Debug, sync::Arc};
use time::macros::{date, datetime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Suit {
    Hearts,
    Spades,
}

impl RawRepresentable for Suit {
    type Raw = String;
    fn raw_value(&self) -> String {
        match self {
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
        .into()
    }
    fn from_raw_value(raw: String) -> Option<Self> {
        match raw.as_str() {
            "hearts" => Some(Suit::Hearts),
            "spades" => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl_raw_representable!(Suit);

fn select(connection: &Connection, expression: &str) -> Result<Row> {
    let mut statement = connection.prepare(&format!("SELECT {expression}"))?;
    let row = statement
        .query(params![])?
        .next()
        .with_context(|| format!("SELECT {expression} must produce one row"))??;
    Ok(row)
}

fn decoded<T: FromSql>(connection: &Connection, expression: &str) -> Result<T> {
    Ok(select(connection, expression)?.get::<T>(0)?)
}

fn rejected<T: FromSql + Debug>(connection: &Connection, expression: &str) -> Result<()> {
    let row = select(connection, expression)?;
    let result = silent_logs! { row.get::<T>(0) };
    match result {
        Err(slate::Error::Decode { .. }) => Ok(()),
        other => anyhow::bail!(
            "Decoding `{expression}` as {} should fail, found {other:?}",
            std::any::type_name::<T>()
        ),
    }
}

pub fn conversions(connection: &Connection) -> Result<()> {
    // Storage classes
    let row = select(connection, "1, 1.5, 'a', x'00ff', NULL")?;
    let types = (0..row.len())
        .map(|i| row.get::<Value>(i).map(|v| v.data_type()))
        .collect::<slate::Result<Vec<_>>>()?;
    assert_eq!(
        types,
        [Type::Integer, Type::Real, Type::Text, Type::Blob, Type::Null]
    );
    assert_eq!(
        row.values()?,
        [
            Value::Integer(1),
            Value::Real(1.5),
            Value::Text("a".into()),
            Value::Blob(vec![0x00, 0xff]),
            Value::Null,
        ]
    );
    assert_eq!(row.column_names(), ["1", "1.5", "'a'", "x'00ff'", "NULL"]);

    // Reading a column never changes what the next read sees
    let original = [
        Value::Blob(b"0123456789abcdef".to_vec()),
        Value::Real(1.5),
        Value::Integer(7),
        Value::Text("8".into()),
        Value::Null,
    ];
    let row = select(connection, "x'30313233343536373839616263646566', 1.5, 7, '8', NULL")?;
    assert_eq!(row.get::<String>(0)?, "0123456789abcdef");
    assert_eq!(row.get::<String>(1)?, "1.5");
    assert_eq!(row.get::<String>(2)?, "7");
    assert_eq!(row.get::<i64>(3)?, 8);
    assert_eq!(row.get::<Option<String>>(4)?, None);
    assert_eq!(row.values()?, original);
    assert_eq!(
        row.get::<Uuid>(0)?,
        Uuid::from_bytes(*b"0123456789abcdef")
    );
    assert_eq!(row.get::<Vec<u8>>(1)?, b"1.5");
    assert_eq!(row.get::<f64>(1)?, 1.5);
    assert_eq!(row.get::<Vec<u8>>(2)?, b"7");
    assert_eq!(row.get::<i64>(2)?, 7);
    assert_eq!(row.get::<f64>(3)?, 8.0);
    assert_eq!(row.values()?, original);
    let row = select(connection, "x'30313233343536373839616263646566', 1.5, 7, '8', NULL")?;
    assert_eq!(row.values()?, original);
    assert_eq!(row.get::<String>(3)?, "8");
    assert_eq!(row.get::<Vec<u8>>(0)?, b"0123456789abcdef");
    assert_eq!(row.get::<String>(0)?, "0123456789abcdef");
    assert_eq!(row.get::<Value>(0)?, original[0]);
    assert_eq!(row.get::<i64>(1)?, 1);
    assert_eq!(row.get::<Value>(1)?, original[1]);

    // Coercions between text and numbers
    assert_eq!(decoded::<String>(connection, "42")?, "42");
    assert_eq!(decoded::<i64>(connection, "'17'")?, 17);
    assert_eq!(decoded::<i64>(connection, "2.9")?, 2);
    assert_eq!(decoded::<f64>(connection, "3")?, 3.0);
    assert_eq!(decoded::<Arc<str>>(connection, "'shared'")?, Arc::from("shared"));
    assert!(decoded::<bool>(connection, "2")?);
    assert!(!decoded::<bool>(connection, "0")?);
    assert_eq!(decoded::<Vec<u8>>(connection, "'abc'")?, b"abc");
    assert_eq!(decoded::<String>(connection, "x'616263'")?, "abc");

    // NULL
    assert_eq!(decoded::<Option<i64>>(connection, "NULL")?, None);
    assert_eq!(decoded::<Option<String>>(connection, "'x'")?, Some("x".into()));
    rejected::<i64>(connection, "NULL")?;
    rejected::<f64>(connection, "NULL")?;
    rejected::<String>(connection, "NULL")?;
    rejected::<Vec<u8>>(connection, "NULL")?;
    rejected::<bool>(connection, "NULL")?;

    // Narrowing
    assert_eq!(decoded::<i16>(connection, "300")?, 300);
    rejected::<i8>(connection, "300")?;
    rejected::<u8>(connection, "256")?;
    rejected::<u8>(connection, "-1")?;
    rejected::<u32>(connection, "-1")?;
    rejected::<i32>(connection, "2147483648")?;
    assert_eq!(decoded::<u32>(connection, "4294967295")?, u32::MAX);
    rejected::<u32>(connection, "4294967296")?;

    // Characters
    assert_eq!(decoded::<char>(connection, "'z'")?, 'z');
    rejected::<char>(connection, "'zz'")?;
    rejected::<char>(connection, "''")?;

    // Uuid
    let uuid = Uuid::from_u128(0x67e5504410b1426f9247bb680e5fe0c8);
    assert_eq!(
        decoded::<Uuid>(connection, "'67e55044-10b1-426f-9247-bb680e5fe0c8'")?,
        uuid
    );
    assert_eq!(
        decoded::<Uuid>(connection, "x'67e5504410b1426f9247bb680e5fe0c8'")?,
        uuid
    );
    rejected::<Uuid>(connection, "x'010203'")?;
    rejected::<Uuid>(connection, "'not a uuid'")?;
    rejected::<Uuid>(connection, "5")?;
    rejected::<Uuid>(connection, "NULL")?;

    // Raw representable
    assert_eq!(decoded::<Suit>(connection, "'spades'")?, Suit::Spades);
    assert_eq!(decoded::<Option<Suit>>(connection, "NULL")?, None);
    rejected::<Suit>(connection, "'clubs'")?;
    rejected::<Suit>(connection, "NULL")?;

    // Decimal
    assert_eq!(decoded::<Decimal>(connection, "'12.50'")?, Decimal::new(1250, 2));
    assert_eq!(decoded::<Decimal>(connection, "7")?, Decimal::from(7));
    assert_eq!(decoded::<Decimal>(connection, "0.5")?, Decimal::new(5, 1));
    assert_eq!(decoded::<Decimal>(connection, "'1e3'")?, Decimal::from(1000));
    rejected::<Decimal>(connection, "'twelve'")?;
    rejected::<Decimal>(connection, "x'00'")?;
    rejected::<Decimal>(connection, "NULL")?;

    // Date and time, also from the values produced by sqlite's own functions
    assert_eq!(
        decoded::<time::Date>(connection, "date('2024-02-28', '+1 day')")?,
        date!(2024 - 02 - 29)
    );
    assert_eq!(
        decoded::<time::PrimitiveDateTime>(connection, "datetime('2024-02-29 10:11:12')")?,
        datetime!(2024-02-29 10:11:12)
    );
    assert_eq!(
        decoded::<time::PrimitiveDateTime>(connection, "'2024-02-29T10:11:12.5'")?,
        datetime!(2024-02-29 10:11:12.5)
    );
    rejected::<time::Date>(connection, "'yesterday'")?;
    rejected::<time::Time>(connection, "'25:00:00'")?;
    Ok(())
}
