use anyhow::{Context, Result};
use indoc::indoc;
use rust_decimal::Decimal;
use slate::{
    Connection, FromSql, RawRepresentable, ToSql, Value, impl_raw_representable, params,
};
use std::{fmt::Debug, str::FromStr};
use time::macros::{date, datetime, time};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Priority {
    Low = 1,
    Medium = 5,
    High = 10,
}

impl RawRepresentable for Priority {
    type Raw = i64;
    fn raw_value(&self) -> i64 {
        *self as i64
    }
    fn from_raw_value(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(Priority::Low),
            5 => Some(Priority::Medium),
            10 => Some(Priority::High),
            _ => None,
        }
    }
}

impl_raw_representable!(Priority);

/// Bind `value` through a parameter, read it back both from a bare `SELECT ?` and from a
/// column without affinity (so sqlite stores it as it was bound).
fn check<T: ToSql + FromSql + PartialEq + Debug>(connection: &Connection, value: T) -> Result<()> {
    let mut select = connection.prepare("SELECT ?")?;
    let row = select
        .query(params![value])?
        .next()
        .context("SELECT ? must produce one row")??;
    assert_eq!(row.get::<T>(0)?, value);

    let mut insert = connection.prepare("INSERT INTO round_trip (value) VALUES (?)")?;
    insert.execute(params![value])?;
    let id = connection.last_insert_rowid();
    let mut select = connection.prepare("SELECT value FROM round_trip WHERE id = ?")?;
    let row = select
        .query(params![id])?
        .next()
        .context("The inserted value must be found")??;
    assert_eq!(row.get::<T>(0)?, value);
    Ok(())
}

pub fn round_trip(connection: &Connection) -> Result<()> {
    connection.execute_batch(indoc! {"
        DROP TABLE IF EXISTS round_trip;
        CREATE TABLE round_trip (id INTEGER PRIMARY KEY, value);
    "})?;

    for v in [0, -1, 1, i64::MIN, i64::MAX] {
        check(connection, v)?;
    }
    for v in [0, i32::MIN, i32::MAX] {
        check(connection, v)?;
    }
    for v in [0, i16::MIN, i16::MAX] {
        check(connection, v)?;
    }
    for v in [0, i8::MIN, i8::MAX] {
        check(connection, v)?;
    }
    check(connection, u8::MAX)?;
    check(connection, u16::MAX)?;
    check(connection, u32::MAX)?;
    check(connection, -5isize)?;
    for v in [0.0, -0.5, 3.25, f64::MAX, f64::MIN, f64::MIN_POSITIVE] {
        check(connection, v)?;
    }
    check(connection, -1.5f32)?;
    check(connection, true)?;
    check(connection, false)?;
    check(connection, 'ß')?;
    for v in ["", "hello", "ünïcödé 🚀"] {
        check(connection, v.to_string())?;
    }
    check(connection, Vec::<u8>::new())?;
    check(connection, vec![0u8, 1, 2, 127, 128, 255])?;
    check(connection, vec![0u8; 4096])?;
    check(connection, Uuid::nil())?;
    check(connection, Uuid::new_v4())?;
    check(connection, Uuid::max())?;

    // Optional
    check(connection, None::<i64>)?;
    check(connection, Some(42i64))?;
    check(connection, None::<String>)?;
    check(connection, Some(String::new()))?;
    check(connection, None::<Vec<u8>>)?;
    check(connection, Some(Vec::<u8>::new()))?;
    check(connection, None::<Uuid>)?;
    check(connection, Some(Box::new(7u16)))?;

    // Canonical values
    check(connection, Value::Null)?;
    check(connection, Value::Integer(i64::MIN))?;
    check(connection, Value::Real(-2.5))?;
    check(connection, Value::Text(String::new()))?;
    check(connection, Value::Text("text".into()))?;
    check(connection, Value::Blob(vec![]))?;
    check(connection, Value::Blob(vec![0xde, 0xad, 0xbe, 0xef]))?;

    // Raw representable
    check(connection, Priority::Low)?;
    check(connection, Priority::High)?;
    check(connection, Some(Priority::Medium))?;
    check(connection, None::<Priority>)?;

    // Third party types
    check(connection, Decimal::ZERO)?;
    check(connection, Decimal::from_str("-1234567890.0987654321")?)?;
    check(connection, Decimal::MAX)?;
    check(connection, date!(1970 - 01 - 01))?;
    check(connection, date!(2024 - 02 - 29))?;
    check(connection, time!(00:00:00))?;
    check(connection, time!(23:59:59.999))?;
    check(connection, datetime!(2000-01-01 0:00))?;
    check(connection, datetime!(2038-01-19 03:14:07.5))?;
    Ok(())
}
