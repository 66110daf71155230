use crate::{Error, FromSql, Result, ToSql, Type, Value, ValueRef};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::str::FromStr;

/// Stored as text, sqlite has no exact decimal storage class and a REAL would lose digits.
impl ToSql for Decimal {
    fn to_sql(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FromSql for Decimal {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        let result = match value.data_type() {
            Type::Integer => Ok(Decimal::from(value.as_i64())),
            Type::Real => {
                let v = value.as_f64();
                Decimal::from_f64(v)
                    .ok_or_else(|| Error::decode::<Self>(format!("{v} is not representable")))
            }
            Type::Text => {
                let text = value.into_text()?;
                Decimal::from_str(text)
                    .or_else(|_| Decimal::from_scientific(text))
                    .map_err(|e| Error::decode::<Self>(format!("`{text}` is not a decimal ({e})")))
            }
            other => Err(Error::decode::<Self>(format!(
                "expected a number or a text, found {other:?}"
            ))),
        };
        if let Err(ref error) = result {
            log::error!("{}", error);
        }
        result
    }
}
