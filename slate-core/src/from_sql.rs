use crate::{Error, Result, Type, Value, ValueRef};
use std::{any, sync::Arc};
use uuid::Uuid;

/// Decoding of a domain type out of a column value.
///
/// Decoding reads the native value directly instead of going through a [`Value`], so a
/// `String` column costs one copy of the text and nothing else.
///
/// # Error semantics
/// - NULL decoded into a type without a NULL representation fails, wrap the type in an
///   `Option` for nullable columns.
/// - Integers are read as 64 bits and narrowed with a range check: a value that does not
///   fit the requested width fails instead of wrapping around.
/// - Text and numeric values are converted between each other with sqlite's rules (an
///   INTEGER column decodes as `String`, a numeric TEXT decodes as `i64`).
///
/// Only types that can also be bound are decoded, `u64` has no 64-bit signed storage and is
/// neither:
///
/// ```rust,compile_fail
/// fn decodable<T: slate_core::FromSql>() {}
/// decodable::<u64>();
/// ```
pub trait FromSql: Sized {
    fn decode(value: ValueRef<'_>) -> Result<Self>;
}

fn not_null<T>(value: &ValueRef<'_>) -> Result<()> {
    if value.is_null() {
        let error = Error::decode::<T>("unexpected NULL");
        log::error!("{}", error);
        return Err(error);
    }
    Ok(())
}

/// Decodes using the storage class the value had when the row was captured.
impl FromSql for Value {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        Ok(match value.data_type() {
            Type::Null => Value::Null,
            Type::Integer => Value::Integer(value.as_i64()),
            Type::Real => Value::Real(value.as_f64()),
            Type::Text => Value::Text(value.into_text()?.to_string()),
            Type::Blob => Value::Blob(value.into_bytes().to_vec()),
        })
    }
}

impl FromSql for i64 {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        not_null::<Self>(&value)?;
        Ok(value.as_i64())
    }
}

macro_rules! impl_from_sql_integer {
    ($($target:ty),+) => {
        $(
            impl FromSql for $target {
                fn decode(value: ValueRef<'_>) -> Result<Self> {
                    let v = i64::decode(value)?;
                    <$target>::try_from(v).map_err(|_| {
                        let error = Error::decode::<Self>(format!(
                            "{v} is out of range for {}",
                            any::type_name::<Self>()
                        ));
                        log::error!("{}", error);
                        error
                    })
                }
            }
        )+
    };
}

impl_from_sql_integer!(i8, i16, i32, isize, u8, u16, u32);

impl FromSql for bool {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        Ok(i64::decode(value)? != 0)
    }
}

impl FromSql for f64 {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        not_null::<Self>(&value)?;
        Ok(value.as_f64())
    }
}

/// Narrowed with `as`: magnitudes beyond `f32::MAX` become infinite.
impl FromSql for f32 {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        Ok(f64::decode(value)? as f32)
    }
}

impl FromSql for String {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        not_null::<Self>(&value)?;
        Ok(value.into_text()?.to_string())
    }
}

impl FromSql for Arc<str> {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        not_null::<Self>(&value)?;
        Ok(value.into_text()?.into())
    }
}

impl FromSql for char {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        let text = String::decode(value)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => {
                let error = Error::decode::<Self>(format!(
                    "expected exactly one character, found `{text}`"
                ));
                log::error!("{}", error);
                Err(error)
            }
        }
    }
}

impl FromSql for Vec<u8> {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        not_null::<Self>(&value)?;
        Ok(value.into_bytes().to_vec())
    }
}

/// Accepts the 16-byte binary form (what [`ToSql`](crate::ToSql) produces) or the textual
/// form, anything else fails.
impl FromSql for Uuid {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        let result = match value.data_type() {
            Type::Blob => {
                let bytes = value.into_bytes();
                Uuid::from_slice(bytes).map_err(|_| {
                    Error::decode::<Self>(format!("expected 16 bytes, found {}", bytes.len()))
                })
            }
            Type::Text => {
                let text = value.into_text()?;
                Uuid::parse_str(text)
                    .map_err(|e| Error::decode::<Self>(format!("`{text}` is not a uuid ({e})")))
            }
            other => Err(Error::decode::<Self>(format!(
                "expected a blob or a text, found {other:?}"
            ))),
        };
        if let Err(ref error) = result {
            log::error!("{}", error);
        }
        result
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::decode(value).map(Some)
        }
    }
}

impl<T: FromSql> FromSql for Box<T> {
    fn decode(value: ValueRef<'_>) -> Result<Self> {
        T::decode(value).map(Box::new)
    }
}
