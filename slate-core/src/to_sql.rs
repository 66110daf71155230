use crate::Value;
use std::{borrow::Cow, rc::Rc, sync::Arc};
use uuid::Uuid;

/// Conversion of a domain type into the [`Value`] bound to a statement parameter.
///
/// The trait is object safe: heterogeneous parameter lists are passed as `&[&dyn ToSql]`
/// (see the `params!` macro). Implementing it for a new type is all it takes to make that
/// type bindable:
///
/// ```rust
/// use slate_core::{ToSql, Value};
/// struct Celsius(f64);
/// impl ToSql for Celsius {
///     fn to_sql(&self) -> Value {
///         Value::Real(self.0)
///     }
/// }
/// assert_eq!(Celsius(21.5).to_sql(), Value::Real(21.5));
/// ```
pub trait ToSql {
    fn to_sql(&self) -> Value;
}

impl ToSql for Value {
    fn to_sql(&self) -> Value {
        self.clone()
    }
}

macro_rules! impl_to_sql {
    ($($source:ty),+ => $variant:path, $conv:expr) => {
        $(
            impl ToSql for $source {
                fn to_sql(&self) -> Value {
                    $variant(($conv)(*self))
                }
            }
        )+
    };
}

impl_to_sql!(i8, i16, i32, i64, u8, u16, u32 => Value::Integer, i64::from);
impl_to_sql!(bool => Value::Integer, i64::from);
impl_to_sql!(isize => Value::Integer, |v: isize| v as i64);
impl_to_sql!(f32, f64 => Value::Real, f64::from);
impl_to_sql!(char => Value::Text, |v: char| v.to_string());

impl ToSql for str {
    fn to_sql(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToSql for String {
    fn to_sql(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<'a> ToSql for Cow<'a, str> {
    fn to_sql(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToSql for [u8] {
    fn to_sql(&self) -> Value {
        Value::Blob(self.to_vec())
    }
}

impl ToSql for Vec<u8> {
    fn to_sql(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl<const N: usize> ToSql for [u8; N] {
    fn to_sql(&self) -> Value {
        Value::Blob(self.to_vec())
    }
}

/// Stored as the 16 raw bytes, in the RFC 4122 order.
impl ToSql for Uuid {
    fn to_sql(&self) -> Value {
        Value::Blob(self.as_bytes().to_vec())
    }
}

impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(&self) -> Value {
        match self {
            Some(v) => v.to_sql(),
            None => Value::Null,
        }
    }
}

macro_rules! impl_to_sql_wrapper {
    ($($wrapper:ident),+) => {
        $(
            impl<T: ToSql + ?Sized> ToSql for $wrapper<T> {
                fn to_sql(&self) -> Value {
                    (**self).to_sql()
                }
            }
        )+
    };
}

impl_to_sql_wrapper!(Box, Rc, Arc);

impl<T: ToSql + ?Sized> ToSql for &T {
    fn to_sql(&self) -> Value {
        (**self).to_sql()
    }
}
