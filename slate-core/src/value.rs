use libsqlite3_sys::{SQLITE_BLOB, SQLITE_FLOAT, SQLITE_INTEGER, SQLITE_NULL, SQLITE_TEXT};
use std::{
    ffi::c_int,
    fmt::{self, Display, Write},
};

/// Storage class of a value, as declared by sqlite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

impl Type {
    /// Map the result of `sqlite3_value_type` / `sqlite3_column_type`.
    pub fn from_raw(value: c_int) -> Option<Self> {
        match value {
            SQLITE_NULL => Some(Type::Null),
            SQLITE_INTEGER => Some(Type::Integer),
            SQLITE_FLOAT => Some(Type::Real),
            SQLITE_TEXT => Some(Type::Text),
            SQLITE_BLOB => Some(Type::Blob),
            _ => None,
        }
    }
}

/// Every value sqlite can store.
///
/// This is what a parameter turns into before being bound, and what a column decodes to
/// when the caller does not know its type in advance.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn data_type(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Integer(..) => Type::Integer,
            Value::Real(..) => Type::Real,
            Value::Text(..) => Type::Text,
            Value::Blob(..) => Type::Blob,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Textual rendering: `NULL`, blobs as hex literals, reals in the shortest form that reads
/// back to the same number (`1.0`, `0.25`, `1e20`).
///
/// Reals are not rendered the way sqlite converts them to text (`1.0e+20` for `1e20`), the
/// `Table` of `slate-sqlite` asks sqlite for the text of real columns instead.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v:?}"),
            Value::Text(v) => f.write_str(v),
            Value::Blob(v) => {
                f.write_str("X'")?;
                for byte in v {
                    write!(f, "{byte:02X}")?;
                }
                f.write_char('\'')
            }
        }
    }
}

macro_rules! impl_from {
    ($source:ty, $variant:path) => {
        impl_from!($source, $variant, |v| v);
    };
    ($source:ty, $variant:path, $conv:expr) => {
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                $variant(($conv)(value))
            }
        }
    };
}

impl_from!(i64, Value::Integer);
impl_from!(i32, Value::Integer, i64::from);
impl_from!(bool, Value::Integer, i64::from);
impl_from!(f64, Value::Real);
impl_from!(String, Value::Text);
impl_from!(&str, Value::Text, str::to_string);
impl_from!(Vec<u8>, Value::Blob);
impl_from!(&[u8], Value::Blob, <[u8]>::to_vec);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
