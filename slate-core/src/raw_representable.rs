use std::fmt::Debug;

/// A type backed by a raw value, typically a field-less enum stored through its discriminant
/// or through a fixed set of strings.
///
/// [`impl_raw_representable!`](crate::impl_raw_representable) derives [`ToSql`](crate::ToSql)
/// and [`FromSql`](crate::FromSql) from this: binding forwards to the raw value, decoding reads
/// the raw value and then calls [`RawRepresentable::from_raw_value`]. A raw value without a
/// matching case decodes to [`Error::Decode`](crate::Error::Decode), it is never coerced into
/// some default case.
///
/// ```rust
/// use slate_core::{RawRepresentable, ToSql, Value, impl_raw_representable};
/// #[derive(Debug, PartialEq)]
/// enum Role {
///     Admin = 1,
///     Member = 2,
/// }
/// impl RawRepresentable for Role {
///     type Raw = i64;
///     fn raw_value(&self) -> i64 {
///         match self {
///             Role::Admin => 1,
///             Role::Member => 2,
///         }
///     }
///     fn from_raw_value(raw: i64) -> Option<Self> {
///         match raw {
///             1 => Some(Role::Admin),
///             2 => Some(Role::Member),
///             _ => None,
///         }
///     }
/// }
/// impl_raw_representable!(Role);
/// assert_eq!(Role::Member.to_sql(), Value::Integer(2));
/// ```
pub trait RawRepresentable: Sized {
    type Raw: Debug;
    fn raw_value(&self) -> Self::Raw;
    fn from_raw_value(raw: Self::Raw) -> Option<Self>;
}

#[macro_export]
macro_rules! impl_raw_representable {
    ($($target:ty),+ $(,)?) => {
        $(
            impl $crate::ToSql for $target {
                fn to_sql(&self) -> $crate::Value {
                    $crate::ToSql::to_sql(&$crate::RawRepresentable::raw_value(self))
                }
            }

            impl $crate::FromSql for $target {
                fn decode(value: $crate::ValueRef<'_>) -> $crate::Result<Self> {
                    let raw = <<$target as $crate::RawRepresentable>::Raw as $crate::FromSql>::decode(value)?;
                    let description = format!("{:?}", raw);
                    <$target as $crate::RawRepresentable>::from_raw_value(raw).ok_or_else(|| {
                        let error = $crate::Error::decode::<$target>(format!(
                            "raw value {} does not match any case",
                            description
                        ));
                        $crate::log::error!("{}", error);
                        error
                    })
                }
            }
        )+
    };
}
