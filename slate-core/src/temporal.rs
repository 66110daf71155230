use crate::{Error, FromSql, Result, ToSql, Value, ValueRef};
use time::{
    Date, PrimitiveDateTime, Time,
    format_description::BorrowedFormatItem,
    macros::format_description,
};

// Same layouts as sqlite's date and time functions
const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond]");
const TIME_SHORT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");
const TIMESTAMP_SHORT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const TIMESTAMP_T: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const TIMESTAMP_T_SHORT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

macro_rules! impl_temporal {
    ($target:ty, $format:expr, $short:expr, [$($parse:expr),+]) => {
        /// Stored as text, seconds are followed by the fraction only when there is one.
        impl ToSql for $target {
            fn to_sql(&self) -> Value {
                let text = if has_fraction(self) {
                    self.format($format)
                } else {
                    self.format($short)
                };
                match text {
                    Ok(v) => Value::Text(v),
                    Err(e) => {
                        log::error!("Could not format {self}: {e}");
                        Value::Text(self.to_string())
                    }
                }
            }
        }

        impl FromSql for $target {
            fn decode(value: ValueRef<'_>) -> Result<Self> {
                let text = String::decode(value)?;
                $(
                    if let Ok(v) = <$target>::parse(&text, $parse) {
                        return Ok(v);
                    }
                )+
                let error = Error::decode::<Self>(format!("`{text}` does not match any known format"));
                log::error!("{}", error);
                Err(error)
            }
        }
    };
}

trait Fraction {
    fn nanosecond(&self) -> u32;
}

impl Fraction for Date {
    fn nanosecond(&self) -> u32 {
        0
    }
}

impl Fraction for Time {
    fn nanosecond(&self) -> u32 {
        Time::nanosecond(*self)
    }
}

impl Fraction for PrimitiveDateTime {
    fn nanosecond(&self) -> u32 {
        PrimitiveDateTime::nanosecond(*self)
    }
}

fn has_fraction(value: &impl Fraction) -> bool {
    value.nanosecond() != 0
}

impl_temporal!(Date, DATE, DATE, [DATE]);
impl_temporal!(Time, TIME, TIME_SHORT, [TIME, TIME_SHORT]);
impl_temporal!(
    PrimitiveDateTime,
    TIMESTAMP,
    TIMESTAMP_SHORT,
    [TIMESTAMP, TIMESTAMP_SHORT, TIMESTAMP_T, TIMESTAMP_T_SHORT]
);
