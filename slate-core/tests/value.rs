#[cfg(test)]
mod tests {
    use libsqlite3_sys::{
        SQLITE_BUSY_SNAPSHOT, SQLITE_CONSTRAINT, SQLITE_CONSTRAINT_PRIMARYKEY,
        SQLITE_CONSTRAINT_UNIQUE, SQLITE_ERROR, SQLITE_IOERR_READ, SQLITE_MISUSE,
    };
    use rust_decimal::Decimal;
    use slate_core::{
        Code, Error, RawRepresentable, ToSql, Type, Value, impl_raw_representable,
    };
    use std::{borrow::Cow, rc::Rc, str::FromStr, sync::Arc};
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    #[derive(Debug, PartialEq)]
    enum Mood {
        Happy,
        Grumpy,
    }

    impl RawRepresentable for Mood {
        type Raw = String;
        fn raw_value(&self) -> String {
            match self {
                Mood::Happy => "happy".into(),
                Mood::Grumpy => "grumpy".into(),
            }
        }
        fn from_raw_value(raw: String) -> Option<Self> {
            match raw.as_str() {
                "happy" => Some(Mood::Happy),
                "grumpy" => Some(Mood::Grumpy),
                _ => None,
            }
        }
    }

    impl_raw_representable!(Mood);

    #[test]
    fn code_masks_extended_codes() {
        assert_eq!(
            Code::from_result_code(SQLITE_CONSTRAINT_UNIQUE),
            Code::ConstraintViolation
        );
        assert_eq!(
            Code::from_result_code(SQLITE_CONSTRAINT_PRIMARYKEY),
            Code::ConstraintViolation
        );
        assert_eq!(Code::from_result_code(SQLITE_BUSY_SNAPSHOT), Code::Busy);
        assert_eq!(Code::from_result_code(SQLITE_IOERR_READ), Code::IoFailure);
        assert_eq!(Code::from_result_code(SQLITE_MISUSE), Code::Misuse);
    }

    #[test]
    fn code_unknown() {
        assert_eq!(Code::from_result_code(SQLITE_ERROR), Code::Unknown);
        assert_eq!(Code::from_result_code(0xfe), Code::Unknown);
        assert_eq!(Code::Unknown.result_code(), SQLITE_ERROR);
    }

    #[test]
    fn code_result_code_inverse() {
        for code in [
            Code::InternalMalfunction,
            Code::PermissionDenied,
            Code::Aborted,
            Code::Busy,
            Code::Locked,
            Code::OutOfMemory,
            Code::ReadOnly,
            Code::Interrupted,
            Code::IoFailure,
            Code::Corrupt,
            Code::NotFound,
            Code::DiskFull,
            Code::CannotOpen,
            Code::LockingProtocolFailed,
            Code::SchemaChanged,
            Code::TooBig,
            Code::ConstraintViolation,
            Code::TypeMismatch,
            Code::Misuse,
            Code::UnsupportedOsFeature,
            Code::AuthDenied,
            Code::ParameterOutOfRange,
            Code::NotADatabase,
        ] {
            assert_eq!(Code::from_result_code(code.result_code()), code);
        }
    }

    #[test]
    fn error_message() {
        let error = Error::sqlite(SQLITE_CONSTRAINT_UNIQUE, None);
        assert_eq!(error.code(), Some(Code::ConstraintViolation));
        let Error::Sqlite {
            extended_code,
            ref message,
            ref description,
            ..
        } = error
        else {
            panic!("Expected a sqlite error");
        };
        assert_eq!(extended_code, SQLITE_CONSTRAINT_UNIQUE);
        assert_eq!(message, "constraint failed");
        assert_eq!(*description, None);
        assert_eq!(error.to_string(), "constraint failed");
        let error = Error::sqlite(
            SQLITE_CONSTRAINT,
            Some("UNIQUE constraint failed: users.id".into()),
        );
        assert_eq!(
            error.to_string(),
            "constraint failed (UNIQUE constraint failed: users.id)"
        );
        assert_eq!(Error::NoSuchColumn(3).code(), None);
        assert_eq!(Error::NoSuchColumn(3).to_string(), "No such column 3");
    }

    #[test]
    fn value_type() {
        assert_eq!(Value::Null.data_type(), Type::Null);
        assert_eq!(Value::Integer(1).data_type(), Type::Integer);
        assert_eq!(Value::Real(1.0).data_type(), Type::Real);
        assert_eq!(Value::Text("".into()).data_type(), Type::Text);
        assert_eq!(Value::Blob(vec![]).data_type(), Type::Blob);
        assert!(Value::default().is_null());
        assert_eq!(Type::from_raw(libsqlite3_sys::SQLITE_FLOAT), Some(Type::Real));
        assert_eq!(Type::from_raw(42), None);
    }

    #[test]
    fn value_from() {
        assert_eq!(Value::from(7i64), Value::Integer(7));
        assert_eq!(Value::from(-7i32), Value::Integer(-7));
        assert_eq!(Value::from(true), Value::Integer(1));
        assert_eq!(Value::from(0.5), Value::Real(0.5));
        assert_eq!(Value::from("hi"), Value::Text("hi".into()));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Blob(vec![1, 2]));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(-12).to_string(), "-12");
        assert_eq!(Value::Real(1.0).to_string(), "1.0");
        assert_eq!(Value::Real(2.25).to_string(), "2.25");
        assert_eq!(Value::Real(1e20).to_string(), "1e20");
        assert_eq!(Value::Text("abc".into()).to_string(), "abc");
        assert_eq!(Value::Blob(vec![0x00, 0xAB, 0x10]).to_string(), "X'00AB10'");
        assert_eq!(Value::Blob(vec![]).to_string(), "X''");
    }

    #[test]
    fn to_sql_primitives() {
        assert_eq!(true.to_sql(), Value::Integer(1));
        assert_eq!(false.to_sql(), Value::Integer(0));
        assert_eq!(i8::MIN.to_sql(), Value::Integer(-128));
        assert_eq!(u32::MAX.to_sql(), Value::Integer(4294967295));
        assert_eq!(i64::MAX.to_sql(), Value::Integer(i64::MAX));
        assert_eq!(1.5f32.to_sql(), Value::Real(1.5));
        assert_eq!('z'.to_sql(), Value::Text("z".into()));
        assert_eq!("text".to_sql(), Value::Text("text".into()));
        assert_eq!(String::from("owned").to_sql(), Value::Text("owned".into()));
        assert_eq!(
            Cow::<str>::Borrowed("cow").to_sql(),
            Value::Text("cow".into())
        );
        assert_eq!(vec![9u8].to_sql(), Value::Blob(vec![9]));
        assert_eq!([1u8, 2, 3].to_sql(), Value::Blob(vec![1, 2, 3]));
        assert_eq!(Vec::<u8>::new().to_sql(), Value::Blob(vec![]));
    }

    #[test]
    fn to_sql_wrappers() {
        assert_eq!(None::<i32>.to_sql(), Value::Null);
        assert_eq!(Some(5u8).to_sql(), Value::Integer(5));
        assert_eq!(Some(None::<String>).to_sql(), Value::Null);
        assert_eq!(Box::new(3i16).to_sql(), Value::Integer(3));
        assert_eq!(Rc::new("rc").to_sql(), Value::Text("rc".into()));
        assert_eq!(Arc::<str>::from("arc").to_sql(), Value::Text("arc".into()));
        assert_eq!((&&42i64).to_sql(), Value::Integer(42));
        assert_eq!(Value::Real(0.25).to_sql(), Value::Real(0.25));
        let params: &[&dyn ToSql] = &[&1, &"a", &None::<f64>];
        assert_eq!(
            params.iter().map(|v| v.to_sql()).collect::<Vec<_>>(),
            [Value::Integer(1), Value::Text("a".into()), Value::Null]
        );
    }

    #[test]
    fn to_sql_uuid() {
        let uuid = Uuid::from_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let Value::Blob(bytes) = uuid.to_sql() else {
            panic!("Expected a blob");
        };
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes, uuid.as_bytes());
        assert_eq!(bytes[0], 0x67);
    }

    #[test]
    fn to_sql_raw_representable() {
        assert_eq!(Mood::Happy.to_sql(), Value::Text("happy".into()));
        assert_eq!(Some(Mood::Grumpy).to_sql(), Value::Text("grumpy".into()));
        assert_eq!(None::<Mood>.to_sql(), Value::Null);
    }

    #[test]
    fn to_sql_decimal_and_time() {
        assert_eq!(
            Decimal::from_str("-1234.5600").unwrap().to_sql(),
            Value::Text("-1234.5600".into())
        );
        assert_eq!(
            date!(2024 - 02 - 29).to_sql(),
            Value::Text("2024-02-29".into())
        );
        assert_eq!(time!(08:05:09).to_sql(), Value::Text("08:05:09".into()));
        assert_eq!(
            time!(23:59:01.25).to_sql(),
            Value::Text("23:59:01.25".into())
        );
        assert_eq!(
            datetime!(1999-12-31 23:00:00).to_sql(),
            Value::Text("1999-12-31 23:00:00".into())
        );
    }
}
