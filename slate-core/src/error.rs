use crate::error_message_from_ptr;
use libsqlite3_sys::*;
use std::{
    ffi::{NulError, c_int},
    path::PathBuf,
};

/// Primary class of a native sqlite result code.
///
/// Extended result codes (for example `SQLITE_CONSTRAINT_PRIMARYKEY`) carry their class in
/// the low byte, [`Code::from_result_code`] masks them before the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// Internal logic error in SQLite
    InternalMalfunction,
    /// Access permission denied
    PermissionDenied,
    /// Callback routine requested an abort
    Aborted,
    /// The database file is locked
    Busy,
    /// A table in the database is locked
    Locked,
    /// A malloc() failed
    OutOfMemory,
    /// Attempt to write a readonly database
    ReadOnly,
    /// Operation terminated by sqlite3_interrupt()
    Interrupted,
    /// Some kind of disk I/O error occurred
    IoFailure,
    /// The database disk image is malformed
    Corrupt,
    /// Unknown opcode in sqlite3_file_control()
    NotFound,
    /// Insertion failed because database is full
    DiskFull,
    /// Unable to open the database file
    CannotOpen,
    /// Database lock protocol error
    LockingProtocolFailed,
    /// The database schema changed
    SchemaChanged,
    /// String or BLOB exceeds size limit
    TooBig,
    /// Abort due to constraint violation
    ConstraintViolation,
    /// Data type mismatch
    TypeMismatch,
    /// Library used incorrectly
    Misuse,
    /// Uses OS features not supported on host
    UnsupportedOsFeature,
    /// Authorization denied
    AuthDenied,
    /// 2nd parameter to sqlite3_bind out of range
    ParameterOutOfRange,
    /// File opened that is not a database file
    NotADatabase,
    /// Generic error or any code without a dedicated class
    Unknown,
}

impl Code {
    pub fn from_result_code(result_code: c_int) -> Self {
        match result_code & 0xff {
            SQLITE_INTERNAL => Code::InternalMalfunction,
            SQLITE_PERM => Code::PermissionDenied,
            SQLITE_ABORT => Code::Aborted,
            SQLITE_BUSY => Code::Busy,
            SQLITE_LOCKED => Code::Locked,
            SQLITE_NOMEM => Code::OutOfMemory,
            SQLITE_READONLY => Code::ReadOnly,
            SQLITE_INTERRUPT => Code::Interrupted,
            SQLITE_IOERR => Code::IoFailure,
            SQLITE_CORRUPT => Code::Corrupt,
            SQLITE_NOTFOUND => Code::NotFound,
            SQLITE_FULL => Code::DiskFull,
            SQLITE_CANTOPEN => Code::CannotOpen,
            SQLITE_PROTOCOL => Code::LockingProtocolFailed,
            SQLITE_SCHEMA => Code::SchemaChanged,
            SQLITE_TOOBIG => Code::TooBig,
            SQLITE_CONSTRAINT => Code::ConstraintViolation,
            SQLITE_MISMATCH => Code::TypeMismatch,
            SQLITE_MISUSE => Code::Misuse,
            SQLITE_NOLFS => Code::UnsupportedOsFeature,
            SQLITE_AUTH => Code::AuthDenied,
            SQLITE_RANGE => Code::ParameterOutOfRange,
            SQLITE_NOTADB => Code::NotADatabase,
            _ => Code::Unknown,
        }
    }

    /// The primary result code of this class, `SQLITE_ERROR` for [`Code::Unknown`].
    pub fn result_code(self) -> c_int {
        match self {
            Code::InternalMalfunction => SQLITE_INTERNAL,
            Code::PermissionDenied => SQLITE_PERM,
            Code::Aborted => SQLITE_ABORT,
            Code::Busy => SQLITE_BUSY,
            Code::Locked => SQLITE_LOCKED,
            Code::OutOfMemory => SQLITE_NOMEM,
            Code::ReadOnly => SQLITE_READONLY,
            Code::Interrupted => SQLITE_INTERRUPT,
            Code::IoFailure => SQLITE_IOERR,
            Code::Corrupt => SQLITE_CORRUPT,
            Code::NotFound => SQLITE_NOTFOUND,
            Code::DiskFull => SQLITE_FULL,
            Code::CannotOpen => SQLITE_CANTOPEN,
            Code::LockingProtocolFailed => SQLITE_PROTOCOL,
            Code::SchemaChanged => SQLITE_SCHEMA,
            Code::TooBig => SQLITE_TOOBIG,
            Code::ConstraintViolation => SQLITE_CONSTRAINT,
            Code::TypeMismatch => SQLITE_MISMATCH,
            Code::Misuse => SQLITE_MISUSE,
            Code::UnsupportedOsFeature => SQLITE_NOLFS,
            Code::AuthDenied => SQLITE_AUTH,
            Code::ParameterOutOfRange => SQLITE_RANGE,
            Code::NotADatabase => SQLITE_NOTADB,
            Code::Unknown => SQLITE_ERROR,
        }
    }
}

/// Every failure reported by slate.
///
/// Native failures always come through [`Error::Sqlite`]: `message` is the generic text of
/// the result code while `description` is the diagnostic of the connection at the time the
/// error was built (absent when there was no connection to ask).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{message}{}", describe(.description))]
    Sqlite {
        code: Code,
        extended_code: c_int,
        message: String,
        description: Option<String>,
    },
    #[error("No such column {0}")]
    NoSuchColumn(usize),
    #[error("Cannot decode the value as {type_name}: {reason}")]
    Decode {
        type_name: &'static str,
        reason: String,
    },
    #[error("Invalid C string: {0}")]
    InvalidString(#[from] NulError),
    #[error("Database location `{}` is not valid UTF-8", .0.display())]
    InvalidPath(PathBuf),
    #[error("Expected sqlite connection url to start with `sqlite://`, found `{0}`")]
    InvalidUrl(String),
    #[error("Cannot prepare more than one statement at a time, remaining:\n{0}")]
    MultipleStatements(String),
}

fn describe(description: &Option<String>) -> String {
    description
        .as_ref()
        .map(|v| format!(" ({v})"))
        .unwrap_or_default()
}

impl Error {
    /// Build an error from a native result code and the optional diagnostic of the connection.
    pub fn sqlite(result_code: c_int, description: Option<String>) -> Self {
        let message = error_message_from_ptr(unsafe { sqlite3_errstr(result_code) });
        Error::Sqlite {
            code: Code::from_result_code(result_code),
            extended_code: result_code,
            message,
            description,
        }
    }

    pub fn decode<T: ?Sized>(reason: impl Into<String>) -> Self {
        Error::Decode {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// Kind of the native failure, `None` for errors raised by slate itself.
    pub fn code(&self) -> Option<Code> {
        match self {
            Error::Sqlite { code, .. } => Some(*code),
            _ => None,
        }
    }
}
