use crate::{CBox, Statement};
use libsqlite3_sys::*;
use slate_core::{Error, Result, error_message_from_ptr, truncate_long};
use std::{
    ffi::{CStr, CString, c_char, c_int},
    ops::BitOr,
    path::Path,
    ptr,
};

/// Location opening a private, in-memory database.
pub const MEMORY: &str = ":memory:";

/// Flags passed to `sqlite3_open_v2`, combined with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags(pub(crate) c_int);

impl OpenFlags {
    pub const READ_ONLY: OpenFlags = OpenFlags(SQLITE_OPEN_READONLY);
    pub const READ_WRITE: OpenFlags = OpenFlags(SQLITE_OPEN_READWRITE);
    pub const CREATE: OpenFlags = OpenFlags(SQLITE_OPEN_CREATE);
    pub const URI: OpenFlags = OpenFlags(SQLITE_OPEN_URI);
    pub const MEMORY: OpenFlags = OpenFlags(SQLITE_OPEN_MEMORY);
    pub const NO_MUTEX: OpenFlags = OpenFlags(SQLITE_OPEN_NOMUTEX);
    pub const FULL_MUTEX: OpenFlags = OpenFlags(SQLITE_OPEN_FULLMUTEX);

    pub fn bits(self) -> c_int {
        self.0
    }

    pub fn contains(self, other: OpenFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for OpenFlags {
    fn default() -> Self {
        OpenFlags::READ_WRITE | OpenFlags::CREATE
    }
}

impl BitOr for OpenFlags {
    type Output = OpenFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        OpenFlags(self.0 | rhs.0)
    }
}

/// An open database, the only owner of its native handle.
///
/// Statements borrow the connection, so it can only be dropped (and the handle closed) once
/// every statement created from it is gone. The connection can be moved to another thread but
/// not shared between threads.
pub struct Connection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl Connection {
    /// Open (creating it if missing) the database at `location`. Use [`MEMORY`] for a private
    /// in-memory database.
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_flags(location, OpenFlags::default())
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(MEMORY)
    }

    pub fn open_with_flags(location: impl AsRef<Path>, flags: OpenFlags) -> Result<Self> {
        let location = location.as_ref();
        let Some(location) = location.to_str() else {
            let error = Error::InvalidPath(location.to_path_buf());
            log::error!("{}", error);
            return Err(error);
        };
        Self::open_raw(CString::new(location)?, flags)
    }

    /// Open a database from a url in the form `sqlite://<path>[?<parameters>]`.
    ///
    /// The part after the scheme is handed to sqlite as a `file:` URI, so the usual URI
    /// parameters apply (`mode=ro`, `mode=rw`, `mode=rwc`, `mode=memory`, `cache=shared`, ...).
    pub fn connect(url: &str) -> Result<Self> {
        const PREFIX: &str = "sqlite://";
        let Some(location) = url.strip_prefix(PREFIX) else {
            let error = Error::InvalidUrl(url.to_string());
            log::error!("{}", error);
            return Err(error);
        };
        Self::open_raw(
            CString::new(format!("file:{location}"))?,
            OpenFlags::default() | OpenFlags::URI,
        )
    }

    fn open_raw(location: CString, flags: OpenFlags) -> Result<Self> {
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        unsafe {
            let rc = sqlite3_open_v2(location.as_ptr(), &mut *connection, flags.0, ptr::null());
            if rc != SQLITE_OK {
                // The handle is allocated even on failure, it is closed when `connection` drops
                let description = (!connection.is_null())
                    .then(|| error_message_from_ptr(sqlite3_errmsg(*connection)));
                let error = Error::sqlite(rc, description);
                log::error!(
                    "Could not open `{}`: {}",
                    location.to_string_lossy(),
                    error
                );
                return Err(error);
            }
            sqlite3_extended_result_codes(*connection, 1);
        }
        log::debug!("Opened `{}`", location.to_string_lossy());
        Ok(Self { connection })
    }

    /// Compile the first statement in `sql`.
    ///
    /// Fails with [`Error::MultipleStatements`] if anything other than whitespace or comments
    /// follows it, use [`Connection::execute_batch`] to run scripts.
    pub fn prepare(&self, sql: &str) -> Result<Statement<'_>> {
        let (statement, tail) = self.prepare_raw(sql)?;
        if !tail.trim().is_empty() {
            // Comments alone compile to no statement, anything else (even SQL that does not
            // compile) is a second statement
            let trailing = match self.prepare_raw(tail) {
                Ok((next, _)) => !next.is_null(),
                Err(..) => true,
            };
            if trailing {
                let error = Error::MultipleStatements(tail.trim().to_string());
                log::error!("{}", error);
                return Err(error);
            }
        }
        if statement.is_null() {
            // Empty or comment only: there is nothing to step, sqlite reports it as misuse
            let error = Error::sqlite(
                SQLITE_MISUSE,
                Some(format!("No statement found in:\n{}", truncate_long!(sql))),
            );
            log::error!("{}", error);
            return Err(error);
        }
        Ok(Statement::new(self, statement))
    }

    /// Compile the first statement of `sql`, returning it along with the uncompiled rest.
    /// The statement is null when `sql` contains only whitespace or comments.
    pub(crate) fn prepare_raw<'s>(
        &self,
        sql: &'s str,
    ) -> Result<(CBox<*mut sqlite3_stmt>, &'s str)> {
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail: *const c_char = ptr::null();
        let Ok(len) = c_int::try_from(sql.len()) else {
            let error = Error::sqlite(
                SQLITE_TOOBIG,
                Some(format!("The query is {} bytes long", sql.len())),
            );
            log::error!("{}", error);
            return Err(error);
        };
        let query = CString::new(sql).map_err(|e| {
            let error = Error::from(e);
            log::error!("{}\nWhile preparing the query:\n{}", error, truncate_long!(sql));
            error
        })?;
        unsafe {
            let rc = sqlite3_prepare_v2(
                *self.connection,
                query.as_ptr(),
                len,
                &mut *statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                let error = self.error(rc);
                log::error!(
                    "{}\nWhile preparing the query:\n{}",
                    error,
                    truncate_long!(sql)
                );
                return Err(error);
            }
        }
        let consumed = if tail.is_null() {
            sql.len()
        } else {
            tail as usize - query.as_ptr() as usize
        };
        Ok((statement, &sql[consumed..]))
    }

    /// Run every statement in `sql` in order, rows produced by queries are discarded.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let mut remaining = sql;
        loop {
            let (statement, tail) = self.prepare_raw(remaining)?;
            if statement.is_null() {
                break;
            }
            let mut statement = Statement::new(self, statement);
            while statement.step()? {}
            remaining = tail;
        }
        Ok(())
    }

    /// Rows modified by the most recently completed INSERT, UPDATE or DELETE on this connection.
    pub fn changes(&self) -> u64 {
        unsafe { sqlite3_changes64(*self.connection) as u64 }
    }

    /// Rows modified since the connection was opened.
    pub fn total_changes(&self) -> u64 {
        unsafe { sqlite3_total_changes64(*self.connection) as u64 }
    }

    pub fn last_insert_rowid(&self) -> i64 {
        unsafe { sqlite3_last_insert_rowid(*self.connection) }
    }

    /// False inside an explicit transaction.
    pub fn is_autocommit(&self) -> bool {
        unsafe { sqlite3_get_autocommit(*self.connection) != 0 }
    }

    /// File backing the main database, `None` for in-memory and temporary databases.
    pub fn path(&self) -> Option<String> {
        unsafe {
            let ptr = sqlite3_db_filename(*self.connection, c"main".as_ptr());
            if ptr.is_null() {
                return None;
            }
            let path = CStr::from_ptr(ptr).to_string_lossy();
            (!path.is_empty()).then(|| path.into_owned())
        }
    }

    /// Error for `result_code` carrying the current diagnostic of this connection.
    pub(crate) fn error(&self, result_code: c_int) -> Error {
        let description = unsafe { error_message_from_ptr(sqlite3_errmsg(*self.connection)) };
        Error::sqlite(result_code, Some(description))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        log::debug!("Closing the connection {:p}", *self.connection);
    }
}
