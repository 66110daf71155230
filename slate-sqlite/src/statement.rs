use crate::{CBox, Connection, Rows};
use libsqlite3_sys::*;
use slate_core::{Error, Result, ToSql, Value, truncate_long};
use std::{
    ffi::{CStr, c_char, c_int, c_void},
    fmt::{self, Display},
};

/// Position of a statement in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Compiled, no parameter bound and the cursor is at the start.
    Prepared,
    /// Parameters bound, the cursor did not move yet.
    Bound,
    /// The cursor is on a row.
    RowAvailable,
    /// The cursor is exhausted (or the last step failed).
    Done,
}

/// A compiled statement, the only owner of its native cursor.
///
/// It borrows the [`Connection`] it was prepared on for its whole life and finalizes the
/// cursor on drop. The same statement can be bound and run any number of times.
pub struct Statement<'c> {
    pub(crate) connection: &'c Connection,
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
    pub(crate) state: State,
    bound: bool,
}

impl<'c> Statement<'c> {
    pub(crate) fn new(connection: &'c Connection, statement: CBox<*mut sqlite3_stmt>) -> Self {
        Self {
            connection,
            statement,
            state: State::Prepared,
            bound: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn connection(&self) -> &'c Connection {
        self.connection
    }

    /// Number of parameter slots in the SQL text.
    pub fn parameter_count(&self) -> usize {
        unsafe { sqlite3_bind_parameter_count(*self.statement) as usize }
    }

    pub fn column_count(&self) -> usize {
        unsafe { sqlite3_column_count(*self.statement) as usize }
    }

    /// Name of the result column at `index`, or `None` when out of range.
    pub fn column_name(&self, index: usize) -> Option<String> {
        if index >= self.column_count() {
            return None;
        }
        unsafe {
            let ptr = sqlite3_column_name(*self.statement, index as c_int);
            (!ptr.is_null()).then(|| CStr::from_ptr(ptr).to_string_lossy().into_owned())
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        (0..self.column_count())
            .map(|i| self.column_name(i).unwrap_or_default())
            .collect()
    }

    /// The SQL text the statement was compiled from.
    pub fn sql(&self) -> String {
        unsafe {
            let ptr = sqlite3_sql(*self.statement);
            if ptr.is_null() {
                return String::new();
            }
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }

    /// Bind every parameter, in order, starting from the first slot.
    ///
    /// Text and blobs are copied by sqlite, nothing borrowed from `params` is retained after
    /// the call. A statement that already stepped is reset first.
    ///
    /// # Panics
    /// When `params.len()` is different from [`Statement::parameter_count`]: the call site does
    /// not match the SQL text.
    pub fn bind(&mut self, params: &[&dyn ToSql]) -> Result<()> {
        let expected = self.parameter_count();
        assert_eq!(
            params.len(),
            expected,
            "The statement expects {} parameters but {} were provided:\n{}",
            expected,
            params.len(),
            truncate_long!(self.sql()),
        );
        if matches!(self.state, State::RowAvailable | State::Done) {
            self.reset();
        }
        for (i, param) in params.iter().enumerate() {
            self.bind_value(i + 1, &param.to_sql())?;
        }
        self.bound = true;
        self.state = State::Bound;
        Ok(())
    }

    /// Bind `value` to the slot at `index` (1-based).
    pub fn bind_value(&mut self, index: usize, value: &Value) -> Result<()> {
        let statement = *self.statement;
        let Ok(slot) = c_int::try_from(index) else {
            return Err(self.bind_error(SQLITE_RANGE, index));
        };
        unsafe {
            let rc = match value {
                Value::Null => sqlite3_bind_null(statement, slot),
                Value::Integer(v) => sqlite3_bind_int64(statement, slot, *v),
                Value::Real(v) => sqlite3_bind_double(statement, slot, *v),
                Value::Text(v) => sqlite3_bind_text64(
                    statement,
                    slot,
                    v.as_ptr() as *const c_char,
                    v.len() as sqlite3_uint64,
                    SQLITE_TRANSIENT(),
                    SQLITE_UTF8 as _,
                ),
                // A zero-length blob has no data pointer to hand over
                Value::Blob(v) if v.is_empty() => sqlite3_bind_zeroblob(statement, slot, 0),
                Value::Blob(v) => sqlite3_bind_blob64(
                    statement,
                    slot,
                    v.as_ptr() as *const c_void,
                    v.len() as sqlite3_uint64,
                    SQLITE_TRANSIENT(),
                ),
            };
            if rc != SQLITE_OK {
                return Err(self.bind_error(rc, index));
            }
        }
        if self.state == State::Prepared {
            self.state = State::Bound;
        }
        self.bound = true;
        Ok(())
    }

    fn bind_error(&self, rc: c_int, index: usize) -> Error {
        let error = self.connection.error(rc);
        log::error!(
            "{}\nCannot bind parameter {} to query:\n{}",
            error,
            index,
            truncate_long!(self.sql())
        );
        error
    }

    /// Set every parameter back to NULL.
    pub fn clear_bindings(&mut self) {
        unsafe {
            sqlite3_clear_bindings(*self.statement);
        }
        self.bound = false;
        if self.state == State::Bound {
            self.state = State::Prepared;
        }
    }

    /// Advance the cursor by one position: `true` when a row is available, `false` once the
    /// statement completed.
    pub fn step(&mut self) -> Result<bool> {
        match unsafe { sqlite3_step(*self.statement) } {
            SQLITE_ROW => {
                self.state = State::RowAvailable;
                Ok(true)
            }
            SQLITE_DONE => {
                self.state = State::Done;
                Ok(false)
            }
            rc => {
                self.state = State::Done;
                let error = self.connection.error(rc);
                log::error!(
                    "{}\nWhile running the query:\n{}",
                    error,
                    truncate_long!(self.sql())
                );
                Err(error)
            }
        }
    }

    /// Bring the cursor back to the start, bound parameters are kept.
    pub fn reset(&mut self) {
        // The result is the one of the last step, already reported by `step`
        unsafe {
            sqlite3_reset(*self.statement);
        }
        self.state = if self.bound {
            State::Bound
        } else {
            State::Prepared
        };
    }

    /// Bind `params` and run a statement that does not return rows.
    ///
    /// Returns the number of rows changed as reported by the connection: it is the count of
    /// the most recently completed INSERT, UPDATE or DELETE on the connection, which is this
    /// statement unless it did not modify anything (a CREATE TABLE reports the value left by
    /// the previous modification).
    ///
    /// # Panics
    /// When the statement produces a row, use [`Statement::query`] for queries. Also panics
    /// like [`Statement::bind`].
    pub fn execute(&mut self, params: &[&dyn ToSql]) -> Result<u64> {
        self.bind(params)?;
        if self.step()? {
            panic!(
                "Called execute on a statement that returns rows, use query instead:\n{}",
                truncate_long!(self.sql())
            );
        }
        self.reset();
        Ok(self.connection.changes())
    }

    /// Bind `params` and return the lazy sequence of the rows. Nothing runs until the sequence
    /// is first advanced.
    ///
    /// # Panics
    /// Like [`Statement::bind`].
    pub fn query<'s>(&'s mut self, params: &[&dyn ToSql]) -> Result<Rows<'s, 'c>> {
        self.bind(params)?;
        Ok(Rows::new(self))
    }

    /// Borrowed native value of the column at `index` on the current row, valid until the
    /// cursor moves.
    pub(crate) fn column_value(&self, index: usize) -> *mut sqlite3_value {
        unsafe { sqlite3_column_value(*self.statement, index as c_int) }
    }
}

impl Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}
