use crate::{CBox, State, Statement};
use libsqlite3_sys::{sqlite3_value, sqlite3_value_dup, sqlite3_value_free};
use slate_core::{Error, FromSql, Result, Type, Value, ValueRef, native_type};
use std::{
    fmt::{self, Debug},
    sync::Arc,
};

/// Lazy sequence of the rows produced by one execution of a statement.
///
/// Every call to `next` steps the cursor once. The sequence ends when the statement completes
/// or right after yielding an error, and cannot be restarted: run the statement again for a
/// new sequence. Dropping it before the end resets the statement.
pub struct Rows<'s, 'c> {
    statement: &'s mut Statement<'c>,
    labels: Arc<[String]>,
    finished: bool,
}

impl<'s, 'c> Rows<'s, 'c> {
    pub(crate) fn new(statement: &'s mut Statement<'c>) -> Self {
        let labels = statement.column_names().into();
        Self {
            statement,
            labels,
            finished: false,
        }
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.labels
    }

    /// Copy every column of the row the cursor is on.
    ///
    /// The values returned by `sqlite3_column_value` belong to the statement and change on
    /// the next step, reset or finalize: each one is duplicated so the row owns it.
    fn snapshot(&self) -> Result<Row> {
        let values = (0..self.labels.len())
            .map(|i| {
                let value = unsafe { sqlite3_value_dup(self.statement.column_value(i)) };
                if value.is_null() {
                    let error = Error::sqlite(
                        libsqlite3_sys::SQLITE_NOMEM,
                        Some(format!("Could not copy the value of column {i}")),
                    );
                    log::error!("{}", error);
                    return Err(error);
                }
                Ok(OwnedValue {
                    data_type: unsafe { native_type(value) },
                    value: CBox::new(value, |p| unsafe {
                        sqlite3_value_free(p);
                    }),
                })
            })
            .collect::<Result<_>>()?;
        Ok(Row {
            labels: self.labels.clone(),
            values,
        })
    }
}

impl Iterator for Rows<'_, '_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.statement.step() {
            Ok(true) => {
                let row = self.snapshot();
                if row.is_err() {
                    self.finished = true;
                }
                Some(row)
            }
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// A sequence dropped while the cursor is on a row releases the cursor, so the statement
/// does not keep its read transaction open.
impl Drop for Rows<'_, '_> {
    fn drop(&mut self) {
        if self.statement.state() == State::RowAvailable {
            self.statement.reset();
        }
    }
}

/// A column value owned by a row, with the storage class it had when captured.
struct OwnedValue {
    value: CBox<*mut sqlite3_value>,
    data_type: Type,
}

impl OwnedValue {
    fn view(&self) -> ValueRef<'_> {
        unsafe { ValueRef::from_raw(*self.value, self.data_type) }
    }
}

/// Snapshot of one row: the values are copies that live as long as the row, independently of
/// the statement that produced them.
pub struct Row {
    labels: Arc<[String]>,
    values: Box<[OwnedValue]>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.labels
    }

    /// Decode the column at `index` (from 0) as `T`.
    ///
    /// ```rust,ignore
    /// let name: String = row.get(1)?;
    /// let email: Option<String> = row.get(2)?;
    /// ```
    pub fn get<T: FromSql>(&self, index: usize) -> Result<T> {
        let Some(value) = self.values.get(index) else {
            let error = Error::NoSuchColumn(index);
            log::error!("{} (the row has {} columns)", error, self.values.len());
            return Err(error);
        };
        T::decode(value.view())
    }

    /// Every column decoded with its storage class.
    pub fn values(&self) -> Result<Vec<Value>> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

impl Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (i, label) in self.labels.iter().enumerate() {
            match self.get::<Value>(i) {
                Ok(v) => map.entry(label, &v),
                Err(e) => map.entry(label, &e),
            };
        }
        map.finish()
    }
}
