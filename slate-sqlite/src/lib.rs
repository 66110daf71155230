mod cbox;
mod connection;
mod rows;
mod statement;
mod table;

pub(crate) use cbox::*;
pub use connection::*;
pub use rows::*;
pub use statement::*;
pub use table::*;

/// Build the parameter list of [`Statement::bind`], [`Statement::execute`] and
/// [`Statement::query`] out of values of different types.
///
/// ```rust,ignore
/// statement.execute(params![1, "Alice", None::<String>])?;
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[] as &[&dyn $crate::ToSql]
    };
    ($($param:expr),+ $(,)?) => {
        &[$(&$param as &dyn $crate::ToSql),+] as &[&dyn $crate::ToSql]
    };
}

#[doc(hidden)]
pub use slate_core::ToSql;
