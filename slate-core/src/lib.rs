mod decimal;
mod error;
mod from_sql;
mod raw_representable;
mod temporal;
mod to_sql;
mod util;
mod value;
mod value_ref;

pub use error::*;
pub use from_sql::*;
pub use raw_representable::*;
pub use to_sql::*;
pub use util::*;
pub use value::*;
pub use value_ref::*;

#[doc(hidden)]
pub use ::log;

pub type Result<T> = std::result::Result<T, Error>;
