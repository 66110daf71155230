//! Slate: safe, typed statements, rows and values over the native SQLite interface.
//!
//! ```rust
//! use slate::{Connection, MEMORY, params};
//!
//! let connection = Connection::open(MEMORY).unwrap();
//! connection
//!     .execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
//!     .unwrap();
//! let mut insert = connection
//!     .prepare("INSERT INTO users (id, name) VALUES (?, ?)")
//!     .unwrap();
//! assert_eq!(insert.execute(params![1, "Alice"]).unwrap(), 1);
//! assert_eq!(insert.execute(params![2, "Bob"]).unwrap(), 1);
//!
//! let mut select = connection.prepare("SELECT id, name FROM users ORDER BY id").unwrap();
//! let rows = select
//!     .query(params![])
//!     .unwrap()
//!     .collect::<slate::Result<Vec<_>>>()
//!     .unwrap();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].get::<i64>(0).unwrap(), 2);
//! assert_eq!(rows[1].get::<String>(1).unwrap(), "Bob");
//! ```
pub use slate_core::*;
pub use slate_sqlite::*;
