//! Types shared by the application and every model crate

#[macro_use]
extern crate tracing;

mod error;

pub use error::*;

pub type DbPool = deadpool_diesel::sqlite::Pool;
pub type DbConn = deadpool_diesel::sqlite::Object;
