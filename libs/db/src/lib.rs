//! Database schema and SQL-mapped enums shared by every crate in the
//! workspace

mod r#enum;
mod schema;

pub use r#enum::*;
pub use schema::*;
