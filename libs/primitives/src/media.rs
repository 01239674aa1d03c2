use chrono::NaiveDateTime;
use db::{MediaKind, media};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = media)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveMedia {
	pub id:            i32,
	pub kind:          MediaKind,
	pub original_name: String,
	pub file_path:     String,
	pub mime_type:     String,
	pub size_bytes:    i64,
	pub alt_text:      Option<String>,
	pub uploaded_by:   i32,
	pub created_at:    NaiveDateTime,
	pub deleted_at:    Option<NaiveDateTime>,
}
