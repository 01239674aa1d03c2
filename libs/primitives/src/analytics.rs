use chrono::NaiveDateTime;
use db::{Locale, page_view, visitor};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = visitor)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveVisitor {
	pub id:            i32,
	pub visitor_key:   String,
	pub user_agent:    Option<String>,
	pub first_seen_at: NaiveDateTime,
	pub last_seen_at:  NaiveDateTime,
}

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = page_view)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitivePageView {
	pub id:               i32,
	pub visitor_id:       i32,
	pub path:             String,
	pub locale:           Locale,
	pub referrer:         Option<String>,
	pub duration_seconds: Option<i32>,
	pub viewed_at:        NaiveDateTime,
}
