use chrono::NaiveDateTime;
use db::{Role, user_account};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = user_account)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveUser {
	pub id:            i32,
	pub username:      String,
	pub email:         String,
	#[serde(skip)]
	pub password_hash: String,
	pub role:          Role,
	pub is_active:     bool,
	pub last_login_at: Option<NaiveDateTime>,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

/// The identifying bits of a user, embedded as creator/updater of content
#[derive(
	Clone, Debug, Deserialize, PartialEq, Eq, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = user_account)]
#[diesel(check_for_backend(Sqlite))]
pub struct UserSummary {
	pub id:       i32,
	pub username: String,
	pub email:    String,
}
