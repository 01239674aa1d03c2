use chrono::NaiveDateTime;
use db::{LineItemKind, Locale, line_item, line_item_translation};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use translation::Localized;
use validator_derive::Validate;

/// A single bullet point owned by an industry or a job posting
///
/// `owner_id` points into the table implied by `kind`
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = line_item)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveLineItem {
	pub id:         i32,
	pub kind:       LineItemKind,
	pub owner_id:   i32,
	pub sort_order: i32,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

#[derive(
	AsChangeset,
	Clone,
	Debug,
	Default,
	Deserialize,
	Eq,
	Insertable,
	PartialEq,
	Queryable,
	Selectable,
	Serialize,
	Validate,
)]
#[diesel(table_name = line_item_translation)]
#[diesel(check_for_backend(Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct LineItemFields {
	#[validate(length(
		min = 1,
		max = 1000,
		message = "content must be between 1 and 1000 characters long"
	))]
	pub content: String,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = line_item_translation)]
#[diesel(check_for_backend(Sqlite))]
pub struct LineItemTranslation {
	pub line_item_id: i32,
	pub locale:       Locale,
	#[diesel(embed)]
	pub fields:       LineItemFields,
}

impl Localized for LineItemTranslation {
	type Fields = LineItemFields;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> Self::Fields { self.fields }
}
