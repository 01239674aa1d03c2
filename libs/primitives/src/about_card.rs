use chrono::NaiveDateTime;
use db::{Locale, about_card, about_card_translation};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use translation::Localized;
use validator_derive::Validate;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = about_card)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveAboutCard {
	pub id:         i32,
	pub image_id:   Option<i32>,
	pub sort_order: i32,
	pub is_active:  bool,
	pub deleted_at: Option<NaiveDateTime>,
	pub created_at: NaiveDateTime,
	pub created_by: i32,
	pub updated_at: NaiveDateTime,
	pub updated_by: Option<i32>,
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
#[diesel(table_name = about_card_translation)]
#[diesel(check_for_backend(Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct AboutCardFields {
	#[validate(length(
		min = 1,
		max = 200,
		message = "title must be between 1 and 200 characters long"
	))]
	pub title:       String,
	#[validate(length(min = 1, message = "description must not be empty"))]
	pub description: String,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = about_card_translation)]
#[diesel(check_for_backend(Sqlite))]
pub struct AboutCardTranslation {
	pub about_card_id: i32,
	pub locale:        Locale,
	#[diesel(embed)]
	pub fields:        AboutCardFields,
}

impl Localized for AboutCardTranslation {
	type Fields = AboutCardFields;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> Self::Fields { self.fields }
}
