use chrono::NaiveDateTime;
use db::{Locale, testimonial, testimonial_translation};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use translation::Localized;
use validator_derive::Validate;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = testimonial)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveTestimonial {
	pub id:          i32,
	pub author_name: String,
	pub author_role: Option<String>,
	pub company:     Option<String>,
	pub rating:      i32,
	pub avatar_id:   Option<i32>,
	pub sort_order:  i32,
	pub is_active:   bool,
	pub deleted_at:  Option<NaiveDateTime>,
	pub created_at:  NaiveDateTime,
	pub created_by:  i32,
	pub updated_at:  NaiveDateTime,
	pub updated_by:  Option<i32>,
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
#[diesel(table_name = testimonial_translation)]
#[diesel(check_for_backend(Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialFields {
	#[validate(length(
		min = 1,
		max = 2000,
		message = "quote must be between 1 and 2000 characters long"
	))]
	pub quote: String,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = testimonial_translation)]
#[diesel(check_for_backend(Sqlite))]
pub struct TestimonialTranslation {
	pub testimonial_id: i32,
	pub locale:         Locale,
	#[diesel(embed)]
	pub fields:         TestimonialFields,
}

impl Localized for TestimonialTranslation {
	type Fields = TestimonialFields;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> Self::Fields { self.fields }
}
