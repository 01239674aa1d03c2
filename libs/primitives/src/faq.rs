use chrono::NaiveDateTime;
use db::{
	Locale,
	faq,
	faq_category,
	faq_category_translation,
	faq_translation,
};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use translation::Localized;
use validator_derive::Validate;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = faq_category)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveFaqCategory {
	pub id:         i32,
	pub slug:       String,
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
#[diesel(table_name = faq_category_translation)]
#[diesel(check_for_backend(Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct FaqCategoryFields {
	#[validate(length(
		min = 1,
		max = 100,
		message = "name must be between 1 and 100 characters long"
	))]
	pub name: String,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = faq_category_translation)]
#[diesel(check_for_backend(Sqlite))]
pub struct FaqCategoryTranslation {
	pub faq_category_id: i32,
	pub locale:          Locale,
	#[diesel(embed)]
	pub fields:          FaqCategoryFields,
}

impl Localized for FaqCategoryTranslation {
	type Fields = FaqCategoryFields;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> Self::Fields { self.fields }
}

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = faq)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveFaq {
	pub id:          i32,
	pub category_id: Option<i32>,
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
#[diesel(table_name = faq_translation)]
#[diesel(check_for_backend(Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct FaqFields {
	#[validate(length(
		min = 1,
		max = 500,
		message = "question must be between 1 and 500 characters long"
	))]
	pub question: String,
	#[validate(length(min = 1, message = "answer must not be empty"))]
	pub answer:   String,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = faq_translation)]
#[diesel(check_for_backend(Sqlite))]
pub struct FaqTranslation {
	pub faq_id: i32,
	pub locale: Locale,
	#[diesel(embed)]
	pub fields: FaqFields,
}

impl Localized for FaqTranslation {
	type Fields = FaqFields;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> Self::Fields { self.fields }
}
