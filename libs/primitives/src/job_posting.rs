use chrono::NaiveDateTime;
use db::{EmploymentType, Locale, job_posting, job_posting_translation};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use translation::Localized;
use validator_derive::Validate;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = job_posting)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitiveJobPosting {
	pub id:              i32,
	pub code:            String,
	pub department:      String,
	pub location:        String,
	pub employment_type: EmploymentType,
	pub closes_at:       Option<NaiveDateTime>,
	pub sort_order:      i32,
	pub is_active:       bool,
	pub deleted_at:      Option<NaiveDateTime>,
	pub created_at:      NaiveDateTime,
	pub created_by:      i32,
	pub updated_at:      NaiveDateTime,
	pub updated_by:      Option<i32>,
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
#[diesel(table_name = job_posting_translation)]
#[diesel(check_for_backend(Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingFields {
	#[validate(length(
		min = 1,
		max = 200,
		message = "title must be between 1 and 200 characters long"
	))]
	pub title:       String,
	#[validate(length(
		min = 1,
		max = 500,
		message = "summary must be between 1 and 500 characters long"
	))]
	pub summary:     String,
	#[validate(length(min = 1, message = "description must not be empty"))]
	pub description: String,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = job_posting_translation)]
#[diesel(check_for_backend(Sqlite))]
pub struct JobPostingTranslation {
	pub job_posting_id: i32,
	pub locale:         Locale,
	#[diesel(embed)]
	pub fields:         JobPostingFields,
}

impl Localized for JobPostingTranslation {
	type Fields = JobPostingFields;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> Self::Fields { self.fields }
}
