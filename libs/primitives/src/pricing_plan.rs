use chrono::NaiveDateTime;
use db::{BillingPeriod, Locale, pricing_plan, pricing_plan_translation};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use translation::Localized;
use validator_derive::Validate;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = pricing_plan)]
#[diesel(check_for_backend(Sqlite))]
pub struct PrimitivePricingPlan {
	pub id:             i32,
	pub code:           String,
	/// Price in minor currency units
	pub price:          i64,
	pub currency:       String,
	pub billing_period: BillingPeriod,
	pub is_popular:     bool,
	pub sort_order:     i32,
	pub is_active:      bool,
	pub deleted_at:     Option<NaiveDateTime>,
	pub created_at:     NaiveDateTime,
	pub created_by:     i32,
	pub updated_at:     NaiveDateTime,
	pub updated_by:     Option<i32>,
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
#[diesel(table_name = pricing_plan_translation)]
#[diesel(check_for_backend(Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanFields {
	#[validate(length(
		min = 1,
		max = 100,
		message = "name must be between 1 and 100 characters long"
	))]
	pub name:        String,
	#[validate(length(min = 1, message = "description must not be empty"))]
	pub description: String,
	#[validate(length(
		max = 50,
		message = "call to action must be at most 50 characters long"
	))]
	pub cta_label:   Option<String>,
}

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = pricing_plan_translation)]
#[diesel(check_for_backend(Sqlite))]
pub struct PricingPlanTranslation {
	pub pricing_plan_id: i32,
	pub locale:          Locale,
	#[diesel(embed)]
	pub fields:          PricingPlanFields,
}

impl Localized for PricingPlanTranslation {
	type Fields = PricingPlanFields;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> Self::Fields { self.fields }
}
