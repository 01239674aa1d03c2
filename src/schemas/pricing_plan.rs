use std::sync::LazyLock;

use common::Error;
use db::{BillingPeriod, Locale};
use pricing_plan::{NewPricingPlan, PricingPlan, PricingPlanUpdate};
use primitives::PricingPlanFields;
use regex::Regex;
use serde::{Deserialize, Serialize};
use translation::{TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::validation::FieldCheck;
use crate::schemas::{AuditResponse, BuildResponse, ResponseContext};

static CURRENCY_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-zA-Z]{3}$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanResponse {
	pub id:             i32,
	pub code:           String,
	/// In minor units of `currency`
	pub price:          i64,
	pub currency:       String,
	pub billing_period: BillingPeriod,
	pub is_popular:     bool,
	#[serde(flatten)]
	pub fields:         PricingPlanFields,
	pub sort_order:     i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlanAdminResponse {
	pub id:             i32,
	pub code:           String,
	pub price:          i64,
	pub currency:       String,
	pub billing_period: BillingPeriod,
	pub is_popular:     bool,
	pub sort_order:     i32,
	pub is_active:      bool,
	pub translations:   Translations<PricingPlanFields>,
	#[serde(flatten)]
	pub audit:          AuditResponse,
}

impl BuildResponse<PricingPlanResponse> for PricingPlan {
	fn build_response(self, ctx: &ResponseContext) -> PricingPlanResponse {
		PricingPlanResponse {
			id:             self.primitive.id,
			code:           self.primitive.code,
			price:          self.primitive.price,
			currency:       self.primitive.currency,
			billing_period: self.primitive.billing_period,
			is_popular:     self.primitive.is_popular,
			fields:         ctx.localize(self.translations),
			sort_order:     self.primitive.sort_order,
		}
	}
}

impl BuildResponse<PricingPlanAdminResponse> for PricingPlan {
	fn build_response(self, _ctx: &ResponseContext) -> PricingPlanAdminResponse {
		PricingPlanAdminResponse {
			id:             self.primitive.id,
			code:           self.primitive.code,
			price:          self.primitive.price,
			currency:       self.primitive.currency,
			billing_period: self.primitive.billing_period,
			is_popular:     self.primitive.is_popular,
			sort_order:     self.primitive.sort_order,
			is_active:      self.primitive.is_active,
			translations:   merge_all_translations(self.translations),
			audit:          AuditResponse::new(
				self.primitive.created_at,
				self.primitive.updated_at,
				self.primitive.deleted_at,
				self.audit,
			),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePricingPlanRequest {
	#[validate(range(min = 0, message = "price must not be negative"))]
	pub price:          i64,
	#[validate(regex(
		path = *CURRENCY_REGEX,
		message = "currency must be a 3 letter code",
		code = "currency"
	))]
	pub currency:       String,
	pub billing_period: BillingPeriod,
	#[serde(default)]
	pub is_popular:     bool,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:     i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:      bool,
	pub translations:   Translations<PricingPlanFields>,
}

impl CreatePricingPlanRequest {
	pub fn to_insertable(
		self,
		required: Locale,
		created_by: i32,
	) -> Result<NewPricingPlan, Error> {
		FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(NewPricingPlan {
			price: self.price,
			currency: self.currency,
			billing_period: self.billing_period,
			is_popular: self.is_popular,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePricingPlanRequest {
	#[validate(range(min = 0, message = "price must not be negative"))]
	pub price:          Option<i64>,
	#[validate(regex(
		path = *CURRENCY_REGEX,
		message = "currency must be a 3 letter code",
		code = "currency"
	))]
	pub currency:       Option<String>,
	pub billing_period: Option<BillingPeriod>,
	pub is_popular:     Option<bool>,
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:     Option<i32>,
	pub is_active:      Option<bool>,
	#[serde(default)]
	pub translations:   Translations<PricingPlanFields>,
}

impl UpdatePricingPlanRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<PricingPlanUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(PricingPlanUpdate {
			price: self.price,
			currency: self.currency,
			billing_period: self.billing_period,
			is_popular: self.is_popular,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}
