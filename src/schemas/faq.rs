use common::Error;
use db::Locale;
use faq::{
	Faq,
	FaqCategory,
	FaqCategoryUpdate,
	FaqFilter,
	FaqUpdate,
	NewFaq,
	NewFaqCategory,
};
use primitives::{FaqCategoryFields, FaqFields};
use serde::{Deserialize, Serialize};
use translation::{TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::validation::FieldCheck;
use crate::schemas::{AuditResponse, BuildResponse, ResponseContext, SLUG_REGEX};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqCategoryResponse {
	pub id:         i32,
	pub slug:       String,
	#[serde(flatten)]
	pub fields:     FaqCategoryFields,
	pub sort_order: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqCategoryAdminResponse {
	pub id:           i32,
	pub slug:         String,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: Translations<FaqCategoryFields>,
	#[serde(flatten)]
	pub audit:        AuditResponse,
}

/// The category an FAQ entry is filed under, as embedded in the entry
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqCategoryRef {
	pub id:     i32,
	pub slug:   String,
	#[serde(flatten)]
	pub fields: FaqCategoryFields,
}

impl BuildResponse<FaqCategoryResponse> for FaqCategory {
	fn build_response(self, ctx: &ResponseContext) -> FaqCategoryResponse {
		FaqCategoryResponse {
			id:         self.primitive.id,
			slug:       self.primitive.slug,
			fields:     ctx.localize(self.translations),
			sort_order: self.primitive.sort_order,
		}
	}
}

impl BuildResponse<FaqCategoryAdminResponse> for FaqCategory {
	fn build_response(self, _ctx: &ResponseContext) -> FaqCategoryAdminResponse {
		FaqCategoryAdminResponse {
			id:           self.primitive.id,
			slug:         self.primitive.slug,
			sort_order:   self.primitive.sort_order,
			is_active:    self.primitive.is_active,
			translations: merge_all_translations(self.translations),
			audit:        AuditResponse::new(
				self.primitive.created_at,
				self.primitive.updated_at,
				self.primitive.deleted_at,
				self.audit,
			),
		}
	}
}

impl BuildResponse<FaqCategoryRef> for FaqCategory {
	fn build_response(self, ctx: &ResponseContext) -> FaqCategoryRef {
		FaqCategoryRef {
			id:     self.primitive.id,
			slug:   self.primitive.slug,
			fields: ctx.localize(self.translations),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqResponse {
	pub id:         i32,
	pub category:   Option<FaqCategoryRef>,
	#[serde(flatten)]
	pub fields:     FaqFields,
	pub sort_order: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqAdminResponse {
	pub id:           i32,
	/// Named in the default locale
	pub category:     Option<FaqCategoryRef>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: Translations<FaqFields>,
	#[serde(flatten)]
	pub audit:        AuditResponse,
}

impl BuildResponse<FaqResponse> for Faq {
	fn build_response(self, ctx: &ResponseContext) -> FaqResponse {
		FaqResponse {
			id:         self.primitive.id,
			category:   self.category.map(|c| c.build_response(ctx)),
			fields:     ctx.localize(self.translations),
			sort_order: self.primitive.sort_order,
		}
	}
}

impl BuildResponse<FaqAdminResponse> for Faq {
	fn build_response(self, ctx: &ResponseContext) -> FaqAdminResponse {
		FaqAdminResponse {
			id:           self.primitive.id,
			category:     self.category.map(|c| c.build_response(ctx)),
			sort_order:   self.primitive.sort_order,
			is_active:    self.primitive.is_active,
			translations: merge_all_translations(self.translations),
			audit:        AuditResponse::new(
				self.primitive.created_at,
				self.primitive.updated_at,
				self.primitive.deleted_at,
				self.audit,
			),
		}
	}
}

/// Narrow the public FAQ list down to a single category
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FaqQuery {
	/// Category slug
	pub category: Option<String>,
}

impl From<FaqQuery> for FaqFilter {
	fn from(value: FaqQuery) -> Self { Self { category: value.category } }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqCategoryRequest {
	#[validate(regex(
		path = *SLUG_REGEX,
		message = "slug may only contain lowercase letters, digits and single dashes",
		code = "slug"
	))]
	#[validate(length(max = 80, message = "slug is too long"))]
	pub slug:         String,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:    bool,
	pub translations: Translations<FaqCategoryFields>,
}

impl CreateFaqCategoryRequest {
	pub fn to_insertable(
		self,
		required: Locale,
		created_by: i32,
	) -> Result<NewFaqCategory, Error> {
		FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(NewFaqCategory {
			slug: self.slug,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFaqCategoryRequest {
	#[validate(regex(
		path = *SLUG_REGEX,
		message = "slug may only contain lowercase letters, digits and single dashes",
		code = "slug"
	))]
	#[validate(length(max = 80, message = "slug is too long"))]
	pub slug:         Option<String>,
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	#[serde(default)]
	pub translations: Translations<FaqCategoryFields>,
}

impl UpdateFaqCategoryRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<FaqCategoryUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(FaqCategoryUpdate {
			slug: self.slug,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqRequest {
	pub category_id:  Option<i32>,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:    bool,
	pub translations: Translations<FaqFields>,
}

impl CreateFaqRequest {
	pub fn to_insertable(self, required: Locale, created_by: i32) -> Result<NewFaq, Error> {
		FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(NewFaq {
			category_id: self.category_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFaqRequest {
	/// `null` moves the entry out of its category
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub category_id:  Option<Option<i32>>,
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	#[serde(default)]
	pub translations: Translations<FaqFields>,
}

impl UpdateFaqRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<FaqUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(FaqUpdate {
			category_id: self.category_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn category(slug: &str) -> CreateFaqCategoryRequest {
		CreateFaqCategoryRequest {
			slug:         slug.to_string(),
			sort_order:   0,
			is_active:    true,
			translations: Translations::from([(
				Locale::Id,
				FaqCategoryFields { name: "Umum".to_string() },
			)]),
		}
	}

	#[test]
	fn slugs_must_be_kebab_case() {
		assert!(category("billing-and-plans").to_insertable(Locale::Id, 1).is_ok());

		for slug in ["Billing", "billing--plans", "-billing", "billing plans", ""] {
			let Err(Error::InvalidFields(errors)) =
				category(slug).to_insertable(Locale::Id, 1)
			else {
				panic!("expected {slug:?} to be rejected");
			};

			assert!(errors.contains_key("slug"), "{slug:?}: {errors:?}");
		}
	}

	#[test]
	fn clearing_a_category_is_distinct_from_leaving_it() {
		let keep: UpdateFaqRequest = serde_json::from_str("{}").unwrap();
		let clear: UpdateFaqRequest =
			serde_json::from_str(r#"{"categoryId": null}"#).unwrap();

		assert_eq!(keep.category_id, None);
		assert_eq!(clear.category_id, Some(None));
	}
}
