use common::Error;
use db::Locale;
use industry::{Industry, IndustryUpdate, NewIndustry};
use primitives::IndustryFields;
use serde::{Deserialize, Serialize};
use translation::{TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::line_item::{
	CreateLineItemRequest,
	LineItemAdminResponse,
	LineItemResponse,
	check_items,
	insertable_items,
};
use crate::schemas::validation::FieldCheck;
use crate::schemas::{
	AuditResponse,
	BuildResponse,
	MediaRef,
	ResponseContext,
	SLUG_REGEX,
	build_all,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryResponse {
	pub id:         i32,
	pub slug:       String,
	#[serde(flatten)]
	pub fields:     IndustryFields,
	pub image:      Option<MediaRef>,
	pub problems:   Vec<LineItemResponse>,
	pub solutions:  Vec<LineItemResponse>,
	pub sort_order: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryAdminResponse {
	pub id:           i32,
	pub slug:         String,
	pub image:        Option<MediaRef>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: Translations<IndustryFields>,
	pub problems:     Vec<LineItemAdminResponse>,
	pub solutions:    Vec<LineItemAdminResponse>,
	#[serde(flatten)]
	pub audit:        AuditResponse,
}

impl BuildResponse<IndustryResponse> for Industry {
	fn build_response(self, ctx: &ResponseContext) -> IndustryResponse {
		IndustryResponse {
			id:         self.primitive.id,
			slug:       self.primitive.slug,
			fields:     ctx.localize(self.translations),
			image:      self.image.map(|i| i.build_response(ctx)),
			problems:   build_all(self.problems, ctx),
			solutions:  build_all(self.solutions, ctx),
			sort_order: self.primitive.sort_order,
		}
	}
}

impl BuildResponse<IndustryAdminResponse> for Industry {
	fn build_response(self, ctx: &ResponseContext) -> IndustryAdminResponse {
		IndustryAdminResponse {
			id:           self.primitive.id,
			slug:         self.primitive.slug,
			image:        self.image.map(|i| i.build_response(ctx)),
			sort_order:   self.primitive.sort_order,
			is_active:    self.primitive.is_active,
			translations: merge_all_translations(self.translations),
			problems:     build_all(self.problems, ctx),
			solutions:    build_all(self.solutions, ctx),
			audit:        AuditResponse::new(
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
pub struct CreateIndustryRequest {
	#[validate(regex(
		path = *SLUG_REGEX,
		message = "slug may only contain lowercase letters, digits and single dashes",
		code = "slug"
	))]
	#[validate(length(max = 80, message = "slug is too long"))]
	pub slug:         String,
	pub image_id:     Option<i32>,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:    bool,
	pub translations: Translations<IndustryFields>,
	#[serde(default)]
	pub problems:     Vec<CreateLineItemRequest>,
	#[serde(default)]
	pub solutions:    Vec<CreateLineItemRequest>,
}

impl CreateIndustryRequest {
	pub fn to_insertable(
		self,
		required: Locale,
		created_by: i32,
	) -> Result<NewIndustry, Error> {
		let check = FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations);
		let check = check_items(check, "problems", &self.problems, required);
		let check = check_items(check, "solutions", &self.solutions, required);

		check.finish()?;

		Ok(NewIndustry {
			slug: self.slug,
			image_id: self.image_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			problems: insertable_items(self.problems, required)?,
			solutions: insertable_items(self.solutions, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndustryRequest {
	#[validate(regex(
		path = *SLUG_REGEX,
		message = "slug may only contain lowercase letters, digits and single dashes",
		code = "slug"
	))]
	#[validate(length(max = 80, message = "slug is too long"))]
	pub slug:         Option<String>,
	/// `null` removes the image
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub image_id:     Option<Option<i32>>,
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	#[serde(default)]
	pub translations: Translations<IndustryFields>,
}

impl UpdateIndustryRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<IndustryUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(IndustryUpdate {
			slug: self.slug,
			image_id: self.image_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}
