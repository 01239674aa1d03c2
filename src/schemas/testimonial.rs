use common::Error;
use db::Locale;
use primitives::TestimonialFields;
use serde::{Deserialize, Serialize};
use testimonial::{NewTestimonial, Testimonial, TestimonialUpdate};
use translation::{TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::validation::FieldCheck;
use crate::schemas::{AuditResponse, BuildResponse, MediaRef, ResponseContext};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialResponse {
	pub id:          i32,
	pub author_name: String,
	pub author_role: Option<String>,
	pub company:     Option<String>,
	pub rating:      i32,
	pub avatar:      Option<MediaRef>,
	#[serde(flatten)]
	pub fields:      TestimonialFields,
	pub sort_order:  i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialAdminResponse {
	pub id:           i32,
	pub author_name:  String,
	pub author_role:  Option<String>,
	pub company:      Option<String>,
	pub rating:       i32,
	pub avatar:       Option<MediaRef>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: Translations<TestimonialFields>,
	#[serde(flatten)]
	pub audit:        AuditResponse,
}

impl BuildResponse<TestimonialResponse> for Testimonial {
	fn build_response(self, ctx: &ResponseContext) -> TestimonialResponse {
		TestimonialResponse {
			id:          self.primitive.id,
			author_name: self.primitive.author_name,
			author_role: self.primitive.author_role,
			company:     self.primitive.company,
			rating:      self.primitive.rating,
			avatar:      self.avatar.map(|a| a.build_response(ctx)),
			fields:      ctx.localize(self.translations),
			sort_order:  self.primitive.sort_order,
		}
	}
}

impl BuildResponse<TestimonialAdminResponse> for Testimonial {
	fn build_response(self, ctx: &ResponseContext) -> TestimonialAdminResponse {
		TestimonialAdminResponse {
			id:           self.primitive.id,
			author_name:  self.primitive.author_name,
			author_role:  self.primitive.author_role,
			company:      self.primitive.company,
			rating:       self.primitive.rating,
			avatar:       self.avatar.map(|a| a.build_response(ctx)),
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

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
	#[validate(length(
		min = 1,
		max = 120,
		message = "author name must be between 1 and 120 characters long"
	))]
	pub author_name:  String,
	#[validate(length(max = 120, message = "author role is too long"))]
	pub author_role:  Option<String>,
	#[validate(length(max = 120, message = "company is too long"))]
	pub company:      Option<String>,
	#[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
	pub rating:       i32,
	pub avatar_id:    Option<i32>,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:    bool,
	pub translations: Translations<TestimonialFields>,
}

impl CreateTestimonialRequest {
	pub fn to_insertable(
		self,
		required: Locale,
		created_by: i32,
	) -> Result<NewTestimonial, Error> {
		FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(NewTestimonial {
			author_name: self.author_name,
			author_role: self.author_role,
			company: self.company,
			rating: self.rating,
			avatar_id: self.avatar_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonialRequest {
	#[validate(length(
		min = 1,
		max = 120,
		message = "author name must be between 1 and 120 characters long"
	))]
	pub author_name:  Option<String>,
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub author_role:  Option<Option<String>>,
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub company:      Option<Option<String>>,
	#[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
	pub rating:       Option<i32>,
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub avatar_id:    Option<Option<i32>>,
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	#[serde(default)]
	pub translations: Translations<TestimonialFields>,
}

impl UpdateTestimonialRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<TestimonialUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(TestimonialUpdate {
			author_name: self.author_name,
			author_role: self.author_role,
			company: self.company,
			rating: self.rating,
			avatar_id: self.avatar_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}
