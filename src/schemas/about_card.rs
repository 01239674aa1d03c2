use about_card::{AboutCard, AboutCardUpdate, NewAboutCard};
use common::Error;
use db::Locale;
use primitives::AboutCardFields;
use serde::{Deserialize, Serialize};
use translation::{TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::validation::FieldCheck;
use crate::schemas::{AuditResponse, BuildResponse, MediaRef, ResponseContext};

/// An about card as shown on the public site
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutCardResponse {
	pub id:         i32,
	#[serde(flatten)]
	pub fields:     AboutCardFields,
	pub image:      Option<MediaRef>,
	pub sort_order: i32,
}

/// An about card with every translation, for editing
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutCardAdminResponse {
	pub id:           i32,
	pub image:        Option<MediaRef>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: Translations<AboutCardFields>,
	#[serde(flatten)]
	pub audit:        AuditResponse,
}

impl BuildResponse<AboutCardResponse> for AboutCard {
	fn build_response(self, ctx: &ResponseContext) -> AboutCardResponse {
		AboutCardResponse {
			id:         self.primitive.id,
			fields:     ctx.localize(self.translations),
			image:      self.image.map(|i| i.build_response(ctx)),
			sort_order: self.primitive.sort_order,
		}
	}
}

impl BuildResponse<AboutCardAdminResponse> for AboutCard {
	fn build_response(self, ctx: &ResponseContext) -> AboutCardAdminResponse {
		AboutCardAdminResponse {
			id:           self.primitive.id,
			image:        self.image.map(|i| i.build_response(ctx)),
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
pub struct CreateAboutCardRequest {
	pub image_id:     Option<i32>,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:    bool,
	pub translations: Translations<AboutCardFields>,
}

impl CreateAboutCardRequest {
	pub fn to_insertable(
		self,
		required: Locale,
		created_by: i32,
	) -> Result<NewAboutCard, Error> {
		FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(NewAboutCard {
			image_id: self.image_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAboutCardRequest {
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
	pub translations: Translations<AboutCardFields>,
}

impl UpdateAboutCardRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<AboutCardUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(AboutCardUpdate {
			image_id: self.image_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}
