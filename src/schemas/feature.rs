use common::Error;
use db::Locale;
use feature::{Feature, FeatureUpdate, NewFeature};
use primitives::FeatureFields;
use serde::{Deserialize, Serialize};
use translation::{TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::validation::FieldCheck;
use crate::schemas::{AuditResponse, BuildResponse, MediaRef, ResponseContext};

/// A feature as shown on the public site
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureResponse {
	pub id:         i32,
	#[serde(flatten)]
	pub fields:     FeatureFields,
	pub icon:       Option<MediaRef>,
	pub sort_order: i32,
}

/// A feature with every translation, for editing
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAdminResponse {
	pub id:           i32,
	pub icon:         Option<MediaRef>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: Translations<FeatureFields>,
	#[serde(flatten)]
	pub audit:        AuditResponse,
}

impl BuildResponse<FeatureResponse> for Feature {
	fn build_response(self, ctx: &ResponseContext) -> FeatureResponse {
		FeatureResponse {
			id:         self.primitive.id,
			fields:     ctx.localize(self.translations),
			icon:       self.icon.map(|i| i.build_response(ctx)),
			sort_order: self.primitive.sort_order,
		}
	}
}

impl BuildResponse<FeatureAdminResponse> for Feature {
	fn build_response(self, ctx: &ResponseContext) -> FeatureAdminResponse {
		FeatureAdminResponse {
			id:           self.primitive.id,
			icon:         self.icon.map(|i| i.build_response(ctx)),
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
pub struct CreateFeatureRequest {
	pub icon_id:      Option<i32>,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:    bool,
	pub translations: Translations<FeatureFields>,
}

impl CreateFeatureRequest {
	pub fn to_insertable(
		self,
		required: Locale,
		created_by: i32,
	) -> Result<NewFeature, Error> {
		FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(NewFeature {
			icon_id: self.icon_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeatureRequest {
	/// `null` removes the icon
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub icon_id:      Option<Option<i32>>,
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	#[serde(default)]
	pub translations: Translations<FeatureFields>,
}

impl UpdateFeatureRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<FeatureUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(FeatureUpdate {
			icon_id: self.icon_id,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}
