use common::Error;
use db::{LineItemKind, Locale};
use line_item::{LineItem, LineItemUpdate, NewLineItem};
use primitives::LineItemFields;
use serde::{Deserialize, Serialize};
use translation::{MissingTranslation, TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::validation::{FieldCheck, field_path};
use crate::schemas::{BuildResponse, ResponseContext};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
	pub id:         i32,
	#[serde(flatten)]
	pub fields:     LineItemFields,
	pub sort_order: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemAdminResponse {
	pub id:           i32,
	pub sort_order:   i32,
	pub translations: Translations<LineItemFields>,
}

impl BuildResponse<LineItemResponse> for LineItem {
	fn build_response(self, ctx: &ResponseContext) -> LineItemResponse {
		LineItemResponse {
			id:         self.primitive.id,
			fields:     ctx.localize(self.translations),
			sort_order: self.primitive.sort_order,
		}
	}
}

impl BuildResponse<LineItemAdminResponse> for LineItem {
	fn build_response(self, _ctx: &ResponseContext) -> LineItemAdminResponse {
		LineItemAdminResponse {
			id:           self.primitive.id,
			sort_order:   self.primitive.sort_order,
			translations: merge_all_translations(self.translations),
		}
	}
}

/// The lists of line items an industry owns
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndustryList {
	Problems,
	Solutions,
}

impl From<IndustryList> for LineItemKind {
	fn from(value: IndustryList) -> Self {
		match value {
			IndustryList::Problems => Self::IndustryProblem,
			IndustryList::Solutions => Self::IndustrySolution,
		}
	}
}

/// The lists of line items a job posting owns
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPostingList {
	Requirements,
	Responsibilities,
}

impl From<JobPostingList> for LineItemKind {
	fn from(value: JobPostingList) -> Self {
		match value {
			JobPostingList::Requirements => Self::JobRequirement,
			JobPostingList::Responsibilities => Self::JobResponsibility,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineItemRequest {
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   i32,
	pub translations: Translations<LineItemFields>,
}

impl CreateLineItemRequest {
	/// Record every problem with this item under `prefix`
	#[must_use]
	pub fn check(&self, check: FieldCheck, prefix: &str, required: Locale) -> FieldCheck {
		let translations = field_path(prefix, "translations");

		check
			.validate(prefix, self)
			.required(&translations, &self.translations, required)
			.translations(&translations, &self.translations)
	}

	/// Convert an already checked item
	pub fn into_new(self, required: Locale) -> Result<NewLineItem, MissingTranslation> {
		Ok(NewLineItem {
			sort_order:   self.sort_order,
			translations: TranslationSet::new(self.translations, required)?,
		})
	}

	pub fn to_insertable(self, required: Locale) -> Result<NewLineItem, Error> {
		self.check(FieldCheck::new(), "", required).finish()?;

		Ok(self.into_new(required)?)
	}
}

/// Check and convert a list of items embedded in a parent payload
pub fn insertable_items(
	items: Vec<CreateLineItemRequest>,
	required: Locale,
) -> Result<Vec<NewLineItem>, MissingTranslation> {
	items.into_iter().map(|item| item.into_new(required)).collect()
}

/// Add the problems of every item in `items` to `check`, reported under
/// `list.<index>`
#[must_use]
pub fn check_items(
	mut check: FieldCheck,
	list: &str,
	items: &[CreateLineItemRequest],
	required: Locale,
) -> FieldCheck {
	for (idx, item) in items.iter().enumerate() {
		check = item.check(check, &format!("{list}.{idx}"), required);
	}

	check
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineItemRequest {
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:   Option<i32>,
	#[serde(default)]
	pub translations: Translations<LineItemFields>,
}

impl UpdateLineItemRequest {
	pub fn to_insertable(self) -> Result<LineItemUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(LineItemUpdate {
			sort_order:   self.sort_order,
			translations: self.translations,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(translations: &[(Locale, &str)]) -> CreateLineItemRequest {
		CreateLineItemRequest {
			sort_order:   0,
			translations: translations
				.iter()
				.map(|(l, c)| (*l, LineItemFields { content: (*c).to_string() }))
				.collect(),
		}
	}

	#[test]
	fn nested_item_errors_carry_their_index() {
		let items = vec![item(&[(Locale::Id, "Cepat")]), item(&[(Locale::En, "Fast")])];

		let Err(Error::InvalidFields(errors)) =
			check_items(FieldCheck::new(), "problems", &items, Locale::Id).finish()
		else {
			panic!("expected field errors");
		};

		assert_eq!(errors.len(), 1);
		assert!(errors.contains_key("problems.1.translations.id"));
	}

	#[test]
	fn list_names_map_onto_kinds() {
		let list: IndustryList = serde_json::from_str("\"solutions\"").unwrap();
		assert_eq!(LineItemKind::from(list), LineItemKind::IndustrySolution);

		let list: JobPostingList = serde_json::from_str("\"requirements\"").unwrap();
		assert_eq!(LineItemKind::from(list), LineItemKind::JobRequirement);

		assert!(serde_json::from_str::<JobPostingList>("\"problems\"").is_err());
	}
}
