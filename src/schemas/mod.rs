use std::sync::LazyLock;

use chrono::NaiveDateTime;
use db::Locale;
use models_common::Audit;
use primitives::{PrimitiveMedia, UserSummary};
use regex::Regex;
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use translation::{Localized, extract_or_default};

use crate::Config;

pub mod about_card;
pub mod analytics;
pub mod auth;
pub mod envelope;
pub mod extract;
pub mod faq;
pub mod feature;
pub mod industry;
pub mod job_posting;
pub mod line_item;
pub mod media;
pub mod pagination;
pub mod pricing_plan;
pub mod testimonial;
pub mod user;
pub mod validation;

/// Lowercase words separated by single dashes
pub(crate) static SLUG_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

pub trait BuildResponse<R> {
	fn build_response(self, ctx: &ResponseContext) -> R;
}

/// Build a response for every item of a list
pub fn build_all<T, R>(items: Vec<T>, ctx: &ResponseContext) -> Vec<R>
where
	T: BuildResponse<R>,
{
	items.into_iter().map(|item| item.build_response(ctx)).collect()
}

/// Everything a response builder needs to know besides the entity itself
#[derive(Clone, Copy, Debug)]
pub struct ResponseContext<'a> {
	pub config: &'a Config,
	/// The locale public reads are projected onto
	pub locale: Locale,
}

impl<'a> ResponseContext<'a> {
	#[must_use]
	pub fn new(config: &'a Config, locale: Locale) -> Self { Self { config, locale } }

	/// Context for admin responses, which never project translations
	#[must_use]
	pub fn admin(config: &'a Config) -> Self {
		Self { config, locale: config.default_locale }
	}

	/// Collapse translation rows onto the request locale, falling back to the
	/// default locale and then to empty fields
	pub fn localize<T, I>(&self, rows: I) -> T::Fields
	where
		T: Localized,
		T::Fields: Default,
		I: IntoIterator<Item = T>,
	{
		extract_or_default(rows, self.locale, self.config.default_locale)
	}
}

/// The only part of a media item embedded in content responses
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
	pub id:       i32,
	pub url:      String,
	pub alt_text: Option<String>,
}

impl BuildResponse<MediaRef> for PrimitiveMedia {
	fn build_response(self, ctx: &ResponseContext) -> MediaRef {
		MediaRef {
			id:       self.id,
			url:      ctx.config.media_url(&self.file_path),
			alt_text: self.alt_text,
		}
	}
}

/// Bookkeeping fields shown on every admin response
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
	pub created_at: NaiveDateTime,
	pub created_by: Option<UserSummary>,
	pub updated_at: NaiveDateTime,
	pub updated_by: Option<UserSummary>,
	pub deleted_at: Option<NaiveDateTime>,
}

impl AuditResponse {
	#[must_use]
	pub fn new(
		created_at: NaiveDateTime,
		updated_at: NaiveDateTime,
		deleted_at: Option<NaiveDateTime>,
		audit: Audit,
	) -> Self {
		Self {
			created_at,
			created_by: audit.created_by,
			updated_at,
			updated_by: audit.updated_by,
			deleted_at,
		}
	}
}

/// Whether an admin read looks at the trash
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct TrashFilter {
	#[serde(default)]
	pub trashed: bool,
}

const fn active_default() -> bool { true }

/// A visitor for bounded u32 values.
struct BoundedU32Visitor {
	start: u32,
	end:   u32,
}

impl Visitor<'_> for BoundedU32Visitor {
	type Value = u32;

	/// The expected format for the value.
	fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "a number between {} and {}", self.start, self.end)
	}

	/// Check if the value is within the specified bounds.
	fn visit_u32<E>(self, v: u32) -> Result<Self::Value, E>
	where
		E: serde::de::Error,
	{
		if (self.start..=self.end).contains(&v) {
			Ok(v)
		} else {
			Err(E::custom(format_args!(
				"invalid value: {v}, expected a number between {} and {}",
				self.start, self.end,
			)))
		}
	}

	fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
	where
		E: serde::de::Error,
	{
		let v = u32::try_from(v).map_err(|_| {
			E::custom(format_args!(
				"invalid value: {v}, expected a number between {} and {}",
				self.start, self.end,
			))
		})?;

		self.visit_u32(v)
	}
}
