//! Projection of per-locale translation rows
//!
//! Every translatable entity stores one row per `(entity, locale)`. Public
//! endpoints collapse those rows into a single localized view with
//! [`extract_translation`], admin endpoints expose every locale at once with
//! [`merge_all_translations`]. Neither function performs I/O or fails; a
//! missing translation simply yields no projection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod negotiate;

pub use db::Locale;
pub use negotiate::negotiate;

/// Every translation of a single entity keyed by locale
pub type Translations<F> = BTreeMap<Locale, F>;

/// A translation row: some set of text fields tagged with the locale they
/// are written in
pub trait Localized {
	/// The entity specific text fields, without the locale
	type Fields;

	fn locale(&self) -> Locale;

	fn into_fields(self) -> Self::Fields;
}

/// A translation row for an arbitrary set of fields
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct TranslationRow<F> {
	pub locale: Locale,
	#[serde(flatten)]
	pub fields: F,
}

impl<F> TranslationRow<F> {
	#[must_use]
	pub const fn new(locale: Locale, fields: F) -> Self { Self { locale, fields } }
}

impl<F> Localized for TranslationRow<F> {
	type Fields = F;

	fn locale(&self) -> Locale { self.locale }

	fn into_fields(self) -> F { self.fields }
}

/// Select the single best translation for `requested`
///
/// The first row in `requested` wins, otherwise the first row in `fallback`,
/// otherwise the first row overall. Rows of different locales are never
/// mixed. Returns [`None`] for an empty collection.
pub fn extract_translation<T, I>(
	rows: I,
	requested: Locale,
	fallback: Locale,
) -> Option<T::Fields>
where
	T: Localized,
	I: IntoIterator<Item = T>,
{
	let mut fallback_row = None;
	let mut first_row = None;

	for row in rows {
		let locale = row.locale();

		if locale == requested {
			return Some(row.into_fields());
		}

		if locale == fallback {
			if fallback_row.is_none() {
				fallback_row = Some(row);
			}
		} else if first_row.is_none() {
			first_row = Some(row);
		}
	}

	fallback_row.or(first_row).map(Localized::into_fields)
}

/// Like [`extract_translation`] but yields empty fields when there is no
/// translation at all
pub fn extract_or_default<T, I>(
	rows: I,
	requested: Locale,
	fallback: Locale,
) -> T::Fields
where
	T: Localized,
	T::Fields: Default,
	I: IntoIterator<Item = T>,
{
	extract_translation(rows, requested, fallback).unwrap_or_default()
}

/// Key every row by its locale
///
/// Locales without a row are absent from the result. Should a locale appear
/// more than once the last row wins.
pub fn merge_all_translations<T, I>(rows: I) -> Translations<T::Fields>
where
	T: Localized,
	I: IntoIterator<Item = T>,
{
	rows.into_iter().map(|row| (row.locale(), row.into_fields())).collect()
}

/// A required translation was not supplied
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("a translation for locale '{0}' is required")]
pub struct MissingTranslation(pub Locale);

/// A set of translations that is known to contain a required locale
///
/// Creation payloads are turned into a [`TranslationSet`] before anything is
/// written, so a stored entity can never lack its required locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationSet<F> {
	translations: Translations<F>,
}

impl<F> TranslationSet<F> {
	/// Wrap `translations`, failing if `required` is missing
	pub fn new(
		translations: Translations<F>,
		required: Locale,
	) -> Result<Self, MissingTranslation> {
		if !translations.contains_key(&required) {
			return Err(MissingTranslation(required));
		}

		Ok(Self { translations })
	}

	#[must_use]
	pub fn get(&self, locale: Locale) -> Option<&F> { self.translations.get(&locale) }

	pub fn iter(&self) -> impl Iterator<Item = (Locale, &F)> {
		self.translations.iter().map(|(locale, fields)| (*locale, fields))
	}

	#[must_use]
	pub fn len(&self) -> usize { self.translations.len() }

	/// Always `false`, a set holds at least its required locale
	#[must_use]
	pub fn is_empty(&self) -> bool { self.translations.is_empty() }

	#[must_use]
	pub fn into_inner(self) -> Translations<F> { self.translations }
}

impl<F> IntoIterator for TranslationSet<F> {
	type IntoIter = std::collections::btree_map::IntoIter<Locale, F>;
	type Item = (Locale, F);

	fn into_iter(self) -> Self::IntoIter { self.translations.into_iter() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone, Debug, Default, PartialEq, Eq)]
	struct Quote {
		quote: String,
		cite:  Option<String>,
	}

	fn quote(locale: Locale, text: &str) -> TranslationRow<Quote> {
		TranslationRow::new(locale, Quote { quote: text.to_string(), cite: None })
	}

	#[test]
	fn requested_locale_beats_default() {
		let rows = vec![quote(Locale::Id, "Bagus"), quote(Locale::En, "Great")];

		let extracted = extract_translation(rows, Locale::En, Locale::Id);

		assert_eq!(extracted.map(|q| q.quote), Some("Great".to_string()));
	}

	#[test]
	fn falls_back_to_default_locale() {
		let rows = vec![quote(Locale::Id, "Bagus")];

		let extracted = extract_translation(rows, Locale::En, Locale::Id);

		assert_eq!(extracted.map(|q| q.quote), Some("Bagus".to_string()));
	}

	#[test]
	fn falls_back_to_first_row_without_default() {
		let rows = vec![quote(Locale::En, "Great")];

		let extracted = extract_translation(rows, Locale::Id, Locale::Id);

		assert_eq!(extracted.map(|q| q.quote), Some("Great".to_string()));
	}

	#[test]
	fn nulls_pass_through_unchanged() {
		let rows = vec![TranslationRow::new(
			Locale::En,
			Quote { quote: "Great".to_string(), cite: None },
		)];

		let extracted = extract_translation(rows, Locale::En, Locale::Id);

		assert_eq!(
			extracted,
			Some(Quote { quote: "Great".to_string(), cite: None })
		);
	}

	#[test]
	fn empty_input_has_no_projection() {
		let rows: Vec<TranslationRow<Quote>> = vec![];

		assert_eq!(extract_translation(rows.clone(), Locale::En, Locale::Id), None);
		assert_eq!(extract_or_default(rows.clone(), Locale::En, Locale::Id), Quote::default());
		assert!(merge_all_translations(rows).is_empty());
	}

	#[test]
	fn merge_keys_only_present_locales() {
		let rows = vec![quote(Locale::Id, "Bagus")];

		let merged = merge_all_translations(rows);

		assert_eq!(merged.len(), 1);
		assert_eq!(merged[&Locale::Id].quote, "Bagus");
		assert!(!merged.contains_key(&Locale::En));
	}

	#[test]
	fn merge_duplicate_locale_last_write_wins() {
		let rows = vec![quote(Locale::En, "first"), quote(Locale::En, "second")];

		let merged = merge_all_translations(rows);

		assert_eq!(merged[&Locale::En].quote, "second");
	}

	#[test]
	fn translation_set_requires_locale() {
		let mut translations = Translations::new();
		translations.insert(Locale::En, "Great".to_string());

		let err = TranslationSet::new(translations.clone(), Locale::Id).unwrap_err();
		assert_eq!(err, MissingTranslation(Locale::Id));
		assert_eq!(err.to_string(), "a translation for locale 'id' is required");

		translations.insert(Locale::Id, "Bagus".to_string());
		let set = TranslationSet::new(translations, Locale::Id).unwrap();
		assert_eq!(set.len(), 2);
		assert_eq!(set.get(Locale::Id).map(String::as_str), Some("Bagus"));
	}

	#[test]
	fn translation_row_serializes_flat() {
		#[derive(Serialize)]
		struct Title {
			title: String,
		}

		let row = TranslationRow::new(Locale::En, Title { title: "Hi".to_string() });
		let json = serde_json::to_value(&row).unwrap();

		assert_eq!(json, serde_json::json!({ "locale": "en", "title": "Hi" }));
	}
}
