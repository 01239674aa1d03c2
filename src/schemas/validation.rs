use common::{Error, FieldErrors, flatten_validation_errors};
use db::Locale;
use translation::{MissingTranslation, Translations};
use validator::Validate;

/// Collects every problem with a request payload before anything is written
///
/// ```rs
/// FieldCheck::new()
///     .validate("", &request)
///     .required("translations", &request.translations, Locale::Id)
///     .translations("translations", &request.translations)
///     .finish()?;
/// ```
#[derive(Debug, Default)]
pub struct FieldCheck {
	errors: FieldErrors,
}

impl FieldCheck {
	#[must_use]
	pub fn new() -> Self { Self::default() }

	/// Run the `validator` rules of `value`, reporting under `prefix`
	#[must_use]
	pub fn validate(mut self, prefix: &str, value: &impl Validate) -> Self {
		if let Err(e) = value.validate() {
			flatten_validation_errors(prefix, &e, &mut self.errors);
		}

		self
	}

	/// Require a translation for `locale` in the translations found at
	/// `prefix`
	#[must_use]
	pub fn required<F>(
		mut self,
		prefix: &str,
		translations: &Translations<F>,
		locale: Locale,
	) -> Self {
		if !translations.contains_key(&locale) {
			self.errors
				.entry(field_path(prefix, locale.as_str()))
				.or_default()
				.push(MissingTranslation(locale).to_string());
		}

		self
	}

	/// Validate the fields of every given translation
	#[must_use]
	pub fn translations<F: Validate>(
		mut self,
		prefix: &str,
		translations: &Translations<F>,
	) -> Self {
		for (locale, fields) in translations {
			self = self.validate(&field_path(prefix, locale.as_str()), fields);
		}

		self
	}

	pub fn finish(self) -> Result<(), Error> {
		if self.errors.is_empty() {
			return Ok(());
		}

		Err(Error::InvalidFields(self.errors))
	}
}

/// Join a field name onto a (possibly empty) path
#[must_use]
pub fn field_path(prefix: &str, field: &str) -> String {
	if prefix.is_empty() {
		field.to_string()
	} else {
		format!("{prefix}.{field}")
	}
}

#[cfg(test)]
mod tests {
	use primitives::FeatureFields;

	use super::*;

	fn fields(title: &str) -> FeatureFields {
		FeatureFields { title: title.to_string(), description: "d".to_string() }
	}

	#[test]
	fn missing_required_locale_is_reported() {
		let translations = Translations::from([(Locale::En, fields("Fast"))]);

		let Err(Error::InvalidFields(errors)) =
			FieldCheck::new().required("translations", &translations, Locale::Id).finish()
		else {
			panic!("expected field errors");
		};

		assert_eq!(
			errors["translations.id"],
			vec!["a translation for locale 'id' is required".to_string()]
		);
	}

	#[test]
	fn translation_errors_are_keyed_by_locale() {
		let translations = Translations::from([
			(Locale::Id, fields("Cepat")),
			(Locale::En, fields("")),
		]);

		let Err(Error::InvalidFields(errors)) = FieldCheck::new()
			.required("translations", &translations, Locale::Id)
			.translations("translations", &translations)
			.finish()
		else {
			panic!("expected field errors");
		};

		assert_eq!(errors.len(), 1);
		assert!(errors.contains_key("translations.en.title"));
	}

	#[test]
	fn nested_paths_are_joined() {
		assert_eq!(field_path("", "translations"), "translations");
		assert_eq!(field_path("problems.0", "translations"), "problems.0.translations");
	}

	#[test]
	fn valid_payload_passes() {
		let translations = Translations::from([(Locale::Id, fields("Cepat"))]);

		assert!(
			FieldCheck::new()
				.required("translations", &translations, Locale::Id)
				.translations("translations", &translations)
				.finish()
				.is_ok()
		);
	}
}
