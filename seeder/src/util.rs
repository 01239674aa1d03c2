use std::collections::HashSet;

use common::Error;
use db::Locale;
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use translation::{TranslationSet, Translations};

/// Generate a set of unique slugs using a closure
pub fn generate_unique_slugs<F>(count: usize, mut f: F) -> Vec<String>
where
	F: FnMut() -> String,
{
	let mut set = HashSet::with_capacity(count);
	let mut rng = rng();

	while set.len() < count {
		let mut value: String = f()
			.to_lowercase()
			.split(|c: char| !c.is_ascii_alphanumeric())
			.filter(|part| !part.is_empty())
			.collect::<Vec<_>>()
			.join("-");

		value.push('-');
		value.extend(
			(0..4).map(|_| char::from(rng.sample(Alphanumeric)))
				.map(|c| c.to_ascii_lowercase()),
		);

		set.insert(value);
	}

	set.into_iter().collect()
}

/// Build a translation for every supported locale
pub fn every_locale<F, G>(mut f: G) -> Result<TranslationSet<F>, Error>
where
	G: FnMut(Locale) -> F,
{
	let translations: Translations<F> =
		Locale::ALL.iter().map(|&locale| (locale, f(locale))).collect();

	Ok(TranslationSet::new(translations, Locale::default())?)
}
