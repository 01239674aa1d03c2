use std::collections::BTreeMap;

use proptest::prelude::*;
use translation::{
	Locale,
	TranslationRow,
	extract_translation,
	merge_all_translations,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Blurb {
	title: String,
	note:  Option<String>,
}

fn locale() -> impl Strategy<Value = Locale> {
	prop_oneof![Just(Locale::Id), Just(Locale::En)]
}

fn blurb() -> impl Strategy<Value = Blurb> {
	(".{0,24}", proptest::option::of(".{0,12}"))
		.prop_map(|(title, note)| Blurb { title, note })
}

fn rows() -> impl Strategy<Value = Vec<TranslationRow<Blurb>>> {
	proptest::collection::vec(
		(locale(), blurb()).prop_map(|(l, c)| TranslationRow::new(l, c)),
		0..6,
	)
}

proptest! {
	#[test]
	fn requested_locale_always_wins(
		id_copy in blurb(),
		en_copy in blurb(),
		en_first in any::<bool>(),
	) {
		let mut rows = vec![
			TranslationRow::new(Locale::Id, id_copy.clone()),
			TranslationRow::new(Locale::En, en_copy.clone()),
		];

		if en_first {
			rows.reverse();
		}

		prop_assert_eq!(
			extract_translation(rows.clone(), Locale::En, Locale::Id),
			Some(en_copy)
		);
		prop_assert_eq!(
			extract_translation(rows, Locale::Id, Locale::En),
			Some(id_copy)
		);
	}

	#[test]
	fn absent_locale_falls_back_to_default(default_copy in blurb()) {
		let rows = vec![TranslationRow::new(Locale::Id, default_copy.clone())];

		prop_assert_eq!(
			extract_translation(rows, Locale::En, Locale::Id),
			Some(default_copy)
		);
	}

	#[test]
	fn projection_is_one_of_the_inputs(rows in rows(), requested in locale()) {
		let extracted = extract_translation(rows.clone(), requested, Locale::Id);

		match extracted {
			None => prop_assert!(rows.is_empty()),
			Some(fields) => {
				prop_assert!(rows.iter().any(|row| row.fields == fields));

				if let Some(row) = rows.iter().find(|r| r.locale == requested) {
					prop_assert_eq!(&fields, &row.fields);
				}
			},
		}
	}

	#[test]
	fn merge_keys_match_input_locales(rows in rows()) {
		let merged = merge_all_translations(rows.clone());

		let mut expected = BTreeMap::new();
		for row in rows {
			expected.insert(row.locale, row.fields);
		}

		prop_assert_eq!(merged, expected);
	}
}
