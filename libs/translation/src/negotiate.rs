use db::Locale;

/// Pick the supported [`Locale`] with the highest quality from an
/// `Accept-Language` header value
///
/// Entries with `q=0`, a malformed quality or a wildcard tag are skipped.
/// When several supported entries share the highest quality the first one
/// in the header wins.
#[must_use]
pub fn negotiate(header: &str) -> Option<Locale> {
	let mut best: Option<(Locale, f32)> = None;

	for entry in header.split(',') {
		let mut parts = entry.split(';');

		let Some(tag) = parts.next().map(str::trim) else {
			continue;
		};

		if tag.is_empty() || tag == "*" {
			continue;
		}

		let quality = match parts.find_map(|p| p.trim().strip_prefix("q=")) {
			Some(q) => q.trim().parse::<f32>().ok(),
			None => Some(1.0),
		};

		let Some(quality) = quality else {
			continue;
		};

		if !(quality > 0.0 && quality <= 1.0) {
			continue;
		}

		let Some(locale) = Locale::from_tag(tag) else {
			continue;
		};

		if best.is_none_or(|(_, q)| quality > q) {
			best = Some((locale, quality));
		}
	}

	best.map(|(locale, _)| locale)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn picks_highest_quality() {
		assert_eq!(negotiate("id;q=0.4, en-US;q=0.9"), Some(Locale::En));
		assert_eq!(negotiate("en;q=0.5, id"), Some(Locale::Id));
	}

	#[test]
	fn ties_keep_header_order() {
		assert_eq!(negotiate("en, id"), Some(Locale::En));
		assert_eq!(negotiate("id-ID, en"), Some(Locale::Id));
	}

	#[test]
	fn skips_unsupported_and_wildcards() {
		assert_eq!(negotiate("fr-FR, de;q=0.9, *;q=0.8, en;q=0.1"), Some(Locale::En));
		assert_eq!(negotiate("fr, *"), None);
	}

	#[test]
	fn zero_quality_is_excluded() {
		assert_eq!(negotiate("en;q=0, id;q=0.2"), Some(Locale::Id));
		assert_eq!(negotiate("en;q=0"), None);
	}

	#[test]
	fn malformed_input_yields_nothing() {
		assert_eq!(negotiate(""), None);
		assert_eq!(negotiate(" , ;"), None);
		assert_eq!(negotiate("en;q=abc"), None);
	}
}
