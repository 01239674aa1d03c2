//! Locale detection for public reads

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use db::Locale;
use serde::Deserialize;
use translation::negotiate;

use crate::Config;

/// The locale a request wants its content in
///
/// Taken from the `locale` query parameter, then the `Accept-Language`
/// header, then the configured default locale. Unsupported values are
/// skipped rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

#[derive(Deserialize)]
struct LocaleQuery {
	locale: Option<String>,
}

impl RequestLocale {
	/// Detect the locale of a request given its parts
	#[must_use]
	pub fn detect(parts: &Parts, default: Locale) -> Self {
		let from_query = Query::<LocaleQuery>::try_from_uri(&parts.uri)
			.ok()
			.and_then(|Query(q)| q.locale)
			.and_then(|tag| Locale::from_tag(&tag));

		let from_header = || {
			parts
				.headers
				.get(ACCEPT_LANGUAGE)
				.and_then(|value| value.to_str().ok())
				.and_then(negotiate)
		};

		Self(from_query.or_else(from_header).unwrap_or(default))
	}
}

impl<S> FromRequestParts<S> for RequestLocale
where
	Config: FromRef<S>,
	S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let config = Config::from_ref(state);

		Ok(Self::detect(parts, config.default_locale))
	}
}

#[cfg(test)]
mod tests {
	use axum::http::Request;

	use super::*;

	fn detect(uri: &str, accept_language: Option<&str>) -> Locale {
		let mut request = Request::builder().uri(uri);

		if let Some(value) = accept_language {
			request = request.header(ACCEPT_LANGUAGE, value);
		}

		let (parts, ()) = request.body(()).unwrap().into_parts();

		RequestLocale::detect(&parts, Locale::Id).0
	}

	#[test]
	fn query_parameter_wins() {
		assert_eq!(detect("/features?locale=en", Some("id")), Locale::En);
	}

	#[test]
	fn header_is_used_without_query() {
		assert_eq!(detect("/features", Some("fr;q=0.9, en-GB;q=0.8")), Locale::En);
	}

	#[test]
	fn unsupported_query_falls_through() {
		assert_eq!(detect("/features?locale=fr", Some("en")), Locale::En);
		assert_eq!(detect("/features?locale=fr", None), Locale::Id);
	}

	#[test]
	fn default_without_any_hint() {
		assert_eq!(detect("/features?page=2", None), Locale::Id);
	}
}
