use analytics::{DateRange, MAX_DURATION_SECONDS, NewPageView};
use chrono::NaiveDate;
use common::Error;
use db::Locale;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::validation::FieldCheck;

/// Reports cover this many days unless told otherwise
const DEFAULT_REPORT_DAYS: u64 = 30;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
	/// Opaque identifier the site keeps for a browser
	#[validate(length(
		min = 1,
		max = 64,
		message = "visitor key must be between 1 and 64 characters long"
	))]
	pub visitor_key: String,
	#[validate(length(
		min = 1,
		max = 500,
		message = "path must be between 1 and 500 characters long"
	))]
	pub path:        String,
	#[validate(length(max = 500, message = "referrer is too long"))]
	pub referrer:    Option<String>,
}

impl TrackRequest {
	pub fn to_insertable(
		self,
		locale: Locale,
		user_agent: Option<String>,
	) -> Result<NewPageView, Error> {
		FieldCheck::new().validate("", &self).finish()?;

		Ok(NewPageView {
			visitor_key: self.visitor_key,
			user_agent,
			path: self.path,
			locale,
			// an empty referrer is a direct visit
			referrer: self.referrer.filter(|r| !r.trim().is_empty()),
		})
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DurationRequest {
	#[validate(range(
		min = 0,
		max = MAX_DURATION_SECONDS,
		message = "duration must be between 0 and 86400 seconds"
	))]
	pub duration_seconds: i32,
}

impl DurationRequest {
	pub fn checked(self) -> Result<i32, Error> {
		FieldCheck::new().validate("", &self).finish()?;

		Ok(self.duration_seconds)
	}
}

const fn default_report_limit() -> i64 { 10 }

/// The window (and, for ranked reports, the length) of an analytics report
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Validate)]
pub struct ReportQuery {
	pub from:  Option<NaiveDate>,
	pub to:    Option<NaiveDate>,
	#[serde(default = "default_report_limit")]
	#[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
	pub limit: i64,
}

impl Default for ReportQuery {
	fn default() -> Self { Self { from: None, to: None, limit: default_report_limit() } }
}

impl ReportQuery {
	/// Resolve the requested range, missing ends are filled in relative to
	/// `today`
	pub fn range(&self, today: NaiveDate) -> Result<DateRange, Error> {
		FieldCheck::new().validate("", self).finish()?;

		match (self.from, self.to) {
			(Some(from), Some(to)) => DateRange::new(from, to),
			(Some(from), None) => DateRange::new(from, today),
			(None, to) => Ok(DateRange::last_days(to.unwrap_or(today), DEFAULT_REPORT_DAYS)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2026, 3, d).unwrap() }

	#[test]
	fn reports_default_to_the_last_thirty_days() {
		let range = ReportQuery::default().range(day(31)).unwrap();

		assert_eq!(range.from, day(2));
		assert_eq!(range.to, day(31));
	}

	#[test]
	fn reversed_ranges_are_rejected() {
		let query = ReportQuery { from: Some(day(10)), to: Some(day(9)), limit: 10 };

		assert!(matches!(query.range(day(31)), Err(Error::ValidationError(_))));
	}

	#[test]
	fn limit_is_bounded() {
		let query = ReportQuery { limit: 101, ..Default::default() };

		assert!(matches!(query.range(day(31)), Err(Error::InvalidFields(_))));
	}

	#[test]
	fn empty_referrers_count_as_direct_visits() {
		let request = TrackRequest {
			visitor_key: "abc".to_string(),
			path:        "/".to_string(),
			referrer:    Some("  ".to_string()),
		};

		let view = request.to_insertable(Locale::En, None).unwrap();

		assert_eq!(view.referrer, None);
	}

	#[test]
	fn durations_over_a_day_are_rejected() {
		assert!(DurationRequest { duration_seconds: 86_400 }.checked().is_ok());
		assert!(DurationRequest { duration_seconds: 86_401 }.checked().is_err());
		assert!(DurationRequest { duration_seconds: -1 }.checked().is_err());
	}
}
