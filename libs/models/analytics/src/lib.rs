//! Anonymous visitor tracking and the reports built on top of it

#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use common::{DbConn, Error};
use db::{Locale, page_view, visitor};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Timestamp};
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

mod report;

pub use report::*;

/// The longest duration a single page view can be credited with
pub const MAX_DURATION_SECONDS: i32 = 86_400;

/// A page view reported by the public site
#[derive(Clone, Debug)]
pub struct NewPageView {
	pub visitor_key: String,
	pub user_agent:  Option<String>,
	pub path:        String,
	pub locale:      Locale,
	pub referrer:    Option<String>,
}

/// Ids handed back to the tracking script
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedView {
	pub page_view_id: i32,
	pub visitor_id:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = visitor)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableVisitor {
	visitor_key:   String,
	user_agent:    Option<String>,
	first_seen_at: NaiveDateTime,
	last_seen_at:  NaiveDateTime,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = page_view)]
#[diesel(check_for_backend(Sqlite))]
struct InsertablePageView {
	visitor_id: i32,
	path:       String,
	locale:     Locale,
	referrer:   Option<String>,
	viewed_at:  NaiveDateTime,
}

impl NewPageView {
	/// Create or touch the visitor and record this page view
	#[instrument(skip(conn))]
	pub async fn record(self, conn: &DbConn) -> Result<TrackedView, Error> {
		let tracked = conn
			.interact(move |conn| {
				conn.transaction::<_, diesel::result::Error, _>(|conn| {
					let now = Utc::now().naive_utc();

					let new_visitor = InsertableVisitor {
						visitor_key:   self.visitor_key,
						user_agent:    self.user_agent.clone(),
						first_seen_at: now,
						last_seen_at:  now,
					};

					let visitor_id = diesel::insert_into(visitor::table)
						.values(new_visitor)
						.on_conflict(visitor::visitor_key)
						.do_update()
						.set((
							visitor::last_seen_at.eq(now),
							self.user_agent.map(|ua| visitor::user_agent.eq(ua)),
						))
						.returning(visitor::id)
						.get_result(conn)?;

					let new_view = InsertablePageView {
						visitor_id,
						path:      self.path,
						locale:    self.locale,
						referrer:  self.referrer,
						viewed_at: now,
					};

					let page_view_id = diesel::insert_into(page_view::table)
						.values(new_view)
						.returning(page_view::id)
						.get_result(conn)?;

					Ok(TrackedView { page_view_id, visitor_id })
				})
			})
			.await??;

		debug!(
			"recorded page view {} for visitor {}",
			tracked.page_view_id, tracked.visitor_id
		);

		Ok(tracked)
	}
}

/// Set how long a visitor stayed on a page
#[instrument(skip(conn))]
pub async fn set_duration(
	page_view_id: i32,
	duration_seconds: i32,
	conn: &DbConn,
) -> Result<(), Error> {
	let affected = conn
		.interact(move |conn| {
			diesel::update(page_view::table.find(page_view_id))
				.set(page_view::duration_seconds.eq(duration_seconds))
				.execute(conn)
		})
		.await??;

	if affected == 0 {
		return Err(Error::NotFound(format!("page view with id {page_view_id}")));
	}

	Ok(())
}

/// An inclusive range of calendar days (UTC)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
	pub from: NaiveDate,
	pub to:   NaiveDate,
}

impl DateRange {
	/// Build a range, rejecting one that ends before it starts
	pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, Error> {
		if from > to {
			return Err(Error::ValidationError(format!(
				"range start {from} is after its end {to}"
			)));
		}

		Ok(Self { from, to })
	}

	/// The `days` days up to and including `to`
	#[must_use]
	pub fn last_days(to: NaiveDate, days: u64) -> Self {
		let from = to
			.checked_sub_days(chrono::Days::new(days.saturating_sub(1)))
			.unwrap_or(NaiveDate::MIN);

		Self { from, to }
	}

	/// Half-open timestamp bounds `[start, end)` covering every day
	fn bounds(self) -> (NaiveDateTime, NaiveDateTime) {
		let start = self.from.and_time(NaiveTime::MIN);
		let end = self
			.to
			.succ_opt()
			.map_or(NaiveDateTime::MAX, |d| d.and_time(NaiveTime::MIN));

		(start, end)
	}
}

#[derive(Debug, QueryableByName)]
struct SummaryRow {
	#[diesel(sql_type = BigInt)]
	page_views:       i64,
	#[diesel(sql_type = BigInt)]
	unique_visitors:  i64,
	#[diesel(sql_type = Nullable<Double>)]
	average_duration: Option<f64>,
}

#[derive(Debug, QueryableByName)]
struct CountRow {
	#[diesel(sql_type = BigInt)]
	count: i64,
}

/// Page view totals over a [`DateRange`]
#[instrument(skip(conn))]
pub async fn summary(range: DateRange, conn: &DbConn) -> Result<Summary, Error> {
	let (start, end) = range.bounds();

	let summary = conn
		.interact(move |conn| {
			let row: SummaryRow = diesel::sql_query(
				"SELECT COUNT(*) AS page_views, COUNT(DISTINCT visitor_id) AS \
				 unique_visitors, AVG(duration_seconds) AS average_duration FROM \
				 page_view WHERE viewed_at >= ? AND viewed_at < ?",
			)
			.bind::<Timestamp, _>(start)
			.bind::<Timestamp, _>(end)
			.get_result(conn)?;

			let new_visitors: CountRow = diesel::sql_query(
				"SELECT COUNT(*) AS count FROM visitor WHERE first_seen_at >= ? \
				 AND first_seen_at < ?",
			)
			.bind::<Timestamp, _>(start)
			.bind::<Timestamp, _>(end)
			.get_result(conn)?;

			Ok::<_, diesel::result::Error>(Summary {
				from:             range.from,
				to:               range.to,
				page_views:       row.page_views,
				unique_visitors:  row.unique_visitors,
				new_visitors:     new_visitors.count,
				average_duration: row.average_duration,
			})
		})
		.await??;

	Ok(summary)
}

/// The most viewed paths in a [`DateRange`]
#[instrument(skip(conn))]
pub async fn top_pages(
	range: DateRange,
	limit: i64,
	conn: &DbConn,
) -> Result<Vec<PageStats>, Error> {
	let (start, end) = range.bounds();

	let pages = conn
		.interact(move |conn| {
			diesel::sql_query(
				"SELECT path, COUNT(*) AS views, COUNT(DISTINCT visitor_id) AS \
				 unique_visitors, AVG(duration_seconds) AS average_duration FROM \
				 page_view WHERE viewed_at >= ? AND viewed_at < ? GROUP BY path \
				 ORDER BY views DESC, path ASC LIMIT ?",
			)
			.bind::<Timestamp, _>(start)
			.bind::<Timestamp, _>(end)
			.bind::<BigInt, _>(limit)
			.load(conn)
		})
		.await??;

	Ok(pages)
}

/// Views and visitors per day in a [`DateRange`], oldest day first
///
/// Days without any views are left out
#[instrument(skip(conn))]
pub async fn daily(range: DateRange, conn: &DbConn) -> Result<Vec<DailyStats>, Error> {
	let (start, end) = range.bounds();

	let days = conn
		.interact(move |conn| {
			diesel::sql_query(
				"SELECT substr(viewed_at, 1, 10) AS day, COUNT(*) AS views, \
				 COUNT(DISTINCT visitor_id) AS unique_visitors FROM page_view \
				 WHERE viewed_at >= ? AND viewed_at < ? GROUP BY day ORDER BY \
				 day ASC",
			)
			.bind::<Timestamp, _>(start)
			.bind::<Timestamp, _>(end)
			.load(conn)
		})
		.await??;

	Ok(days)
}

/// Views per locale in a [`DateRange`]
#[instrument(skip(conn))]
pub async fn locales(
	range: DateRange,
	conn: &DbConn,
) -> Result<Vec<LocaleStats>, Error> {
	let (start, end) = range.bounds();

	let locales = conn
		.interact(move |conn| {
			diesel::sql_query(
				"SELECT locale, COUNT(*) AS views FROM page_view WHERE viewed_at \
				 >= ? AND viewed_at < ? GROUP BY locale ORDER BY views DESC, \
				 locale ASC",
			)
			.bind::<Timestamp, _>(start)
			.bind::<Timestamp, _>(end)
			.load(conn)
		})
		.await??;

	Ok(locales)
}

/// The most common referrers in a [`DateRange`], direct visits excluded
#[instrument(skip(conn))]
pub async fn top_referrers(
	range: DateRange,
	limit: i64,
	conn: &DbConn,
) -> Result<Vec<ReferrerStats>, Error> {
	let (start, end) = range.bounds();

	let referrers = conn
		.interact(move |conn| {
			diesel::sql_query(
				"SELECT referrer, COUNT(*) AS views FROM page_view WHERE \
				 viewed_at >= ? AND viewed_at < ? AND referrer IS NOT NULL GROUP \
				 BY referrer ORDER BY views DESC, referrer ASC LIMIT ?",
			)
			.bind::<Timestamp, _>(start)
			.bind::<Timestamp, _>(end)
			.bind::<BigInt, _>(limit)
			.load(conn)
		})
		.await??;

	Ok(referrers)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

	#[test]
	fn reversed_range_is_rejected() {
		assert!(DateRange::new(date("2025-06-02"), date("2025-06-01")).is_err());
		assert!(DateRange::new(date("2025-06-01"), date("2025-06-01")).is_ok());
	}

	#[test]
	fn last_days_includes_the_end_date() {
		let range = DateRange::last_days(date("2025-06-30"), 30);

		assert_eq!(range.from, date("2025-06-01"));
		assert_eq!(range.to, date("2025-06-30"));
	}

	#[test]
	fn bounds_cover_the_whole_last_day() {
		let range = DateRange::new(date("2025-06-01"), date("2025-06-03")).unwrap();
		let (start, end) = range.bounds();

		assert_eq!(start.to_string(), "2025-06-01 00:00:00");
		assert_eq!(end.to_string(), "2025-06-04 00:00:00");
	}
}
