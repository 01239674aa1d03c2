use chrono::NaiveDate;
use db::Locale;
use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
	pub from:             NaiveDate,
	pub to:               NaiveDate,
	pub page_views:       i64,
	pub unique_visitors:  i64,
	/// Visitors first seen inside the range
	pub new_visitors:     i64,
	/// `None` when no view in the range reported a duration
	pub average_duration: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, QueryableByName, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStats {
	#[diesel(sql_type = Text)]
	pub path:             String,
	#[diesel(sql_type = BigInt)]
	pub views:            i64,
	#[diesel(sql_type = BigInt)]
	pub unique_visitors:  i64,
	#[diesel(sql_type = Nullable<Double>)]
	pub average_duration: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, QueryableByName, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
	/// `YYYY-MM-DD`
	#[diesel(sql_type = Text)]
	pub day:             String,
	#[diesel(sql_type = BigInt)]
	pub views:           i64,
	#[diesel(sql_type = BigInt)]
	pub unique_visitors: i64,
}

#[derive(Clone, Debug, Deserialize, QueryableByName, Serialize)]
pub struct LocaleStats {
	#[diesel(sql_type = Text)]
	pub locale: Locale,
	#[diesel(sql_type = BigInt)]
	pub views:  i64,
}

#[derive(Clone, Debug, Deserialize, QueryableByName, Serialize)]
pub struct ReferrerStats {
	#[diesel(sql_type = Text)]
	pub referrer: String,
	#[diesel(sql_type = BigInt)]
	pub views:    i64,
}
