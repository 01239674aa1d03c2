use analytics::set_duration;
use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::Utc;
use common::{DbPool, Error};

use crate::locale::RequestLocale;
use crate::schemas::analytics::{DurationRequest, ReportQuery, TrackRequest};
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};

/// Longest user agent that is kept
const MAX_USER_AGENT_LEN: usize = 512;

fn user_agent(headers: &HeaderMap) -> Option<String> {
	let agent = headers.get(USER_AGENT)?.to_str().ok()?;

	Some(agent.chars().take(MAX_USER_AGENT_LEN).collect())
}

#[instrument(skip(pool, headers))]
pub async fn track_page_view(
	State(pool): State<DbPool>,
	RequestLocale(locale): RequestLocale,
	headers: HeaderMap,
	ApiJson(request): ApiJson<TrackRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_view = request.to_insertable(locale, user_agent(&headers))?;

	let conn = pool.get().await?;
	let tracked = new_view.record(&conn).await?;

	Ok((StatusCode::CREATED, ApiResponse::new("page view recorded", tracked)))
}

#[instrument(skip(pool))]
pub async fn set_page_view_duration(
	State(pool): State<DbPool>,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<DurationRequest>,
) -> Result<impl IntoResponse, Error> {
	let seconds = request.checked()?;

	let conn = pool.get().await?;

	set_duration(id, seconds, &conn).await?;

	Ok(ApiResponse::new("page view updated", ()))
}

#[instrument(skip(pool))]
pub async fn get_summary(
	State(pool): State<DbPool>,
	ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<impl IntoResponse, Error> {
	let range = query.range(Utc::now().date_naive())?;

	let conn = pool.get().await?;
	let summary = analytics::summary(range, &conn).await?;

	Ok(ApiResponse::new("summary retrieved", summary))
}

#[instrument(skip(pool))]
pub async fn get_top_pages(
	State(pool): State<DbPool>,
	ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<impl IntoResponse, Error> {
	let range = query.range(Utc::now().date_naive())?;

	let conn = pool.get().await?;
	let pages = analytics::top_pages(range, query.limit, &conn).await?;

	Ok(ApiResponse::new("top pages retrieved", pages))
}

#[instrument(skip(pool))]
pub async fn get_daily(
	State(pool): State<DbPool>,
	ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<impl IntoResponse, Error> {
	let range = query.range(Utc::now().date_naive())?;

	let conn = pool.get().await?;
	let days = analytics::daily(range, &conn).await?;

	Ok(ApiResponse::new("daily views retrieved", days))
}

#[instrument(skip(pool))]
pub async fn get_locales(
	State(pool): State<DbPool>,
	ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<impl IntoResponse, Error> {
	let range = query.range(Utc::now().date_naive())?;

	let conn = pool.get().await?;
	let locales = analytics::locales(range, &conn).await?;

	Ok(ApiResponse::new("locale views retrieved", locales))
}

#[instrument(skip(pool))]
pub async fn get_top_referrers(
	State(pool): State<DbPool>,
	ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<impl IntoResponse, Error> {
	let range = query.range(Utc::now().date_naive())?;

	let conn = pool.get().await?;
	let referrers = analytics::top_referrers(range, query.limit, &conn).await?;

	Ok(ApiResponse::new("top referrers retrieved", referrers))
}
