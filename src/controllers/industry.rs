use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use industry::Industry;
use models_common::Scope;

use crate::Config;
use crate::locale::RequestLocale;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::industry::{
	CreateIndustryRequest,
	IndustryAdminResponse,
	IndustryResponse,
	UpdateIndustryRequest,
};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::{BuildResponse, ResponseContext, TrashFilter, build_all};
use crate::session::Session;

#[instrument(skip(pool, config))]
pub async fn get_industries(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, industries) = Industry::get_all(Scope::Public, None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<IndustryResponse> = build_all(industries, &ctx);

	Ok(ApiResponse::new("industries retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn get_industry(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let industry = Industry::get_by_id(id, Scope::Public, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: IndustryResponse = industry.build_response(&ctx);

	Ok(ApiResponse::new("industry retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_industries(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, industries) =
		Industry::get_all(scope, Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<IndustryAdminResponse> = build_all(industries, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("industries retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_industry(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let industry = Industry::get_by_id(id, scope, &conn).await?;
	let response: IndustryAdminResponse =
		industry.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("industry retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_industry(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreateIndustryRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_industry =
		request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let industry = new_industry.insert(&conn).await?;

	let response: IndustryAdminResponse =
		industry.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("industry created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_industry(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateIndustryRequest>,
) -> Result<impl IntoResponse, Error> {
	let industry_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let industry = industry_update.apply_to(id, &conn).await?;

	let response: IndustryAdminResponse =
		industry.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("industry updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_industry(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Industry::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("industry deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_industry(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let industry = Industry::restore(id, session.user_id, &conn).await?;
	let response: IndustryAdminResponse =
		industry.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("industry restored", response))
}
