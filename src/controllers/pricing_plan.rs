use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models_common::Scope;
use pricing_plan::PricingPlan;

use crate::Config;
use crate::locale::RequestLocale;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::pricing_plan::{
	CreatePricingPlanRequest,
	PricingPlanAdminResponse,
	PricingPlanResponse,
	UpdatePricingPlanRequest,
};
use crate::schemas::{BuildResponse, ResponseContext, TrashFilter, build_all};
use crate::session::Session;

#[instrument(skip(pool, config))]
pub async fn get_pricing_plans(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, pricing_plans) = PricingPlan::get_all(Scope::Public, None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<PricingPlanResponse> = build_all(pricing_plans, &ctx);

	Ok(ApiResponse::new("pricing plans retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn get_pricing_plan(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let pricing_plan = PricingPlan::get_by_id(id, Scope::Public, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: PricingPlanResponse = pricing_plan.build_response(&ctx);

	Ok(ApiResponse::new("pricing plan retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_pricing_plans(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, pricing_plans) =
		PricingPlan::get_all(scope, Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<PricingPlanAdminResponse> = build_all(pricing_plans, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("pricing plans retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_pricing_plan(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let pricing_plan = PricingPlan::get_by_id(id, scope, &conn).await?;
	let response: PricingPlanAdminResponse =
		pricing_plan.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("pricing plan retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_pricing_plan(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreatePricingPlanRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_pricing_plan =
		request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let pricing_plan = new_pricing_plan.insert(&conn).await?;

	let response: PricingPlanAdminResponse =
		pricing_plan.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("pricing plan created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_pricing_plan(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdatePricingPlanRequest>,
) -> Result<impl IntoResponse, Error> {
	let pricing_plan_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let pricing_plan = pricing_plan_update.apply_to(id, &conn).await?;

	let response: PricingPlanAdminResponse =
		pricing_plan.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("pricing plan updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_pricing_plan(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	PricingPlan::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("pricing plan deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_pricing_plan(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let pricing_plan = PricingPlan::restore(id, session.user_id, &conn).await?;
	let response: PricingPlanAdminResponse =
		pricing_plan.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("pricing plan restored", response))
}
