use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use feature::Feature;
use models_common::Scope;

use crate::Config;
use crate::locale::RequestLocale;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::feature::{
	CreateFeatureRequest,
	FeatureAdminResponse,
	FeatureResponse,
	UpdateFeatureRequest,
};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::{BuildResponse, ResponseContext, TrashFilter, build_all};
use crate::session::Session;

#[instrument(skip(pool, config))]
pub async fn get_features(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, features) = Feature::get_all(Scope::Public, None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<FeatureResponse> = build_all(features, &ctx);

	Ok(ApiResponse::new("features retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn get_feature(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let feature = Feature::get_by_id(id, Scope::Public, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: FeatureResponse = feature.build_response(&ctx);

	Ok(ApiResponse::new("feature retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_features(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, features) =
		Feature::get_all(scope, Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<FeatureAdminResponse> = build_all(features, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("features retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_feature(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let feature = Feature::get_by_id(id, scope, &conn).await?;
	let response: FeatureAdminResponse =
		feature.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("feature retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_feature(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreateFeatureRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_feature =
		request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let feature = new_feature.insert(&conn).await?;

	let response: FeatureAdminResponse =
		feature.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("feature created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_feature(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateFeatureRequest>,
) -> Result<impl IntoResponse, Error> {
	let feature_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let feature = feature_update.apply_to(id, &conn).await?;

	let response: FeatureAdminResponse =
		feature.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("feature updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_feature(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Feature::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("feature deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_feature(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let feature = Feature::restore(id, session.user_id, &conn).await?;
	let response: FeatureAdminResponse =
		feature.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("feature restored", response))
}
