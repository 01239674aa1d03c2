use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use faq::{Faq, FaqCategory};
use models_common::Scope;

use crate::Config;
use crate::locale::RequestLocale;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::faq::{
	CreateFaqCategoryRequest,
	CreateFaqRequest,
	FaqAdminResponse,
	FaqCategoryAdminResponse,
	FaqCategoryResponse,
	FaqQuery,
	FaqResponse,
	UpdateFaqCategoryRequest,
	UpdateFaqRequest,
};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::{BuildResponse, ResponseContext, TrashFilter, build_all};
use crate::session::Session;

#[instrument(skip(pool, config))]
pub async fn get_faqs(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiQuery(query): ApiQuery<FaqQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, faqs) = Faq::get_all(Scope::Public, query.into(), None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<FaqResponse> = build_all(faqs, &ctx);

	Ok(ApiResponse::new("faqs retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn get_faq(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let faq = Faq::get_by_id(id, Scope::Public, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: FaqResponse = faq.build_response(&ctx);

	Ok(ApiResponse::new("faq retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_faqs(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
	ApiQuery(query): ApiQuery<FaqQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, faqs) =
		Faq::get_all(scope, query.into(), Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<FaqAdminResponse> = build_all(faqs, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("faqs retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_faq(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let faq = Faq::get_by_id(id, Scope::admin(trash.trashed), &conn).await?;
	let response: FaqAdminResponse =
		faq.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("faq retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_faq(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreateFaqRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_faq = request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let faq = new_faq.insert(&conn).await?;

	let response: FaqAdminResponse =
		faq.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("faq created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_faq(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateFaqRequest>,
) -> Result<impl IntoResponse, Error> {
	let faq_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let faq = faq_update.apply_to(id, &conn).await?;

	let response: FaqAdminResponse =
		faq.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("faq updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_faq(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Faq::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("faq deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_faq(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let faq = Faq::restore(id, session.user_id, &conn).await?;
	let response: FaqAdminResponse =
		faq.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("faq restored", response))
}

#[instrument(skip(pool, config))]
pub async fn get_faq_categories(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, categories) = FaqCategory::get_all(Scope::Public, None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<FaqCategoryResponse> = build_all(categories, &ctx);

	Ok(ApiResponse::new("faq categories retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_faq_categories(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, categories) =
		FaqCategory::get_all(scope, Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<FaqCategoryAdminResponse> = build_all(categories, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("faq categories retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_faq_category(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let category = FaqCategory::get_by_id(id, scope, &conn).await?;
	let response: FaqCategoryAdminResponse =
		category.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("faq category retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_faq_category(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreateFaqCategoryRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_category =
		request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let category = new_category.insert(&conn).await?;

	let response: FaqCategoryAdminResponse =
		category.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("faq category created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_faq_category(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateFaqCategoryRequest>,
) -> Result<impl IntoResponse, Error> {
	let category_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let category = category_update.apply_to(id, &conn).await?;

	let response: FaqCategoryAdminResponse =
		category.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("faq category updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_faq_category(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	FaqCategory::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("faq category deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_faq_category(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let category = FaqCategory::restore(id, session.user_id, &conn).await?;
	let response: FaqCategoryAdminResponse =
		category.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("faq category restored", response))
}
