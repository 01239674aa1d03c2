use about_card::AboutCard;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models_common::Scope;

use crate::Config;
use crate::locale::RequestLocale;
use crate::schemas::about_card::{
	AboutCardAdminResponse,
	AboutCardResponse,
	CreateAboutCardRequest,
	UpdateAboutCardRequest,
};
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::{BuildResponse, ResponseContext, TrashFilter, build_all};
use crate::session::Session;

#[instrument(skip(pool, config))]
pub async fn get_about_cards(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, about_cards) = AboutCard::get_all(Scope::Public, None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<AboutCardResponse> = build_all(about_cards, &ctx);

	Ok(ApiResponse::new("about cards retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn get_about_card(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let about_card = AboutCard::get_by_id(id, Scope::Public, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: AboutCardResponse = about_card.build_response(&ctx);

	Ok(ApiResponse::new("about card retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_about_cards(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, about_cards) =
		AboutCard::get_all(scope, Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<AboutCardAdminResponse> = build_all(about_cards, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("about cards retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_about_card(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let about_card = AboutCard::get_by_id(id, scope, &conn).await?;
	let response: AboutCardAdminResponse =
		about_card.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("about card retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_about_card(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreateAboutCardRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_about_card =
		request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let about_card = new_about_card.insert(&conn).await?;

	let response: AboutCardAdminResponse =
		about_card.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("about card created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_about_card(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateAboutCardRequest>,
) -> Result<impl IntoResponse, Error> {
	let about_card_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let about_card = about_card_update.apply_to(id, &conn).await?;

	let response: AboutCardAdminResponse =
		about_card.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("about card updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_about_card(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	AboutCard::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("about card deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_about_card(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let about_card = AboutCard::restore(id, session.user_id, &conn).await?;
	let response: AboutCardAdminResponse =
		about_card.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("about card restored", response))
}
