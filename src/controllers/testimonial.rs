use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use models_common::Scope;
use testimonial::Testimonial;

use crate::Config;
use crate::locale::RequestLocale;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::testimonial::{
	CreateTestimonialRequest,
	TestimonialAdminResponse,
	TestimonialResponse,
	UpdateTestimonialRequest,
};
use crate::schemas::{BuildResponse, ResponseContext, TrashFilter, build_all};
use crate::session::Session;

#[instrument(skip(pool, config))]
pub async fn get_testimonials(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, testimonials) = Testimonial::get_all(Scope::Public, None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<TestimonialResponse> = build_all(testimonials, &ctx);

	Ok(ApiResponse::new("testimonials retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn get_testimonial(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let testimonial = Testimonial::get_by_id(id, Scope::Public, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: TestimonialResponse = testimonial.build_response(&ctx);

	Ok(ApiResponse::new("testimonial retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_testimonials(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, testimonials) =
		Testimonial::get_all(scope, Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<TestimonialAdminResponse> = build_all(testimonials, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("testimonials retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_testimonial(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let testimonial = Testimonial::get_by_id(id, scope, &conn).await?;
	let response: TestimonialAdminResponse =
		testimonial.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("testimonial retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_testimonial(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreateTestimonialRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_testimonial =
		request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let testimonial = new_testimonial.insert(&conn).await?;

	let response: TestimonialAdminResponse =
		testimonial.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("testimonial created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_testimonial(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateTestimonialRequest>,
) -> Result<impl IntoResponse, Error> {
	let testimonial_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let testimonial = testimonial_update.apply_to(id, &conn).await?;

	let response: TestimonialAdminResponse =
		testimonial.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("testimonial updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_testimonial(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Testimonial::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("testimonial deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_testimonial(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let testimonial = Testimonial::restore(id, session.user_id, &conn).await?;
	let response: TestimonialAdminResponse =
		testimonial.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("testimonial restored", response))
}
