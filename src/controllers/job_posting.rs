use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use job_posting::JobPosting;
use models_common::Scope;

use crate::Config;
use crate::locale::RequestLocale;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::job_posting::{
	CreateJobPostingRequest,
	JobPostingAdminResponse,
	JobPostingResponse,
	UpdateJobPostingRequest,
};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::{BuildResponse, ResponseContext, TrashFilter, build_all};
use crate::session::Session;

#[instrument(skip(pool, config))]
pub async fn get_job_postings(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (_, job_postings) = JobPosting::get_all(Scope::Public, None, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: Vec<JobPostingResponse> = build_all(job_postings, &ctx);

	Ok(ApiResponse::new("job postings retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn get_job_posting(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	RequestLocale(locale): RequestLocale,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let job_posting = JobPosting::get_by_id(id, Scope::Public, &conn).await?;

	let ctx = ResponseContext::new(&config, locale);
	let response: JobPostingResponse = job_posting.build_response(&ctx);

	Ok(ApiResponse::new("job posting retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_job_postings(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let (total, job_postings) =
		JobPosting::get_all(scope, Some(p_opts.config()), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<JobPostingAdminResponse> = build_all(job_postings, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("job postings retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn admin_get_job_posting(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiQuery(trash): ApiQuery<TrashFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let scope = Scope::admin(trash.trashed);
	let job_posting = JobPosting::get_by_id(id, scope, &conn).await?;
	let response: JobPostingAdminResponse =
		job_posting.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("job posting retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_job_posting(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiJson(request): ApiJson<CreateJobPostingRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_job_posting =
		request.to_insertable(config.default_locale, session.user_id)?;

	let conn = pool.get().await?;
	let job_posting = new_job_posting.insert(&conn).await?;

	let response: JobPostingAdminResponse =
		job_posting.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("job posting created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_job_posting(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateJobPostingRequest>,
) -> Result<impl IntoResponse, Error> {
	let job_posting_update = request.to_insertable(session.user_id)?;

	let conn = pool.get().await?;
	let job_posting = job_posting_update.apply_to(id, &conn).await?;

	let response: JobPostingAdminResponse =
		job_posting.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("job posting updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_job_posting(
	State(pool): State<DbPool>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	JobPosting::soft_delete(id, session.user_id, &conn).await?;

	Ok(ApiResponse::new("job posting deleted", ()))
}

#[instrument(skip(pool, config))]
pub async fn restore_job_posting(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let job_posting = JobPosting::restore(id, session.user_id, &conn).await?;
	let response: JobPostingAdminResponse =
		job_posting.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("job posting restored", response))
}
