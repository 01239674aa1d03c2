use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use user::User;

use crate::Config;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::schemas::{BuildResponse, ResponseContext, build_all};

#[instrument(skip(pool, config))]
pub async fn get_users(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (total, users) = User::get_all(p_opts.config(), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<UserResponse> = build_all(users, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("users retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn get_user(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let user = User::get_by_id(id, &conn).await?;
	let response: UserResponse =
		user.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("user retrieved", response))
}

#[instrument(skip_all)]
pub async fn create_user(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_user = request.to_insertable()?;

	let conn = pool.get().await?;
	let user = new_user.insert(&conn).await?;

	let response: UserResponse =
		user.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("user created", response)))
}

#[instrument(skip(pool, config, request))]
pub async fn update_user(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, Error> {
	let user_update = request.to_insertable()?;

	let conn = pool.get().await?;
	let user = user_update.apply_to(id, &conn).await?;

	let response: UserResponse =
		user.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("user updated", response))
}
