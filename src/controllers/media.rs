use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use media::Media;

use crate::Config;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schemas::media::{MediaQuery, MediaResponse, UpdateMediaRequest};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::validation::FieldCheck;
use crate::schemas::{BuildResponse, ResponseContext, build_all};
use crate::session::Session;
use crate::upload::Upload;

#[instrument(skip(pool, config, data))]
pub async fn upload_media(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	mut data: Multipart,
) -> Result<impl IntoResponse, Error> {
	let upload = Upload::parse(&mut data, config.max_upload_bytes).await?;

	let conn = pool.get().await?;

	let (abs_filepath, new_media) =
		upload.store(&config.upload_dir, session.user_id).await?;

	let media = match new_media.insert(&conn).await {
		Ok(media) => media,
		Err(e) => {
			if let Err(io_err) = tokio::fs::remove_file(&abs_filepath).await {
				warn!("failed to remove {}: {io_err}", abs_filepath.display());
			}

			return Err(e);
		},
	};

	let response: MediaResponse =
		media.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("media uploaded", response)))
}

#[instrument(skip(pool, config))]
pub async fn get_all_media(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiQuery(p_opts): ApiQuery<PaginationOptions>,
	ApiQuery(query): ApiQuery<MediaQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (total, media) = Media::get_all(query.into(), p_opts.config(), &conn).await?;

	let ctx = ResponseContext::admin(&config);
	let response: Vec<MediaResponse> = build_all(media, &ctx);

	let meta = p_opts.meta(total);

	Ok(ApiResponse::new("media retrieved", response).with_meta(meta))
}

#[instrument(skip(pool, config))]
pub async fn get_media(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let media = Media::get_by_id(id, &conn).await?;
	let response: MediaResponse =
		media.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("media retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn update_media(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath(id): ApiPath<i32>,
	ApiJson(request): ApiJson<UpdateMediaRequest>,
) -> Result<impl IntoResponse, Error> {
	FieldCheck::new().validate("", &request).finish()?;

	let conn = pool.get().await?;

	let media = Media::update_alt_text(id, request.alt_text, &conn).await?;
	let response: MediaResponse =
		media.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("media updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_media(
	State(pool): State<DbPool>,
	ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Media::soft_delete(id, &conn).await?;

	Ok(ApiResponse::new("media deleted", ()))
}
