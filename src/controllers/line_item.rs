//! Nested endpoints for the line items of industries and job postings
//!
//! Every handler is generic over the list type of the owner so a path like
//! `/industries/1/items/requirements` is rejected before any lookup

use std::fmt::Debug;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use db::LineItemKind;
use line_item::LineItem;
use serde::de::DeserializeOwned;

use crate::Config;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::{ApiJson, ApiPath};
use crate::schemas::line_item::{
	CreateLineItemRequest,
	LineItemAdminResponse,
	UpdateLineItemRequest,
};
use crate::schemas::{BuildResponse, ResponseContext};

#[instrument(skip(pool, config))]
pub async fn get_line_item<L>(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath((owner_id, list, item_id)): ApiPath<(i32, L, i32)>,
) -> Result<impl IntoResponse, Error>
where
	L: Into<LineItemKind> + DeserializeOwned + Debug + Send,
{
	let conn = pool.get().await?;

	let item = LineItem::get(list.into(), owner_id, item_id, &conn).await?;
	let response: LineItemAdminResponse =
		item.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("line item retrieved", response))
}

#[instrument(skip(pool, config))]
pub async fn create_line_item<L>(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath((owner_id, list)): ApiPath<(i32, L)>,
	ApiJson(request): ApiJson<CreateLineItemRequest>,
) -> Result<impl IntoResponse, Error>
where
	L: Into<LineItemKind> + DeserializeOwned + Debug + Send,
{
	let new_item = request.to_insertable(config.default_locale)?;

	let conn = pool.get().await?;
	let item = new_item.insert(list.into(), owner_id, &conn).await?;

	let response: LineItemAdminResponse =
		item.build_response(&ResponseContext::admin(&config));

	Ok((StatusCode::CREATED, ApiResponse::new("line item created", response)))
}

#[instrument(skip(pool, config))]
pub async fn update_line_item<L>(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	ApiPath((owner_id, list, item_id)): ApiPath<(i32, L, i32)>,
	ApiJson(request): ApiJson<UpdateLineItemRequest>,
) -> Result<impl IntoResponse, Error>
where
	L: Into<LineItemKind> + DeserializeOwned + Debug + Send,
{
	let item_update = request.to_insertable()?;

	let conn = pool.get().await?;
	let item = item_update.apply_to(list.into(), owner_id, item_id, &conn).await?;

	let response: LineItemAdminResponse =
		item.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("line item updated", response))
}

#[instrument(skip(pool))]
pub async fn delete_line_item<L>(
	State(pool): State<DbPool>,
	ApiPath((owner_id, list, item_id)): ApiPath<(i32, L, i32)>,
) -> Result<impl IntoResponse, Error>
where
	L: Into<LineItemKind> + DeserializeOwned + Debug + Send,
{
	let conn = pool.get().await?;

	LineItem::delete(list.into(), owner_id, item_id, &conn).await?;

	Ok(ApiResponse::new("line item deleted", ()))
}
