use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::schemas::pagination::PaginationMeta;

/// The envelope every successful response is wrapped in
///
/// Errors use the matching `{ success: false, .. }` body rendered by
/// [`common::Error`]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiResponse<T> {
	pub success: bool,
	pub message: String,
	pub data:    T,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta:    Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
	#[must_use]
	pub fn new(message: impl Into<String>, data: T) -> Self {
		Self { success: true, message: message.into(), data, meta: None }
	}

	#[must_use]
	pub fn with_meta(self, meta: PaginationMeta) -> Self {
		Self { meta: Some(meta), ..self }
	}
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
	fn into_response(self) -> Response { Json(self).into_response() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn meta_is_left_out_of_single_items() {
		let body = serde_json::to_value(ApiResponse::new("ok", 3)).unwrap();

		assert_eq!(
			body,
			serde_json::json!({ "success": true, "message": "ok", "data": 3 })
		);
	}

	#[test]
	fn lists_carry_meta() {
		let meta = PaginationMeta { page: 2, per_page: 10, total: 25, total_pages: 3 };
		let body =
			serde_json::to_value(ApiResponse::new("ok", vec![1]).with_meta(meta))
				.unwrap();

		assert_eq!(
			body["meta"],
			serde_json::json!({ "page": 2, "perPage": 10, "total": 25, "totalPages": 3 })
		);
	}
}
