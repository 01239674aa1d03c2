use chrono::NaiveDateTime;
use db::MediaKind;
use media::{Media, MediaFilter};
use primitives::UserSummary;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::{BuildResponse, ResponseContext};

/// A media library entry
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
	pub id:            i32,
	pub kind:          MediaKind,
	pub original_name: String,
	/// Publicly reachable location of the stored file
	pub url:           String,
	pub mime_type:     String,
	pub size_bytes:    i64,
	pub alt_text:      Option<String>,
	pub uploaded_by:   Option<UserSummary>,
	pub created_at:    NaiveDateTime,
}

impl BuildResponse<MediaResponse> for Media {
	fn build_response(self, ctx: &ResponseContext) -> MediaResponse {
		MediaResponse {
			id:            self.primitive.id,
			kind:          self.primitive.kind,
			original_name: self.primitive.original_name,
			url:           ctx.config.media_url(&self.primitive.file_path),
			mime_type:     self.primitive.mime_type,
			size_bytes:    self.primitive.size_bytes,
			alt_text:      self.primitive.alt_text,
			uploaded_by:   self.uploaded_by,
			created_at:    self.primitive.created_at,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct MediaQuery {
	pub kind: Option<MediaKind>,
}

impl From<MediaQuery> for MediaFilter {
	fn from(value: MediaQuery) -> Self { Self { kind: value.kind } }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMediaRequest {
	/// `null` or an absent value clears the alt text
	#[validate(length(max = 255, message = "alt text is too long"))]
	pub alt_text: Option<String>,
}
