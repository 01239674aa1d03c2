//! Receiving and storing media library uploads

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::Utc;
use common::{Error, UploadError};
use db::MediaKind;
use media::NewMedia;
use mime::Mime;
use uuid::Uuid;

/// Map an accepted MIME type onto its media kind and the extension files of
/// that type are stored with
fn classify(mime: &Mime) -> Option<(MediaKind, &'static str)> {
	let accepted = match mime.essence_str() {
		"image/jpeg" | "image/jpg" => (MediaKind::Image, "jpg"),
		"image/png" => (MediaKind::Image, "png"),
		"image/webp" => (MediaKind::Image, "webp"),
		"image/gif" => (MediaKind::Image, "gif"),
		"image/svg+xml" => (MediaKind::Image, "svg"),
		"video/mp4" => (MediaKind::Video, "mp4"),
		"video/webm" => (MediaKind::Video, "webm"),
		"application/pdf" => (MediaKind::Document, "pdf"),
		_ => return None,
	};

	Some(accepted)
}

/// A file received through a multipart form, checked but not yet stored
#[derive(Debug)]
pub struct Upload {
	pub original_name: String,
	pub mime_type:     String,
	pub kind:          MediaKind,
	extension:         &'static str,
	bytes:             Bytes,
	pub alt_text:      Option<String>,
}

impl Upload {
	/// Read a `file` field and an optional `altText` field from a form
	///
	/// The file is rejected as soon as it grows past `max_bytes`, unknown
	/// fields are skipped
	pub async fn parse(data: &mut Multipart, max_bytes: usize) -> Result<Self, Error> {
		let mut file = None;
		let mut alt_text = None;

		while let Some(mut field) = data.next_field().await? {
			let name = field.name().map(ToString::to_string);

			match name.as_deref() {
				Some("file") => {
					let content_type =
						field.content_type().unwrap_or("application/octet-stream");

					let mime = content_type
						.parse::<Mime>()
						.map_err(|_| UploadError::UnsupportedType(content_type.to_string()))?;
					let (kind, extension) = classify(&mime)
						.ok_or_else(|| UploadError::UnsupportedType(content_type.to_string()))?;
					let mime_type = mime.essence_str().to_string();

					let original_name =
						field.file_name().unwrap_or("upload").to_string();

					let mut buf = Vec::new();

					while let Some(chunk) = field.chunk().await? {
						if buf.len() + chunk.len() > max_bytes {
							return Err(UploadError::TooLarge { limit: max_bytes }.into());
						}

						buf.extend_from_slice(&chunk);
					}

					file = Some((original_name, mime_type, kind, extension, buf));
				},
				Some("altText") => {
					let text = field.text().await?;
					let text = text.trim();

					if !text.is_empty() {
						alt_text = Some(text.to_string());
					}
				},
				_ => {},
			}
		}

		let Some((original_name, mime_type, kind, extension, buf)) = file else {
			return Err(UploadError::MissingFile.into());
		};

		Ok(Self {
			original_name,
			mime_type,
			kind,
			extension,
			bytes: Bytes::from(buf),
			alt_text,
		})
	}

	/// Write the file to `<upload_dir>/<yyyy>/<mm>/<dd>/<uuid>.<ext>`
	///
	/// Returns the absolute path (for cleanup) and the record to insert, whose
	/// `file_path` is relative to `upload_dir`
	pub async fn store(
		self,
		upload_dir: &Path,
		uploaded_by: i32,
	) -> Result<(PathBuf, NewMedia), Error> {
		let date_dir = Utc::now().format("%Y/%m/%d").to_string();
		let file_name = format!("{}.{}", Uuid::new_v4(), self.extension);
		let rel_filepath = format!("{date_dir}/{file_name}");

		let abs_dir = upload_dir.join(&date_dir);
		tokio::fs::create_dir_all(&abs_dir).await?;

		let abs_filepath = abs_dir.join(&file_name);
		tokio::fs::write(&abs_filepath, &self.bytes).await?;

		debug!("stored upload at {}", abs_filepath.display());

		#[allow(clippy::cast_possible_wrap)]
		let size_bytes = self.bytes.len() as i64;

		let new_media = NewMedia {
			kind: self.kind,
			original_name: self.original_name,
			file_path: rel_filepath,
			mime_type: self.mime_type,
			size_bytes,
			alt_text: self.alt_text,
			uploaded_by,
		};

		Ok((abs_filepath, new_media))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kind_of(mime: &str) -> Option<MediaKind> {
		classify(&mime.parse().unwrap()).map(|(kind, _)| kind)
	}

	#[test]
	fn allowlisted_types_are_classified() {
		assert_eq!(kind_of("image/png"), Some(MediaKind::Image));
		assert_eq!(kind_of("image/svg+xml"), Some(MediaKind::Image));
		assert_eq!(kind_of("video/webm"), Some(MediaKind::Video));
		assert_eq!(kind_of("application/pdf"), Some(MediaKind::Document));
	}

	#[test]
	fn parameters_do_not_affect_classification() {
		assert_eq!(kind_of("image/jpeg; q=0.9"), Some(MediaKind::Image));
	}

	#[test]
	fn other_types_are_rejected() {
		assert_eq!(kind_of("text/html"), None);
		assert_eq!(kind_of("application/x-msdownload"), None);
	}

	#[tokio::test]
	async fn files_land_in_a_dated_directory() {
		let dir = tempfile::tempdir().unwrap();
		let upload = Upload {
			original_name: "logo.png".to_string(),
			mime_type:     "image/png".to_string(),
			kind:          MediaKind::Image,
			extension:     "png",
			bytes:         Bytes::from_static(b"not really a png"),
			alt_text:      None,
		};

		let (abs_path, new_media) = upload.store(dir.path(), 1).await.unwrap();

		assert!(abs_path.starts_with(dir.path()));
		assert!(new_media.file_path.ends_with(".png"));
		assert_eq!(new_media.file_path.split('/').count(), 4);
		assert_eq!(new_media.size_bytes, 16);
		assert_eq!(tokio::fs::read(&abs_path).await.unwrap(), b"not really a png");
	}
}
