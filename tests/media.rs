use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use db::{Locale, MediaKind};
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::feature::{CreateFeatureRequest, FeatureResponse};
use landing_cms::schemas::media::{MediaResponse, UpdateMediaRequest};
use primitives::FeatureFields;
use translation::Translations;

mod common;

use common::TestEnv;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really an image";

fn png_form(alt_text: Option<&str>) -> MultipartForm {
	let part = Part::bytes(PNG_BYTES.to_vec())
		.file_name("logo.png")
		.mime_type("image/png");

	let form = MultipartForm::new().add_part("file", part);

	match alt_text {
		Some(text) => form.add_text("altText", text.to_string()),
		None => form,
	}
}

async fn upload_png(env: &TestEnv) -> MediaResponse {
	let response =
		env.app.post("/admin/media").multipart(png_form(Some("Logo"))).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ApiResponse<MediaResponse>>().data
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_media() {
	let env = TestEnv::new().await.login_editor().await;

	let media = upload_png(&env).await;

	assert_eq!(media.kind, MediaKind::Image);
	assert_eq!(media.original_name, "logo.png");
	assert_eq!(media.mime_type, "image/png");
	assert_eq!(media.size_bytes, PNG_BYTES.len() as i64);
	assert_eq!(media.alt_text.as_deref(), Some("Logo"));
	assert_eq!(media.uploaded_by.map(|u| u.username), Some("editor".into()));
	assert!(media.url.starts_with("http://localhost:8000/uploads/"));
	assert!(media.url.ends_with(".png"));

	let path = media.url.trim_start_matches("http://localhost:8000");
	let response = env.app.get(path).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.as_bytes().as_ref(), PNG_BYTES);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_unsupported_type() {
	let env = TestEnv::new().await.login_admin().await;

	let part = Part::bytes(b"#!/bin/sh".to_vec())
		.file_name("run.sh")
		.mime_type("application/x-sh");

	let response = env
		.app
		.post("/admin/media")
		.multipart(MultipartForm::new().add_part("file", part))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_too_large() {
	let env = TestEnv::new().await.login_admin().await;

	let part = Part::bytes(vec![0u8; env.config.max_upload_bytes + 1])
		.file_name("big.pdf")
		.mime_type("application/pdf");

	let response = env
		.app
		.post("/admin/media")
		.multipart(MultipartForm::new().add_part("file", part))
		.await;

	assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_without_file() {
	let env = TestEnv::new().await.login_admin().await;

	let form = MultipartForm::new().add_text("altText", "Nothing");

	let response = env.app.post("/admin/media").multipart(form).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_filter_and_update_media() {
	let env = TestEnv::new().await.login_admin().await;

	let media = upload_png(&env).await;

	let response = env.app.get("/admin/media?kind=image").await;
	let body = response.json::<ApiResponse<Vec<MediaResponse>>>();

	assert_eq!(body.data.len(), 1);
	assert_eq!(body.meta.map(|m| m.total), Some(1));

	let response = env.app.get("/admin/media?kind=video").await;

	assert!(response.json::<ApiResponse<Vec<MediaResponse>>>().data.is_empty());

	let update =
		UpdateMediaRequest { alt_text: Some("Company logo".to_string()) };

	let response = env
		.app
		.patch(&format!("/admin/media/{}", media.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<ApiResponse<MediaResponse>>().data.alt_text.as_deref(),
		Some("Company logo")
	);

	let response = env.app.delete(&format!("/admin/media/{}", media.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env.app.get(&format!("/admin/media/{}", media.id)).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feature_icon_links_to_media() {
	let env = TestEnv::new().await.login_admin().await;

	let media = upload_png(&env).await;

	let request = CreateFeatureRequest {
		icon_id:      Some(media.id),
		sort_order:   0,
		is_active:    true,
		translations: Translations::from([(
			Locale::Id,
			FeatureFields {
				title:       "Cepat".to_string(),
				description: "Sangat cepat".to_string(),
			},
		)]),
	};

	let response = env.app.post("/admin/features").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response = env.app.get("/features").await;
	let body = response.json::<ApiResponse<Vec<FeatureResponse>>>().data;

	let icon = body[0].icon.as_ref().unwrap();

	assert_eq!(icon.id, media.id);
	assert_eq!(icon.url, media.url);
	assert_eq!(icon.alt_text.as_deref(), Some("Logo"));
}
