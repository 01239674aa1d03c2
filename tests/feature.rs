use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::{HeaderValue, StatusCode};
use db::Locale;
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::feature::{
	CreateFeatureRequest,
	FeatureAdminResponse,
	FeatureResponse,
	UpdateFeatureRequest,
};
use primitives::FeatureFields;
use serde_json::Value;
use translation::Translations;

mod common;

use common::TestEnv;

fn fields(title: &str) -> FeatureFields {
	FeatureFields {
		title:       title.to_string(),
		description: format!("{title} description"),
	}
}

fn create_request(
	translations: Translations<FeatureFields>,
) -> CreateFeatureRequest {
	CreateFeatureRequest {
		icon_id: None,
		sort_order: 0,
		is_active: true,
		translations,
	}
}

async fn create_feature(env: &TestEnv, request: &CreateFeatureRequest) -> i32 {
	let response = env.app.post("/admin/features").json(request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ApiResponse<FeatureAdminResponse>>().data.id
}

#[tokio::test(flavor = "multi_thread")]
async fn test_public_read_uses_requested_locale() {
	let env = TestEnv::new().await.login_admin().await;

	let id = create_feature(
		&env,
		&create_request(Translations::from([
			(Locale::Id, fields("Cepat")),
			(Locale::En, fields("Fast")),
		])),
	)
	.await;

	let response = env.app.get(&format!("/features/{id}?locale=en")).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<FeatureResponse>>();

	assert!(body.success);
	assert_eq!(body.data.fields.title, "Fast");

	let response = env
		.app
		.get(&format!("/features/{id}"))
		.add_header(ACCEPT_LANGUAGE, HeaderValue::from_static("id-ID,id;q=0.9"))
		.await;

	let body = response.json::<ApiResponse<FeatureResponse>>();

	assert_eq!(body.data.fields.title, "Cepat");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_public_read_falls_back_to_default_locale() {
	let env = TestEnv::new().await.login_admin().await;

	let id = create_feature(
		&env,
		&create_request(Translations::from([(Locale::Id, fields("Aman"))])),
	)
	.await;

	let response = env.app.get(&format!("/features/{id}?locale=en")).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<FeatureResponse>>();

	assert_eq!(body.data.fields.title, "Aman");
	assert_eq!(body.data.fields.description, "Aman description");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_read_returns_every_translation() {
	let env = TestEnv::new().await.login_admin().await;

	let id = create_feature(
		&env,
		&create_request(Translations::from([
			(Locale::Id, fields("Cepat")),
			(Locale::En, fields("Fast")),
		])),
	)
	.await;

	let response = env.app.get(&format!("/admin/features/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<FeatureAdminResponse>>().data;

	assert_eq!(body.translations.len(), 2);
	assert_eq!(body.translations[&Locale::Id].title, "Cepat");
	assert_eq!(body.translations[&Locale::En].title, "Fast");
	assert_eq!(body.audit.created_by.map(|u| u.username), Some("admin".into()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_feature_without_default_locale() {
	let env = TestEnv::new().await.login_admin().await;

	let request =
		create_request(Translations::from([(Locale::En, fields("Fast"))]));

	let response = env.app.post("/admin/features").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<Value>();

	assert_eq!(body["success"], false);
	assert!(body["errors"]["translations.id"].is_array());

	let response = env.app.get("/admin/features").await;
	let body = response.json::<ApiResponse<Vec<FeatureAdminResponse>>>();

	assert!(body.data.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_feature_reports_every_invalid_field() {
	let env = TestEnv::new().await.login_admin().await;

	let mut request = create_request(Translations::from([
		(Locale::Id, fields("")),
		(Locale::En, fields("Fast")),
	]));
	request.sort_order = -1;

	let response = env.app.post("/admin/features").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let errors = &response.json::<Value>()["errors"];

	assert!(errors["sort_order"].is_array());
	assert!(errors["translations.id.title"].is_array());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_feature_translation() {
	let env = TestEnv::new().await.login_admin().await;

	let id = create_feature(
		&env,
		&create_request(Translations::from([(Locale::Id, fields("Cepat"))])),
	)
	.await;

	let update = UpdateFeatureRequest {
		sort_order: Some(3),
		translations: Translations::from([(Locale::En, fields("Fast"))]),
		..Default::default()
	};

	let response =
		env.app.patch(&format!("/admin/features/{id}")).json(&update).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<FeatureAdminResponse>>().data;

	assert_eq!(body.sort_order, 3);
	assert_eq!(body.translations[&Locale::Id].title, "Cepat");
	assert_eq!(body.translations[&Locale::En].title, "Fast");
	assert!(body.audit.updated_by.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_inactive_feature_is_hidden_from_public() {
	let env = TestEnv::new().await.login_admin().await;

	let mut request =
		create_request(Translations::from([(Locale::Id, fields("Draf"))]));
	request.is_active = false;

	let id = create_feature(&env, &request).await;

	let response = env.app.get(&format!("/features/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env.app.get("/features").await;
	let body = response.json::<ApiResponse<Vec<FeatureResponse>>>();

	assert!(body.data.is_empty());

	let response = env.app.get("/admin/features").await;
	let body = response.json::<ApiResponse<Vec<FeatureAdminResponse>>>();

	assert_eq!(body.data.len(), 1);
	assert_eq!(body.meta.map(|m| m.total), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_and_restore_feature() {
	let env = TestEnv::new().await.login_admin().await;

	let id = create_feature(
		&env,
		&create_request(Translations::from([(Locale::Id, fields("Cepat"))])),
	)
	.await;

	let response = env.app.delete(&format!("/admin/features/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Value>()["data"], Value::Null);

	let response = env.app.get(&format!("/features/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response =
		env.app.get(&format!("/admin/features/{id}?trashed=true")).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<FeatureAdminResponse>>().data;

	assert!(body.audit.deleted_at.is_some());

	let response =
		env.app.post(&format!("/admin/features/{id}/restore")).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env.app.get(&format!("/features/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_deleted_feature() {
	let env = TestEnv::new().await.login_admin().await;

	let id = create_feature(
		&env,
		&create_request(Translations::from([(Locale::Id, fields("Cepat"))])),
	)
	.await;

	let response = env.app.delete(&format!("/admin/features/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let update = UpdateFeatureRequest {
		sort_order: Some(4),
		translations: Translations::from([(Locale::Id, fields("Lambat"))]),
		..Default::default()
	};

	let response =
		env.app.patch(&format!("/admin/features/{id}")).json(&update).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response =
		env.app.post(&format!("/admin/features/{id}/restore")).await;
	let body = response.json::<ApiResponse<FeatureAdminResponse>>().data;

	assert_eq!(body.sort_order, 0);
	assert_eq!(body.translations[&Locale::Id].title, "Cepat");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_missing_feature() {
	let env = TestEnv::new().await.login_admin().await;

	let update =
		UpdateFeatureRequest { sort_order: Some(1), ..Default::default() };

	let response = env.app.patch("/admin/features/9999").json(&update).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_missing_feature() {
	let env = TestEnv::new().await;

	let response = env.app.get("/features/9999").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
	assert_eq!(response.json::<Value>()["success"], false);
}
