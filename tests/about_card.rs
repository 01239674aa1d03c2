use axum::http::StatusCode;
use db::Locale;
use landing_cms::schemas::about_card::{
	AboutCardAdminResponse,
	AboutCardResponse,
	CreateAboutCardRequest,
	UpdateAboutCardRequest,
};
use landing_cms::schemas::envelope::ApiResponse;
use primitives::AboutCardFields;
use serde_json::Value;
use translation::Translations;

mod common;

use common::TestEnv;

fn fields(title: &str, description: &str) -> AboutCardFields {
	AboutCardFields {
		title:       title.to_string(),
		description: description.to_string(),
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn test_about_card_lifecycle() {
	let env = TestEnv::new().await.login_editor().await;

	let request = CreateAboutCardRequest {
		image_id:     None,
		sort_order:   1,
		is_active:    true,
		translations: Translations::from([(
			Locale::Id,
			fields("Misi kami", "Membantu bisnis tumbuh"),
		)]),
	};

	let response = env.app.post("/admin/about-cards").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let card = response.json::<ApiResponse<AboutCardAdminResponse>>().data;

	assert_eq!(card.translations.len(), 1);

	let update = UpdateAboutCardRequest {
		sort_order: Some(2),
		translations: Translations::from([(
			Locale::En,
			fields("Our mission", "Helping businesses grow"),
		)]),
		..Default::default()
	};

	let response = env
		.app
		.patch(&format!("/admin/about-cards/{}", card.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let updated = response.json::<ApiResponse<AboutCardAdminResponse>>().data;

	assert_eq!(updated.sort_order, 2);
	assert_eq!(updated.translations[&Locale::Id].title, "Misi kami");
	assert_eq!(updated.translations[&Locale::En].title, "Our mission");

	let response = env.app.get("/about-cards?locale=en").await;
	let body = response.json::<ApiResponse<Vec<AboutCardResponse>>>().data;

	assert_eq!(body.len(), 1);
	assert_eq!(body[0].fields.description, "Helping businesses grow");

	let response =
		env.app.delete(&format!("/admin/about-cards/{}", card.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Value>()["data"], Value::Null);

	let response = env.app.get(&format!("/about-cards/{}", card.id)).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env
		.app
		.patch(&format!("/admin/about-cards/{}", card.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_about_card_with_missing_image() {
	let env = TestEnv::new().await.login_admin().await;

	let request = CreateAboutCardRequest {
		image_id:     Some(9999),
		sort_order:   0,
		is_active:    true,
		translations: Translations::from([(
			Locale::Id,
			fields("Visi", "Menjadi yang terdepan"),
		)]),
	};

	let response = env.app.post("/admin/about-cards").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env.app.get("/admin/about-cards").await;

	assert!(
		response
			.json::<ApiResponse<Vec<AboutCardAdminResponse>>>()
			.data
			.is_empty()
	);
}
