use axum::http::StatusCode;
use db::Locale;
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::testimonial::{
	CreateTestimonialRequest,
	TestimonialAdminResponse,
	TestimonialResponse,
	UpdateTestimonialRequest,
};
use primitives::TestimonialFields;
use serde_json::Value;
use translation::Translations;

mod common;

use common::TestEnv;

fn create_request(
	translations: Translations<TestimonialFields>,
) -> CreateTestimonialRequest {
	CreateTestimonialRequest {
		author_name: "Budi Santoso".to_string(),
		author_role: Some("CTO".to_string()),
		company: Some("Maju Jaya".to_string()),
		rating: 5,
		avatar_id: None,
		sort_order: 0,
		is_active: true,
		translations,
	}
}

fn quote(text: &str) -> TestimonialFields {
	TestimonialFields { quote: text.to_string() }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_testimonial_falls_back_to_default_locale() {
	let env = TestEnv::new().await.login_admin().await;

	let request = create_request(Translations::from([(
		Locale::Id,
		quote("Sangat membantu"),
	)]));

	let response = env.app.post("/admin/testimonials").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let response = env.app.get("/testimonials?locale=en").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<Vec<TestimonialResponse>>>();

	assert_eq!(body.data.len(), 1);
	assert_eq!(body.data[0].fields.quote, "Sangat membantu");
	assert_eq!(body.data[0].author_name, "Budi Santoso");
	assert!(body.meta.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_testimonial_with_invalid_rating() {
	let env = TestEnv::new().await.login_editor().await;

	let mut request =
		create_request(Translations::from([(Locale::Id, quote("Bagus"))]));
	request.rating = 6;

	let response = env.app.post("/admin/testimonials").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	assert!(response.json::<Value>()["errors"]["rating"].is_array());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_editor_manages_testimonials() {
	let env = TestEnv::new().await.login_editor().await;

	let request = create_request(Translations::from([
		(Locale::Id, quote("Bagus")),
		(Locale::En, quote("Great")),
	]));

	let response = env.app.post("/admin/testimonials").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<ApiResponse<TestimonialAdminResponse>>().data;

	assert_eq!(body.translations[&Locale::En].quote, "Great");
	assert_eq!(
		body.audit.created_by.map(|u| u.username),
		Some("editor".into())
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_missing_testimonial_reports_the_testimonial() {
	let env = TestEnv::new().await.login_admin().await;

	let update = UpdateTestimonialRequest {
		avatar_id: Some(Some(4242)),
		..Default::default()
	};

	let response =
		env.app.patch("/admin/testimonials/9999").json(&update).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
	assert_eq!(
		response.json::<Value>()["message"],
		"not found - testimonial with id 9999"
	);

	let response = env
		.app
		.post("/admin/testimonials")
		.json(&create_request(Translations::from([(
			Locale::Id,
			quote("Bagus"),
		)])))
		.await;
	let testimonial =
		response.json::<ApiResponse<TestimonialAdminResponse>>().data;

	let response = env
		.app
		.patch(&format!("/admin/testimonials/{}", testimonial.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
	assert_eq!(
		response.json::<Value>()["message"],
		"not found - media with id 4242"
	);

	let response = env
		.app
		.get(&format!("/admin/testimonials/{}", testimonial.id))
		.await;
	let body = response.json::<ApiResponse<TestimonialAdminResponse>>().data;

	assert!(body.avatar.is_none());
}
