use axum::http::StatusCode;
use db::Locale;
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::faq::{
	CreateFaqCategoryRequest,
	CreateFaqRequest,
	FaqAdminResponse,
	FaqCategoryAdminResponse,
	FaqCategoryResponse,
	FaqResponse,
	UpdateFaqRequest,
};
use primitives::{FaqCategoryFields, FaqFields};
use translation::Translations;

mod common;

use common::TestEnv;

async fn create_category(env: &TestEnv, slug: &str, name: &str) -> i32 {
	let request = CreateFaqCategoryRequest {
		slug:         slug.to_string(),
		sort_order:   0,
		is_active:    true,
		translations: Translations::from([(
			Locale::Id,
			FaqCategoryFields { name: name.to_string() },
		)]),
	};

	let response = env.app.post("/admin/faq-categories").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ApiResponse<FaqCategoryAdminResponse>>().data.id
}

async fn create_faq(
	env: &TestEnv,
	category_id: Option<i32>,
	question: &str,
) -> i32 {
	let request = CreateFaqRequest {
		category_id,
		sort_order: 0,
		is_active: true,
		translations: Translations::from([(
			Locale::Id,
			FaqFields {
				question: question.to_string(),
				answer:   "Jawaban".to_string(),
			},
		)]),
	};

	let response = env.app.post("/admin/faqs").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ApiResponse<FaqAdminResponse>>().data.id
}

#[tokio::test(flavor = "multi_thread")]
async fn test_filter_faqs_by_category() {
	let env = TestEnv::new().await.login_admin().await;

	let billing = create_category(&env, "billing", "Tagihan").await;
	let general = create_category(&env, "general", "Umum").await;

	create_faq(&env, Some(billing), "Bagaimana cara membayar?").await;
	create_faq(&env, Some(general), "Apa itu produk ini?").await;
	create_faq(&env, None, "Tanpa kategori?").await;

	let response = env.app.get("/faqs").await;
	let body = response.json::<ApiResponse<Vec<FaqResponse>>>();

	assert_eq!(body.data.len(), 3);

	let response = env.app.get("/faqs?category=billing").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<Vec<FaqResponse>>>();

	assert_eq!(body.data.len(), 1);
	assert_eq!(body.data[0].fields.question, "Bagaimana cara membayar?");

	let category = body.data[0].category.as_ref().unwrap();

	assert_eq!(category.slug, "billing");
	assert_eq!(category.fields.name, "Tagihan");

	let response = env.app.get("/faqs?category=missing").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(response.json::<ApiResponse<Vec<FaqResponse>>>().data.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_category_slug() {
	let env = TestEnv::new().await.login_admin().await;

	create_category(&env, "billing", "Tagihan").await;

	let request = CreateFaqCategoryRequest {
		slug:         "billing".to_string(),
		sort_order:   1,
		is_active:    true,
		translations: Translations::from([(
			Locale::Id,
			FaqCategoryFields { name: "Tagihan lagi".to_string() },
		)]),
	};

	let response = env.app.post("/admin/faq-categories").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);

	let response = env.app.get("/faq-categories").await;
	let body = response.json::<ApiResponse<Vec<FaqCategoryResponse>>>();

	assert_eq!(body.data.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_move_faq_out_of_category() {
	let env = TestEnv::new().await.login_admin().await;

	let billing = create_category(&env, "billing", "Tagihan").await;
	let id = create_faq(&env, Some(billing), "Bagaimana cara membayar?").await;

	let update =
		UpdateFaqRequest { category_id: Some(None), ..Default::default() };

	let response =
		env.app.patch(&format!("/admin/faqs/{id}")).json(&update).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<FaqAdminResponse>>().data;

	assert!(body.category.is_none());

	let response = env.app.get("/faqs?category=billing").await;

	assert!(response.json::<ApiResponse<Vec<FaqResponse>>>().data.is_empty());
}
