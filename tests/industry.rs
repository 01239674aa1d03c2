use axum::http::StatusCode;
use db::Locale;
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::industry::{
	CreateIndustryRequest,
	IndustryAdminResponse,
	IndustryResponse,
};
use landing_cms::schemas::line_item::{
	CreateLineItemRequest,
	LineItemAdminResponse,
	UpdateLineItemRequest,
};
use primitives::{IndustryFields, LineItemFields};
use serde_json::Value;
use translation::Translations;

mod common;

use common::TestEnv;

fn item(
	sort_order: i32,
	translations: &[(Locale, &str)],
) -> CreateLineItemRequest {
	CreateLineItemRequest {
		sort_order,
		translations: translations
			.iter()
			.map(|(locale, content)| {
				(*locale, LineItemFields { content: (*content).to_string() })
			})
			.collect(),
	}
}

fn create_request(slug: &str) -> CreateIndustryRequest {
	CreateIndustryRequest {
		slug:         slug.to_string(),
		image_id:     None,
		sort_order:   0,
		is_active:    true,
		translations: Translations::from([
			(
				Locale::Id,
				IndustryFields {
					name:        "Ritel".to_string(),
					description: "Toko dan gerai".to_string(),
				},
			),
			(
				Locale::En,
				IndustryFields {
					name:        "Retail".to_string(),
					description: "Shops and outlets".to_string(),
				},
			),
		]),
		problems:     vec![
			item(1, &[(Locale::Id, "Stok tidak akurat")]),
			item(0, &[
				(Locale::Id, "Antrean panjang"),
				(Locale::En, "Long queues"),
			]),
		],
		solutions:    vec![item(0, &[(Locale::Id, "Kasir cepat")])],
	}
}

async fn create_industry(env: &TestEnv) -> IndustryAdminResponse {
	let response =
		env.app.post("/admin/industries").json(&create_request("retail")).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ApiResponse<IndustryAdminResponse>>().data
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_industry_with_line_items() {
	let env = TestEnv::new().await.login_admin().await;

	let industry = create_industry(&env).await;

	assert_eq!(industry.problems.len(), 2);
	assert_eq!(industry.solutions.len(), 1);

	let response =
		env.app.get(&format!("/industries/{}?locale=en", industry.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<IndustryResponse>>().data;

	assert_eq!(body.fields.name, "Retail");

	let problems: Vec<_> =
		body.problems.iter().map(|p| p.fields.content.as_str()).collect();

	assert_eq!(problems, ["Long queues", "Stok tidak akurat"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_line_item_rejects_whole_industry() {
	let env = TestEnv::new().await.login_admin().await;

	let mut request = create_request("retail");
	request.problems.push(item(2, &[(Locale::En, "Only english")]));

	let response = env.app.post("/admin/industries").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let errors = &response.json::<Value>()["errors"];

	assert!(errors["problems.2.translations.id"].is_array());

	let response = env.app.get("/admin/industries").await;

	assert!(
		response
			.json::<ApiResponse<Vec<IndustryAdminResponse>>>()
			.data
			.is_empty()
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_line_item_crud() {
	let env = TestEnv::new().await.login_editor().await;

	let industry = create_industry(&env).await;
	let base = format!("/admin/industries/{}/items/solutions", industry.id);

	let response = env
		.app
		.post(&base)
		.json(&item(1, &[(Locale::Id, "Laporan harian")]))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let created = response.json::<ApiResponse<LineItemAdminResponse>>().data;

	let update = UpdateLineItemRequest {
		sort_order:   Some(5),
		translations: Translations::from([(
			Locale::En,
			LineItemFields { content: "Daily reports".to_string() },
		)]),
	};

	let response =
		env.app.patch(&format!("{base}/{}", created.id)).json(&update).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let updated = response.json::<ApiResponse<LineItemAdminResponse>>().data;

	assert_eq!(updated.sort_order, 5);
	assert_eq!(updated.translations[&Locale::Id].content, "Laporan harian");
	assert_eq!(updated.translations[&Locale::En].content, "Daily reports");

	let response = env.app.delete(&format!("{base}/{}", created.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env.app.get(&format!("{base}/{}", created.id)).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response =
		env.app.get(&format!("/admin/industries/{}", industry.id)).await;
	let body = response.json::<ApiResponse<IndustryAdminResponse>>().data;

	assert_eq!(body.solutions.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_line_item_of_other_list() {
	let env = TestEnv::new().await.login_admin().await;

	let industry = create_industry(&env).await;
	let problem = industry.problems[0].id;

	let response = env
		.app
		.get(&format!(
			"/admin/industries/{}/items/solutions/{problem}",
			industry.id
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env
		.app
		.get(&format!(
			"/admin/industries/{}/items/requirements/{problem}",
			industry.id
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_industry_slug() {
	let env = TestEnv::new().await.login_admin().await;

	create_industry(&env).await;

	let response =
		env.app.post("/admin/industries").json(&create_request("retail")).await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_line_items_of_deleted_industry_are_frozen() {
	let env = TestEnv::new().await.login_admin().await;

	let industry = create_industry(&env).await;
	let item_path = format!(
		"/admin/industries/{}/items/problems/{}",
		industry.id, industry.problems[0].id
	);

	let response =
		env.app.delete(&format!("/admin/industries/{}", industry.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env.app.get(&item_path).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let update = UpdateLineItemRequest {
		sort_order:   Some(9),
		translations: Translations::new(),
	};

	let response = env.app.patch(&item_path).json(&update).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env.app.delete(&item_path).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env
		.app
		.post(&format!("/admin/industries/{}/restore", industry.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<IndustryAdminResponse>>().data;

	let ids = |items: &[LineItemAdminResponse]| {
		items.iter().map(|i| i.id).collect::<Vec<_>>()
	};

	assert_eq!(body.problems.len(), 2);
	assert_eq!(ids(&body.problems), ids(&industry.problems));
	assert_eq!(body.problems[0].sort_order, industry.problems[0].sort_order);
}
