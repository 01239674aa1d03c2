use axum::http::StatusCode;
use db::{BillingPeriod, Locale};
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::pricing_plan::{
	CreatePricingPlanRequest,
	PricingPlanAdminResponse,
	PricingPlanResponse,
	UpdatePricingPlanRequest,
};
use primitives::PricingPlanFields;
use serde_json::Value;
use translation::Translations;

mod common;

use common::TestEnv;

fn create_request(currency: &str) -> CreatePricingPlanRequest {
	CreatePricingPlanRequest {
		price:          150_000,
		currency:       currency.to_string(),
		billing_period: BillingPeriod::Monthly,
		is_popular:     true,
		sort_order:     0,
		is_active:      true,
		translations:   Translations::from([
			(
				Locale::Id,
				PricingPlanFields {
					name:        "Pro".to_string(),
					description: "Untuk tim yang berkembang".to_string(),
					cta_label:   Some("Mulai".to_string()),
				},
			),
			(
				Locale::En,
				PricingPlanFields {
					name:        "Pro".to_string(),
					description: "For growing teams".to_string(),
					cta_label:   None,
				},
			),
		]),
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_pricing_plan() {
	let env = TestEnv::new().await.login_admin().await;

	let response =
		env.app.post("/admin/pricing-plans").json(&create_request("idr")).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let plan = response.json::<ApiResponse<PricingPlanAdminResponse>>().data;

	assert_eq!(plan.currency, "IDR");
	assert!(plan.code.starts_with("PLN-"));

	let response = env.app.get("/pricing-plans?locale=en").await;
	let body = response.json::<ApiResponse<Vec<PricingPlanResponse>>>().data;

	assert_eq!(body.len(), 1);
	assert_eq!(body[0].fields.description, "For growing teams");
	assert_eq!(body[0].fields.cta_label, None);
	assert_eq!(body[0].price, 150_000);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_pricing_plan_invalid_currency() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env
		.app
		.post("/admin/pricing-plans")
		.json(&create_request("rupiah"))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	assert!(response.json::<Value>()["errors"]["currency"].is_array());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_and_delete_pricing_plan() {
	let env = TestEnv::new().await.login_admin().await;

	let response =
		env.app.post("/admin/pricing-plans").json(&create_request("idr")).await;
	let plan = response.json::<ApiResponse<PricingPlanAdminResponse>>().data;

	let update = UpdatePricingPlanRequest {
		price: Some(200_000),
		currency: Some("usd".to_string()),
		..Default::default()
	};

	let response = env
		.app
		.patch(&format!("/admin/pricing-plans/{}", plan.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let updated = response.json::<ApiResponse<PricingPlanAdminResponse>>().data;

	assert_eq!(updated.price, 200_000);
	assert_eq!(updated.currency, "USD");
	assert_eq!(updated.code, plan.code);
	assert_eq!(
		updated.translations[&Locale::En].description,
		"For growing teams"
	);

	let response =
		env.app.delete(&format!("/admin/pricing-plans/{}", plan.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env.app.get("/pricing-plans").await;

	assert!(
		response
			.json::<ApiResponse<Vec<PricingPlanResponse>>>()
			.data
			.is_empty()
	);

	let response = env
		.app
		.patch(&format!("/admin/pricing-plans/{}", plan.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
