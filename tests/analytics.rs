use analytics::{LocaleStats, PageStats, ReferrerStats, Summary, TrackedView};
use axum::http::StatusCode;
use db::Locale;
use landing_cms::schemas::analytics::{DurationRequest, TrackRequest};
use landing_cms::schemas::envelope::ApiResponse;

mod common;

use common::TestEnv;

fn track_request(
	visitor_key: &str,
	path: &str,
	referrer: Option<&str>,
) -> TrackRequest {
	TrackRequest {
		visitor_key: visitor_key.to_string(),
		path:        path.to_string(),
		referrer:    referrer.map(ToString::to_string),
	}
}

async fn track(
	env: &TestEnv,
	uri: &str,
	request: &TrackRequest,
) -> TrackedView {
	let response = env.app.post(uri).json(request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ApiResponse<TrackedView>>().data
}

#[tokio::test(flavor = "multi_thread")]
async fn test_track_and_summarize_visits() {
	let env = TestEnv::new().await;

	let first = track(
		&env,
		"/analytics/track?locale=en",
		&track_request("visitor-a", "/pricing", Some("https://google.com")),
	)
	.await;
	let second = track(
		&env,
		"/analytics/track",
		&track_request("visitor-a", "/", Some("")),
	)
	.await;
	track(
		&env,
		"/analytics/track",
		&track_request("visitor-b", "/pricing", None),
	)
	.await;

	assert_eq!(first.visitor_id, second.visitor_id);
	assert_ne!(first.page_view_id, second.page_view_id);

	for (view, seconds) in [(first, 30), (second, 10)] {
		let response = env
			.app
			.patch(&format!("/analytics/page-views/{}", view.page_view_id))
			.json(&DurationRequest { duration_seconds: seconds })
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);
	}

	let env = env.login_editor().await;

	let response = env.app.get("/admin/analytics/summary").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let summary = response.json::<ApiResponse<Summary>>().data;

	assert_eq!(summary.page_views, 3);
	assert_eq!(summary.unique_visitors, 2);
	assert_eq!(summary.new_visitors, 2);
	assert_eq!(summary.average_duration, Some(20.0));

	let response = env.app.get("/admin/analytics/pages?limit=1").await;
	let pages = response.json::<ApiResponse<Vec<PageStats>>>().data;

	assert_eq!(pages.len(), 1);
	assert_eq!(pages[0].path, "/pricing");
	assert_eq!(pages[0].views, 2);

	let response = env.app.get("/admin/analytics/locales").await;
	let locales = response.json::<ApiResponse<Vec<LocaleStats>>>().data;

	let english = locales.iter().find(|l| l.locale == Locale::En).unwrap();

	assert_eq!(english.views, 1);

	let response = env.app.get("/admin/analytics/referrers").await;
	let referrers = response.json::<ApiResponse<Vec<ReferrerStats>>>().data;

	assert_eq!(referrers.len(), 1);
	assert_eq!(referrers[0].referrer, "https://google.com");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duration_out_of_range() {
	let env = TestEnv::new().await;

	let view =
		track(&env, "/analytics/track", &track_request("visitor-a", "/", None))
			.await;

	let response = env
		.app
		.patch(&format!("/analytics/page-views/{}", view.page_view_id))
		.json(&DurationRequest { duration_seconds: -5 })
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let response = env
		.app
		.patch("/analytics/page-views/9999")
		.json(&DurationRequest { duration_seconds: 5 })
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reports_require_login() {
	let env = TestEnv::new().await;

	let response = env.app.get("/admin/analytics/summary").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reversed_report_range() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env
		.app
		.get("/admin/analytics/daily?from=2026-03-10&to=2026-03-01")
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
