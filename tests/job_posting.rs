use axum::http::StatusCode;
use chrono::{Duration, NaiveDateTime, Utc};
use db::{EmploymentType, Locale};
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::job_posting::{
	CreateJobPostingRequest,
	JobPostingAdminResponse,
	JobPostingResponse,
	UpdateJobPostingRequest,
};
use landing_cms::schemas::line_item::CreateLineItemRequest;
use primitives::{JobPostingFields, LineItemFields};
use translation::Translations;

mod common;

use common::TestEnv;

fn create_request(
	title: &str,
	closes_at: Option<NaiveDateTime>,
) -> CreateJobPostingRequest {
	CreateJobPostingRequest {
		department: "Engineering".to_string(),
		location: "Jakarta".to_string(),
		employment_type: EmploymentType::FullTime,
		closes_at,
		sort_order: 0,
		is_active: true,
		translations: Translations::from([(
			Locale::Id,
			JobPostingFields {
				title:       title.to_string(),
				summary:     "Bergabunglah dengan tim kami".to_string(),
				description: "Deskripsi lengkap".to_string(),
			},
		)]),
		requirements: vec![CreateLineItemRequest {
			sort_order:   0,
			translations: Translations::from([(
				Locale::Id,
				LineItemFields { content: "Menguasai Rust".to_string() },
			)]),
		}],
		responsibilities: vec![],
	}
}

async fn create_posting(
	env: &TestEnv,
	request: &CreateJobPostingRequest,
) -> JobPostingAdminResponse {
	let response = env.app.post("/admin/job-postings").json(request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	response.json::<ApiResponse<JobPostingAdminResponse>>().data
}

#[tokio::test(flavor = "multi_thread")]
async fn test_closed_posting_is_hidden_from_public_list() {
	let env = TestEnv::new().await.login_admin().await;

	let now = Utc::now().naive_utc();

	let open = create_posting(
		&env,
		&create_request("Backend Engineer", Some(now + Duration::days(7))),
	)
	.await;
	let closed = create_posting(
		&env,
		&create_request("Frontend Engineer", Some(now - Duration::days(1))),
	)
	.await;
	create_posting(&env, &create_request("Designer", None)).await;

	let response = env.app.get("/job-postings").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<Vec<JobPostingResponse>>>().data;
	let ids: Vec<_> = body.iter().map(|p| p.id).collect();

	assert_eq!(body.len(), 2);
	assert!(ids.contains(&open.id));
	assert!(!ids.contains(&closed.id));

	let response = env.app.get("/admin/job-postings").await;
	let body = response.json::<ApiResponse<Vec<JobPostingAdminResponse>>>();

	assert_eq!(body.data.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_posting_gets_generated_code() {
	let env = TestEnv::new().await.login_admin().await;

	let posting =
		create_posting(&env, &create_request("Backend Engineer", None)).await;

	assert!(posting.code.starts_with("JOB-"));
	assert_eq!(posting.code.len(), "JOB-".len() + 8);
	assert_eq!(posting.requirements.len(), 1);

	let response = env.app.get(&format!("/job-postings/{}", posting.id)).await;
	let body = response.json::<ApiResponse<JobPostingResponse>>().data;

	assert_eq!(body.code, posting.code);
	assert_eq!(body.requirements[0].fields.content, "Menguasai Rust");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_and_delete_posting() {
	let env = TestEnv::new().await.login_editor().await;

	let posting =
		create_posting(&env, &create_request("Backend Engineer", None)).await;

	let closes_at = Utc::now().naive_utc() - Duration::days(1);
	let update = UpdateJobPostingRequest {
		location: Some("Bandung".to_string()),
		closes_at: Some(Some(closes_at)),
		translations: Translations::from([(
			Locale::En,
			JobPostingFields {
				title:       "Backend Engineer".to_string(),
				summary:     "Join our team".to_string(),
				description: "Full description".to_string(),
			},
		)]),
		..Default::default()
	};

	let response = env
		.app
		.patch(&format!("/admin/job-postings/{}", posting.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let updated = response.json::<ApiResponse<JobPostingAdminResponse>>().data;

	assert_eq!(updated.location, "Bandung");
	assert_eq!(updated.translations.len(), 2);
	assert_eq!(updated.requirements.len(), 1);

	let response = env.app.get("/job-postings").await;

	assert!(
		response
			.json::<ApiResponse<Vec<JobPostingResponse>>>()
			.data
			.is_empty()
	);

	let response =
		env.app.delete(&format!("/admin/job-postings/{}", posting.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response =
		env.app.get(&format!("/job-postings/{}", posting.id)).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env
		.app
		.patch(&format!("/admin/job-postings/{}", posting.id))
		.json(&update)
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
