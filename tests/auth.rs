use axum::http::StatusCode;
use db::Role;
use landing_cms::schemas::auth::LoginRequest;
use landing_cms::schemas::envelope::ApiResponse;
use landing_cms::schemas::user::{
	CreateUserRequest,
	UpdateUserRequest,
	UserResponse,
};
use serde_json::Value;

mod common;

use common::{PASSWORD, TestEnv};

fn login_request(identifier: &str, password: &str) -> LoginRequest {
	LoginRequest {
		identifier: identifier.to_string(),
		password:   password.to_string(),
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_username() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&login_request("admin", PASSWORD))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ApiResponse<UserResponse>>().data;

	assert_eq!(body.username, "admin");
	assert_eq!(body.role, Role::Admin);
	assert!(body.last_login_at.is_some());

	let response = env.app.get("/auth/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<ApiResponse<UserResponse>>().data.id, body.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_email() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&login_request("Editor@Example.com", PASSWORD))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<ApiResponse<UserResponse>>().data.role,
		Role::Editor
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_wrong_password() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&login_request("admin", "not-the-password"))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
	assert_eq!(response.json::<Value>()["success"], false);

	let response = env.app.get("/auth/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_unknown_user() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/auth/login")
		.json(&login_request("nobody", PASSWORD))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_routes_require_login() {
	let env = TestEnv::new().await;

	let response = env.app.get("/admin/features").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

	let response = env.app.get("/features").await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_editor_cannot_manage_users() {
	let env = TestEnv::new().await.login_editor().await;

	let response = env.app.get("/admin/users").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env.app.get("/admin/features").await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_disabled_user_cannot_login() {
	let env = TestEnv::new().await.login_admin().await;

	let request = CreateUserRequest {
		username:  "writer".to_string(),
		email:     "writer@example.com".to_string(),
		password:  PASSWORD.to_string(),
		role:      Role::Editor,
		is_active: true,
	};

	let response = env.app.post("/admin/users").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let user = response.json::<ApiResponse<UserResponse>>().data;

	let update =
		UpdateUserRequest { is_active: Some(false), ..Default::default() };

	let response =
		env.app.patch(&format!("/admin/users/{}", user.id)).json(&update).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert!(!response.json::<ApiResponse<UserResponse>>().data.is_active);

	let response = env
		.app
		.post("/auth/login")
		.json(&login_request("writer", PASSWORD))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_username() {
	let env = TestEnv::new().await.login_admin().await;

	let request = CreateUserRequest {
		username:  "editor".to_string(),
		email:     "other@example.com".to_string(),
		password:  PASSWORD.to_string(),
		role:      Role::Editor,
		is_active: true,
	};

	let response = env.app.post("/admin/users").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}
