use std::path::PathBuf;

use axum::http::StatusCode;
use axum_extra::extract::cookie::Key;
use axum_test::TestServer;
use db::{Locale, Role};
use landing_cms::schemas::auth::LoginRequest;
use landing_cms::{AppState, Config, routes, run_migrations};
use tempfile::TempDir;
use tracing::Level;
use url::Url;
use user::NewUser;

pub const ADMIN_USERNAME: &str = "admin";
pub const EDITOR_USERNAME: &str = "editor";
pub const PASSWORD: &str = "correct-horse";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:    TestServer,
	pub config: Config,
	_dir:       TempDir,
}

fn test_config(dir: &TempDir) -> Config {
	Config {
		database_url:           dir.path().join("cms.db").display().to_string(),
		database_pool_size:     1,
		production:             false,
		bind_address:           "127.0.0.1:0".to_string(),
		request_timeout:        std::time::Duration::from_secs(10),
		cors_origin:            None,
		log_level:              Level::DEBUG,
		public_url:             Url::parse("http://localhost:8000").unwrap(),
		upload_dir:             dir.path().join("uploads"),
		max_upload_bytes:       64 * 1024,
		default_locale:         Locale::Id,
		access_cookie_name:     "access_token".to_string(),
		access_cookie_lifetime: time::Duration::minutes(5),
		cookie_key_file:        PathBuf::from("/dev/null"),
	}
}

impl TestEnv {
	/// Get a test environment backed by a fresh database in a temporary
	/// directory
	///
	/// # Panics
	/// Panics if setting up the database or building the test server fails
	pub async fn new() -> Self {
		let dir = TempDir::new().unwrap();
		let config = test_config(&dir);

		std::fs::create_dir_all(&config.upload_dir).unwrap();

		let pool = config.create_database_pool();
		run_migrations(&pool).await;

		{
			let conn = pool.get().await.unwrap();

			for (username, role) in
				[(ADMIN_USERNAME, Role::Admin), (EDITOR_USERNAME, Role::Editor)]
			{
				NewUser {
					username:  username.to_string(),
					email:     format!("{username}@example.com"),
					password:  PASSWORD.to_string(),
					role,
					is_active: true,
				}
				.insert(&conn)
				.await
				.unwrap();
			}
		}

		let state = AppState {
			config:         config.clone(),
			database_pool:  pool,
			cookie_jar_key: Key::from(&[0u8; 64]),
		};
		let app = routes::get_app_router(state);

		let test_server =
			TestServer::builder().save_cookies().build(app).unwrap();

		TestEnv { app: test_server, config, _dir: dir }
	}

	/// Log in as the given user, keeping the session cookie for every
	/// following request
	///
	/// # Panics
	/// Panics if logging in fails
	pub async fn login(self, identifier: &str) -> Self {
		let response = self
			.app
			.post("/auth/login")
			.json(&LoginRequest {
				identifier: identifier.to_string(),
				password:   PASSWORD.to_string(),
			})
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);

		self
	}

	#[allow(dead_code)]
	pub async fn login_admin(self) -> Self { self.login(ADMIN_USERNAME).await }

	#[allow(dead_code)]
	pub async fn login_editor(self) -> Self {
		self.login(EDITOR_USERNAME).await
	}
}
