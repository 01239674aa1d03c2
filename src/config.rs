use std::path::PathBuf;
use std::str::FromStr;

use common::DbPool;
use db::Locale;
use deadpool_diesel::sqlite::Manager;
use tracing::Level;
use url::Url;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url:       String,
	pub database_pool_size: usize,

	pub production:      bool,
	pub bind_address:    String,
	pub request_timeout: std::time::Duration,
	pub cors_origin:     Option<String>,
	pub log_level:       Level,

	/// Base url media links are built from
	pub public_url:       Url,
	pub upload_dir:       PathBuf,
	pub max_upload_bytes: usize,

	/// The locale every translatable entity must have, and the one public
	/// reads fall back to
	pub default_locale: Locale,

	pub access_cookie_name:     String,
	pub access_cookie_lifetime: time::Duration,
	pub cookie_key_file:        PathBuf,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	fn parse_env_var_or<T: FromStr>(var: &str, default: T) -> T {
		match std::env::var(var) {
			Ok(value) => {
				value.parse().unwrap_or_else(|_| {
					panic!("{var} has an invalid value '{value}'")
				})
			},
			Err(_) => default,
		}
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if a required environment variable is missing or any variable
	/// has an invalid value
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let database_pool_size = Self::parse_env_var_or("DATABASE_POOL_SIZE", 1);

		let production = Self::parse_env_var_or("PRODUCTION", false);
		let bind_address = Self::get_env_var_or("BIND_ADDRESS", "0.0.0.0:80");
		let request_timeout = std::time::Duration::from_secs(
			Self::parse_env_var_or("REQUEST_TIMEOUT_SECONDS", 10),
		);
		let cors_origin = std::env::var("CORS_ORIGIN").ok();
		let log_level = Self::parse_env_var_or("LOG_LEVEL", Level::INFO);

		let public_url = Self::get_env_var("PUBLIC_URL");
		let public_url = Url::parse(&public_url)
			.unwrap_or_else(|_| panic!("PUBLIC_URL '{public_url}' is not a url"));
		let upload_dir = PathBuf::from(Self::get_env_var_or("UPLOAD_DIR", "/mnt/files"));
		let max_upload_bytes =
			Self::parse_env_var_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024);

		let default_locale = Self::get_env_var_or("DEFAULT_LOCALE", "id");
		let default_locale = Locale::from_tag(&default_locale).unwrap_or_else(|| {
			panic!("DEFAULT_LOCALE '{default_locale}' is not a supported locale")
		});

		let access_cookie_name =
			Self::get_env_var_or("ACCESS_COOKIE_NAME", "access_token");
		let access_cookie_lifetime = time::Duration::minutes(
			Self::parse_env_var_or("ACCESS_COOKIE_LIFETIME_MINUTES", 1440),
		);
		let cookie_key_file = PathBuf::from(Self::get_env_var_or(
			"COOKIE_KEY_FILE",
			"/run/secrets/cookie-jar-key",
		));

		Self {
			database_url,
			database_pool_size,
			production,
			bind_address,
			request_timeout,
			cors_origin,
			log_level,
			public_url,
			upload_dir,
			max_upload_bytes,
			default_locale,
			access_cookie_name,
			access_cookie_lifetime,
			cookie_key_file,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		DbPool::builder(manager)
			.max_size(self.database_pool_size)
			.build()
			.unwrap()
	}

	/// The public url of a stored upload
	#[must_use]
	pub fn media_url(&self, file_path: &str) -> String {
		format!(
			"{}/uploads/{}",
			self.public_url.as_str().trim_end_matches('/'),
			file_path.trim_start_matches('/'),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(public_url: &str) -> Config {
		Config {
			database_url:           ":memory:".to_string(),
			database_pool_size:     1,
			production:             false,
			bind_address:           "127.0.0.1:0".to_string(),
			request_timeout:        std::time::Duration::from_secs(10),
			cors_origin:            None,
			log_level:              Level::INFO,
			public_url:             Url::parse(public_url).unwrap(),
			upload_dir:             PathBuf::from("/tmp"),
			max_upload_bytes:       1024,
			default_locale:         Locale::Id,
			access_cookie_name:     "access_token".to_string(),
			access_cookie_lifetime: time::Duration::minutes(5),
			cookie_key_file:        PathBuf::from("/dev/null"),
		}
	}

	#[test]
	fn media_urls_have_a_single_slash() {
		let expected = "https://cms.example.com/uploads/2025/06/01/a.png";

		assert_eq!(
			config("https://cms.example.com").media_url("2025/06/01/a.png"),
			expected
		);
		assert_eq!(
			config("https://cms.example.com/").media_url("/2025/06/01/a.png"),
			expected
		);
	}
}
