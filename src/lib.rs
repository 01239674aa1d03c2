//! # Landing CMS backend library

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use common::DbPool;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

mod config;

pub mod controllers;
pub mod locale;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod upload;

pub use config::*;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:         Config,
	pub database_pool:  DbPool,
	pub cookie_jar_key: Key,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for Key {
	fn from_ref(input: &AppState) -> Self { input.cookie_jar_key.clone() }
}

/// Bring the database behind `pool` up to date
///
/// # Panics
/// Panics if a connection can't be acquired or a migration fails
pub async fn run_migrations(pool: &DbPool) {
	let conn = pool.get().await.expect("COULD NOT GET DATABASE CONNECTION");

	let applied = conn
		.interact(|conn| {
			conn.run_pending_migrations(MIGRATIONS)
				.map(|versions| versions.len())
				.map_err(|e| e.to_string())
		})
		.await
		.expect("COULD NOT INTERACT WITH DATABASE CONNECTION")
		.expect("COULD NOT RUN DATABASE MIGRATIONS");

	info!("applied {applied} pending migrations");
}
