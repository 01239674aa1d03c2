#[macro_use]
extern crate tracing;

use axum_extra::extract::cookie::Key;
use landing_cms::{AppState, Config, routes, run_migrations};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;

#[tokio::main]
async fn main() {
	// Load the configuration from the environment first, the log level is
	// part of it.
	let config = Config::from_env();

	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(config.log_level)
		.init();

	common::expose_internal_errors(!config.production);

	let database_pool = config.create_database_pool();
	run_migrations(&database_pool).await;

	let cookie_jar_key = load_cookie_jar_key(&config);

	// Create the app router and listener.
	let bind_address = config.bind_address.clone();
	let router = routes::get_app_router(AppState {
		config,
		database_pool,
		cookie_jar_key,
	});

	let listener = TcpListener::bind(&bind_address).await.unwrap();

	// Start the server.
	info!("listening on {}", listener.local_addr().unwrap());
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();
}

/// Read the cookie jar key, outside of production a missing key file is
/// replaced by a random key
fn load_cookie_jar_key(config: &Config) -> Key {
	match std::fs::read(&config.cookie_key_file) {
		Ok(key) => Key::from(&key),
		Err(e) if !config.production => {
			warn!(
				"could not read cookie jar key {} ({e}), sessions will not \
				 survive a restart",
				config.cookie_key_file.display()
			);

			Key::generate()
		},
		Err(e) => panic!("COULD NOT READ COOKIE JAR KEY -- {e}"),
	}
}

/// Gracefully shutdown the server on SIGINT or SIGTERM.
async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}
}
