use axum::extract::State;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Cookie;
use common::{DbPool, Error, LoginError};
use user::User;

use crate::Config;
use crate::schemas::auth::LoginRequest;
use crate::schemas::envelope::ApiResponse;
use crate::schemas::extract::ApiJson;
use crate::schemas::user::UserResponse;
use crate::schemas::{BuildResponse, ResponseContext};
use crate::session::{Session, SessionClaims};

#[instrument(skip_all)]
pub async fn login(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	ApiJson(login_data): ApiJson<LoginRequest>,
) -> Result<(PrivateCookieJar, impl IntoResponse), Error> {
	let conn = pool.get().await?;

	let user =
		User::get_by_identifier(login_data.identifier.clone(), &conn).await?;
	let Some(user) = user else {
		return Err(LoginError::UnknownIdentifier(login_data.identifier).into());
	};

	user.verify_login(&login_data.password)?;

	let claims = SessionClaims::new(&user.primitive, config.access_cookie_lifetime);
	let access_token_cookie = claims.to_access_token_cookie(
		config.access_cookie_name.clone(),
		config.access_cookie_lifetime,
		config.production,
	)?;

	let jar = jar.add(access_token_cookie);

	User::update_last_login(user.primitive.id, &conn).await?;
	let user = User::get_by_id(user.primitive.id, &conn).await?;

	info!("logged in user {}", user.primitive.id);

	let response: UserResponse =
		user.build_response(&ResponseContext::admin(&config));

	Ok((jar, ApiResponse::new("logged in", response)))
}

#[instrument(skip(config, jar))]
pub async fn logout(
	State(config): State<Config>,
	jar: PrivateCookieJar,
	session: Session,
) -> Result<(PrivateCookieJar, impl IntoResponse), Error> {
	let access_token = Cookie::build(config.access_cookie_name).path("/");

	let jar = jar.remove(access_token);

	info!("logged out user {}", session.user_id);

	Ok((jar, ApiResponse::new("logged out", ())))
}

#[instrument(skip(pool, config))]
pub async fn me(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let user = User::get_by_id(session.user_id, &conn).await?;
	let response: UserResponse =
		user.build_response(&ResponseContext::admin(&config));

	Ok(ApiResponse::new("current user retrieved", response))
}
