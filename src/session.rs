//! Cookie based user sessions

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, TimeDelta, Utc};
use common::{Error, InternalServerError, TokenError};
use db::Role;
use primitives::PrimitiveUser;
use serde::{Deserialize, Serialize};

/// The authenticated user of a request
///
/// Only available on routes behind an [`AuthLayer`](crate::middleware::AuthLayer)
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.user_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
	pub user_id: i32,
	pub role:    Role,
}

/// What is stored (encrypted) inside the access cookie
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
	pub user_id:    i32,
	pub role:       Role,
	pub expires_at: DateTime<Utc>,
}

impl<S> FromRequestParts<S> for Session
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<Self>()
			.copied()
			.ok_or_else(|| InternalServerError::SessionWithoutAuthError.into())
	}
}

impl SessionClaims {
	/// Claims for `user` that stay valid for `lifetime`
	#[must_use]
	pub fn new(user: &PrimitiveUser, lifetime: time::Duration) -> Self {
		let expires_at =
			Utc::now() + TimeDelta::seconds(lifetime.whole_seconds());

		Self { user_id: user.id, role: user.role, expires_at }
	}

	/// Read the claims back out of a decrypted access cookie
	pub fn from_cookie(cookie: &Cookie) -> Result<Self, TokenError> {
		let claims: Self = serde_json::from_str(cookie.value())
			.map_err(|_| TokenError::InvalidAccessToken)?;

		if claims.expires_at <= Utc::now() {
			return Err(TokenError::ExpiredAccessToken);
		}

		Ok(claims)
	}

	/// Convert these claims into an access token cookie
	pub fn to_access_token_cookie(
		self,
		name: String,
		lifetime: time::Duration,
		secure: bool,
	) -> Result<Cookie<'static>, Error> {
		let value = serde_json::to_string(&self)?;

		let cookie = Cookie::build((name, value))
			.http_only(true)
			.max_age(lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure)
			.into();

		Ok(cookie)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn claims(expires_at: DateTime<Utc>) -> SessionClaims {
		SessionClaims { user_id: 7, role: Role::Editor, expires_at }
	}

	#[test]
	fn cookie_carries_the_claims() {
		let claims = claims(Utc::now() + TimeDelta::hours(1));
		let cookie = claims
			.to_access_token_cookie(
				"access_token".to_string(),
				time::Duration::hours(1),
				false,
			)
			.unwrap();

		assert_eq!(SessionClaims::from_cookie(&cookie).unwrap(), claims);
		assert_eq!(cookie.http_only(), Some(true));
	}

	#[test]
	fn expired_claims_are_rejected() {
		let cookie = claims(Utc::now() - TimeDelta::seconds(1))
			.to_access_token_cookie(
				"access_token".to_string(),
				time::Duration::hours(1),
				false,
			)
			.unwrap();

		assert!(matches!(
			SessionClaims::from_cookie(&cookie),
			Err(TokenError::ExpiredAccessToken)
		));
	}

	#[test]
	fn garbage_is_an_invalid_token() {
		let cookie = Cookie::new("access_token", "{\"userId\":");

		assert!(matches!(
			SessionClaims::from_cookie(&cookie),
			Err(TokenError::InvalidAccessToken)
		));
	}
}
