//! Middleware to authenticate users and store their session on the request

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::RequestExt;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use common::{Error, TokenError};
use tower::{Layer, Service};
use user::User;

use crate::AppState;
use crate::session::{Session, SessionClaims};

/// Middleware layer that guarantees a request carries a valid access cookie
/// belonging to an active user
///
/// The resulting [`Session`] is stored as an [`Extension`](axum::Extension),
/// controllers that need it should ask for a [`Session`] in their arguments
#[derive(Clone)]
pub struct AuthLayer {
	state: AppState,
}

impl AuthLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
	state: AppState,
}

/// Resolve the session behind the access cookie in `jar`
async fn authenticate(
	jar: &PrivateCookieJar,
	state: &AppState,
) -> Result<Session, Error> {
	let Some(access_token) = jar.get(&state.config.access_cookie_name) else {
		info!("got request without valid access token");

		return Err(TokenError::MissingAccessToken.into());
	};

	let claims = SessionClaims::from_cookie(&access_token)?;

	// The connection is released before the inner service runs, it needs
	// one of its own
	let conn = state.database_pool.get().await?;

	let user = match User::get_by_id(claims.user_id, &conn).await {
		Ok(user) => user,
		Err(Error::NotFound(_)) => {
			warn!("access token for unknown user {}", claims.user_id);

			return Err(TokenError::InvalidAccessToken.into());
		},
		Err(e) => return Err(e),
	};

	if !user.primitive.is_active {
		warn!("access token for disabled user {}", claims.user_id);

		return Err(TokenError::InvalidAccessToken.into());
	}

	Ok(Session { user_id: user.primitive.id, role: user.primitive.role })
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let jar = match req
				.extract_parts_with_state::<PrivateCookieJar, _>(&state)
				.await
			{
				Ok(jar) => jar,
				Err(never) => match never {},
			};

			let session = match authenticate(&jar, &state).await {
				Ok(session) => session,
				Err(e) => return Ok(e.into_response()),
			};

			req.extensions_mut().insert(session);

			inner.call(req).await
		})
	}
}
