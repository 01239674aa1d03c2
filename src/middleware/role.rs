use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use common::{Error, InternalServerError};
use db::Role;
use tower::{Layer, Service};

use crate::session::Session;

/// Middleware layer that only lets users with one of the given roles through
///
/// Must be layered inside an [`AuthLayer`](super::AuthLayer)
#[derive(Clone)]
pub struct RoleLayer {
	roles: &'static [Role],
}

impl RoleLayer {
	#[must_use]
	pub fn new(roles: &'static [Role]) -> Self { Self { roles } }

	/// Admins only
	#[must_use]
	pub fn admin() -> Self { Self::new(&[Role::Admin]) }

	/// Anyone that edits content
	#[must_use]
	pub fn staff() -> Self { Self::new(&[Role::Admin, Role::Editor]) }
}

impl<S> Layer<S> for RoleLayer {
	type Service = RoleMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RoleMiddleware { inner, roles: self.roles }
	}
}

#[derive(Clone)]
pub struct RoleMiddleware<S> {
	inner: S,
	roles: &'static [Role],
}

impl<S> Service<Request<Body>> for RoleMiddleware<S>
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
	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let roles = self.roles;

		Box::pin(async move {
			let Some(session) = req.extensions().get::<Session>().copied() else {
				return Ok(Error::from(InternalServerError::SessionWithoutAuthError)
					.into_response());
			};

			if !roles.contains(&session.role) {
				debug!("user {} with role {} is not allowed", session.user_id, session.role);

				return Ok(Error::Forbidden.into_response());
			}

			inner.call(req).await
		})
	}
}
