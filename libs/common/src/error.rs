//! Library-wide error types and [`From`] impls

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use db::UnknownVariant;
use diesel::result::DatabaseErrorKind;
use serde::Serialize;
use thiserror::Error;
use translation::MissingTranslation;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Field path to the list of problems found with that field
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Whether internal error details end up in responses
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Include the underlying cause of internal errors in response messages
///
/// Only ever enabled outside of production
pub fn expose_internal_errors(expose: bool) {
	EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error, the detail is only shown outside of
	/// production
	#[error("internal server error")]
	InternalServerError(String),
	/// One or more fields of the request failed validation
	#[error("validation failed")]
	InvalidFields(FieldErrors),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Any error related to parsing multipart data
	#[error(transparent)]
	MultipartError(#[from] MultipartError),
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Invalid pagination options
	#[error(transparent)]
	PaginationError(#[from] PaginationError),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Any error related to uploading a file
	#[error(transparent)]
	UploadError(#[from] UploadError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	#[must_use]
	pub fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError(_) => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownIdentifier(_) => 6,
					LoginError::InvalidPassword => 7,
					LoginError::Disabled => 8,
				}
			},
			Self::MultipartError(_) => 9,
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 10,
					TokenError::InvalidAccessToken => 11,
					TokenError::ExpiredAccessToken => 12,
				}
			},
			Self::ValidationError(_) => 13,
			Self::InvalidFields(_) => 14,
			Self::PaginationError(e) => {
				match e {
					PaginationError::OffsetTooLarge => 15,
				}
			},
			Self::UploadError(e) => {
				match e {
					UploadError::MissingFile => 16,
					UploadError::UnsupportedType(_) => 17,
					UploadError::TooLarge { .. } => 18,
				}
			},
		}
	}

	/// The HTTP status this error is rendered with
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Duplicate(_) => StatusCode::CONFLICT,
			Self::InternalServerError(_) | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(_)
			| Self::LoginError(
				LoginError::UnknownIdentifier(_) | LoginError::InvalidPassword,
			) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(LoginError::Disabled) => {
				StatusCode::FORBIDDEN
			},
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::MultipartError(e) => e.status(),
			Self::UploadError(UploadError::TooLarge { .. }) => {
				StatusCode::PAYLOAD_TOO_LARGE
			},
			Self::UploadError(_)
			| Self::PaginationError(_)
			| Self::InvalidFields(_)
			| Self::ValidationError(_) => StatusCode::BAD_REQUEST,
		}
	}

	/// The message shown to API users
	fn message(&self) -> String {
		match self {
			Self::InternalServerError(detail)
				if EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed) =>
			{
				format!("internal server error -- {detail}")
			},
			Self::MultipartError(e) => e.body_text(),
			_ => self.to_string(),
		}
	}
}

#[derive(Serialize)]
struct ErrorBody<'a> {
	success: bool,
	message: String,
	code:    i32,
	#[serde(skip_serializing_if = "Option::is_none")]
	errors:  Option<&'a FieldErrors>,
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();

		if status.is_server_error() {
			error!("{self:?}");
		} else {
			debug!("{self:?}");
		}

		let errors = match &self {
			Self::InvalidFields(errors) => Some(errors),
			_ => None,
		};

		let body = ErrorBody {
			success: false,
			message: self.message(),
			code: self.code(),
			errors,
		};

		(status, axum::Json(body)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no user with username or email '{0}' was found")]
	UnknownIdentifier(String),
	#[error("invalid password")]
	InvalidPassword,
	#[error("user is disabled")]
	Disabled,
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing access token")]
	MissingAccessToken,
	#[error("invalid access token")]
	InvalidAccessToken,
	#[error("access token has expired")]
	ExpiredAccessToken,
}

#[derive(Debug, Error)]
pub enum PaginationError {
	#[error("the offset is too large for the amount of data")]
	OffsetTooLarge,
}

/// Any error related to uploading a file
#[derive(Debug, Error)]
pub enum UploadError {
	#[error("no file was uploaded")]
	MissingFile,
	#[error("files of type '{0}' are not allowed")]
	UnsupportedType(String),
	#[error("file exceeds the maximum size of {limit} bytes")]
	TooLarge { limit: usize },
}

/// A list of possible internal errors
///
/// API end users should never see these details in production
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error handling some form of I/O
	#[error("I/O error -- {0:?}")]
	IOError(std::io::Error),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
	/// A stored value did not map onto its enum
	#[error("corrupt enum value -- {0}")]
	UnknownVariant(UnknownVariant),
	/// Failed to parse a url
	#[error("could not parse url -- {0:?}")]
	UrlParseError(url::ParseError),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError(value.to_string())
	}
}

/// Flatten (possibly nested) validation errors into `out`, prefixing every
/// field path with `prefix`
pub fn flatten_validation_errors(
	prefix: &str,
	errors: &ValidationErrors,
	out: &mut FieldErrors,
) {
	for (field, kind) in errors.errors() {
		let path = if prefix.is_empty() {
			field.to_string()
		} else {
			format!("{prefix}.{field}")
		};

		match kind {
			ValidationErrorsKind::Field(errs) => {
				let messages = errs.iter().map(|e| {
					e.message
						.as_ref()
						.map_or_else(|| e.code.to_string(), ToString::to_string)
				});

				out.entry(path).or_default().extend(messages);
			},
			ValidationErrorsKind::Struct(inner) => {
				flatten_validation_errors(&path, inner, out);
			},
			ValidationErrorsKind::List(items) => {
				for (idx, inner) in items {
					flatten_validation_errors(&format!("{path}.{idx}"), inner, out);
				}
			},
		}
	}
}

/// Map validation errors to application errors
impl From<ValidationErrors> for Error {
	fn from(err: ValidationErrors) -> Self {
		let mut errors = FieldErrors::new();

		flatten_validation_errors("", &err, &mut errors);

		Self::InvalidFields(errors)
	}
}

/// A missing required translation is reported against its locale key
impl From<MissingTranslation> for Error {
	fn from(err: MissingTranslation) -> Self {
		let mut errors = FieldErrors::new();

		errors.insert(format!("translations.{}", err.0), vec![err.to_string()]);

		Self::InvalidFields(errors)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Extract the offending column from a `SQLite` unique violation message
///
/// `SQLite` reports these as `UNIQUE constraint failed: table.a, table.b`,
/// the last column is the most specific one
fn unique_violation_column(message: &str) -> Option<&str> {
	let columns = message.strip_prefix("UNIQUE constraint failed:")?;
	let last = columns.rsplit(',').next()?.trim();

	last.rsplit('.').next().filter(|c| !c.is_empty())
}

/// Map database result errors to application errors
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				match unique_violation_column(info.message()) {
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => InternalServerError::DatabaseError(err).into(),
				}
			},
			// Foreign key or check constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation
				| DatabaseErrorKind::CheckViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		InternalServerError::IOError(err).into()
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalServerError::SerdeJsonError(err).into()
	}
}

impl From<url::ParseError> for Error {
	fn from(err: url::ParseError) -> Self {
		InternalServerError::UrlParseError(err).into()
	}
}

impl From<UnknownVariant> for Error {
	fn from(err: UnknownVariant) -> Self {
		InternalServerError::UnknownVariant(err).into()
	}
}

impl From<JsonRejection> for Error {
	fn from(err: JsonRejection) -> Self { Self::ValidationError(err.body_text()) }
}

impl From<QueryRejection> for Error {
	fn from(err: QueryRejection) -> Self {
		Self::ValidationError(err.body_text())
	}
}

impl From<PathRejection> for Error {
	fn from(err: PathRejection) -> Self { Self::ValidationError(err.body_text()) }
}

#[cfg(test)]
mod tests {
	use axum::body::to_bytes;
	use validator::Validate;
	use validator_derive::Validate;

	use super::*;

	async fn render(err: Error) -> (StatusCode, serde_json::Value) {
		let response = err.into_response();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

		(status, serde_json::from_slice(&bytes).unwrap())
	}

	#[test]
	fn parses_unique_violation_columns() {
		assert_eq!(
			unique_violation_column("UNIQUE constraint failed: industry.slug"),
			Some("slug")
		);
		assert_eq!(
			unique_violation_column(
				"UNIQUE constraint failed: faq_translation.faq_id, \
				 faq_translation.locale"
			),
			Some("locale")
		);
		assert_eq!(unique_violation_column("database is locked"), None);
	}

	#[tokio::test]
	async fn not_found_renders_envelope() {
		let (status, body) = render(Error::NotFound("faq 3".to_string())).await;

		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(
			body,
			serde_json::json!({
				"success": false,
				"message": "not found - faq 3",
				"code": 5,
			})
		);
	}

	#[tokio::test]
	async fn missing_translation_is_a_field_error() {
		let err = Error::from(MissingTranslation(db::Locale::Id));
		let (status, body) = render(err).await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(
			body["errors"]["translations.id"][0],
			"a translation for locale 'id' is required"
		);
	}

	#[tokio::test]
	async fn validation_errors_are_flattened() {
		#[derive(Validate)]
		struct Plan {
			#[validate(range(min = 0, message = "price must not be negative"))]
			price:    i64,
			#[validate(length(equal = 3, message = "currency must be 3 letters"))]
			currency: String,
		}

		let plan = Plan { price: -1, currency: "EURO".to_string() };
		let err = Error::from(plan.validate().unwrap_err());
		let (status, body) = render(err).await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["code"], 14);
		assert_eq!(body["errors"]["price"][0], "price must not be negative");
		assert_eq!(body["errors"]["currency"][0], "currency must be 3 letters");
	}

	#[test]
	fn statuses_follow_error_kind() {
		assert_eq!(Error::Duplicate(String::new()).status(), StatusCode::CONFLICT);
		assert_eq!(Error::Forbidden.status(), StatusCode::FORBIDDEN);
		assert_eq!(
			Error::from(TokenError::ExpiredAccessToken).status(),
			StatusCode::UNAUTHORIZED
		);
		assert_eq!(
			Error::from(UploadError::TooLarge { limit: 1 }).status(),
			StatusCode::PAYLOAD_TOO_LARGE
		);
		assert_eq!(
			Error::from(LoginError::Disabled).status(),
			StatusCode::FORBIDDEN
		);
	}
}
