use std::sync::LazyLock;

use chrono::NaiveDateTime;
use common::Error;
use db::Role;
use regex::Regex;
use serde::{Deserialize, Serialize};
use user::{NewUser, User, UserUpdate};
use validator_derive::Validate;

use crate::schemas::validation::FieldCheck;
use crate::schemas::{BuildResponse, ResponseContext};

static USERNAME_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-_]*$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
	pub id:            i32,
	pub username:      String,
	pub email:         String,
	pub role:          Role,
	pub is_active:     bool,
	pub last_login_at: Option<NaiveDateTime>,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl BuildResponse<UserResponse> for User {
	fn build_response(self, _ctx: &ResponseContext) -> UserResponse {
		UserResponse {
			id:            self.primitive.id,
			username:      self.primitive.username,
			email:         self.primitive.email,
			role:          self.primitive.role,
			is_active:     self.primitive.is_active,
			last_login_at: self.primitive.last_login_at,
			created_at:    self.primitive.created_at,
			updated_at:    self.primitive.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
	#[validate(regex(
		path = *USERNAME_REGEX,
		message = "username must start with a letter and only contain letters, numbers, dashes, or underscores",
		code = "username-regex"
	))]
	#[validate(length(
		min = 2,
		max = 32,
		message = "username must be between 2 and 32 characters long",
		code = "username-length"
	))]
	pub username:  String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:     String,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password:  String,
	pub role:      Role,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active: bool,
}

impl CreateUserRequest {
	pub fn to_insertable(self) -> Result<NewUser, Error> {
		FieldCheck::new().validate("", &self).finish()?;

		Ok(NewUser {
			username:  self.username,
			email:     self.email,
			password:  self.password,
			role:      self.role,
			is_active: self.is_active,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:     Option<String>,
	pub role:      Option<Role>,
	pub is_active: Option<bool>,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub password:  Option<String>,
}

impl UpdateUserRequest {
	pub fn to_insertable(self) -> Result<UserUpdate, Error> {
		FieldCheck::new().validate("", &self).finish()?;

		Ok(UserUpdate {
			email:     self.email,
			role:      self.role,
			is_active: self.is_active,
			password:  self.password,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn usernames_start_with_a_letter() {
		let request = CreateUserRequest {
			username:  "1admin".to_string(),
			email:     "admin@example.com".to_string(),
			password:  "correct horse".to_string(),
			role:      Role::Admin,
			is_active: true,
		};

		let Err(Error::InvalidFields(errors)) = request.to_insertable() else {
			panic!("expected field errors");
		};

		assert!(errors.contains_key("username"));
	}
}
