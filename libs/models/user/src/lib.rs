#[macro_use]
extern crate tracing;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error, LoginError};
use db::{Role, user_account};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use models_common::{PaginatedData, PaginationConfig};
use primitives::PrimitiveUser;

/// A back-office account
#[derive(Clone, Debug)]
pub struct User {
	pub primitive: PrimitiveUser,
}

impl User {
	/// Get a [`User`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(user_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let user = conn
			.interact(move |conn| {
				user_account::table
					.find(user_id)
					.select(PrimitiveUser::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		user.map(|primitive| Self { primitive })
			.ok_or_else(|| Error::NotFound(format!("user with id {user_id}")))
	}

	/// Get a [`User`] given its username or email
	#[instrument(skip(conn))]
	pub async fn get_by_identifier(
		identifier: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		// Emails are stored lowercased
		let email = identifier.to_lowercase();

		let user = conn
			.interact(move |conn| {
				user_account::table
					.filter(
						user_account::username
							.eq(&identifier)
							.or(user_account::email.eq(&email)),
					)
					.select(PrimitiveUser::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(user.map(|primitive| Self { primitive }))
	}

	/// Get a list of all [`User`]s ordered by id
	#[instrument(skip(conn))]
	pub async fn get_all(
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, users) = conn
			.interact(move |conn| {
				let total: i64 = user_account::table.count().get_result(conn)?;

				let users = user_account::table
					.order(user_account::id.asc())
					.limit(p_cfg.limit)
					.offset(p_cfg.offset)
					.select(PrimitiveUser::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((total, users))
			})
			.await??;

		p_cfg.check(total)?;

		let users = users.into_iter().map(|primitive| Self { primitive }).collect();

		Ok((total, users))
	}

	/// Check a login attempt against this [`User`]
	///
	/// Disabled accounts are only reported once the password matched
	pub fn verify_login(&self, password: &str) -> Result<(), Error> {
		let hash = PasswordHash::new(&self.primitive.password_hash)?;

		Argon2::default().verify_password(password.as_bytes(), &hash)?;

		if !self.primitive.is_active {
			return Err(LoginError::Disabled.into());
		}

		Ok(())
	}

	/// Set the `last_login_at` field of the given user to now
	#[instrument(skip(conn))]
	pub async fn update_last_login(user_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			diesel::update(user_account::table.find(user_id))
				.set(user_account::last_login_at.eq(Utc::now().naive_utc()))
				.execute(conn)
		})
		.await??;

		Ok(())
	}

	/// Hash a password using Argon2
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hashed_password = Argon2::default()
			.hash_password(password.as_bytes(), &salt)?
			.to_string();

		Ok(hashed_password)
	}
}

#[derive(Clone, Debug)]
pub struct NewUser {
	pub username:  String,
	pub email:     String,
	pub password:  String,
	pub role:      Role,
	pub is_active: bool,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = user_account)]
#[diesel(check_for_backend(Sqlite))]
struct NewUserHashed {
	username:      String,
	email:         String,
	password_hash: String,
	role:          Role,
	is_active:     bool,
	created_at:    NaiveDateTime,
	updated_at:    NaiveDateTime,
}

impl NewUser {
	/// Insert this [`NewUser`], hashing its password
	#[instrument(skip_all, fields(username = %self.username))]
	pub async fn insert(self, conn: &DbConn) -> Result<User, Error> {
		let now = Utc::now().naive_utc();

		let insertable = NewUserHashed {
			username:      self.username,
			email:         self.email.to_lowercase(),
			password_hash: User::hash_password(&self.password)?,
			role:          self.role,
			is_active:     self.is_active,
			created_at:    now,
			updated_at:    now,
		};

		let primitive = conn
			.interact(|conn| {
				diesel::insert_into(user_account::table)
					.values(insertable)
					.returning(PrimitiveUser::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created user {} ({})", primitive.id, primitive.role);

		Ok(User { primitive })
	}
}

#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
	pub email:     Option<String>,
	pub role:      Option<Role>,
	pub is_active: Option<bool>,
	pub password:  Option<String>,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = user_account)]
#[diesel(check_for_backend(Sqlite))]
struct UserChangeset {
	email:         Option<String>,
	role:          Option<Role>,
	is_active:     Option<bool>,
	password_hash: Option<String>,
	updated_at:    NaiveDateTime,
}

impl UserUpdate {
	/// Apply this update to the [`User`] with the given id
	#[instrument(skip(self, conn))]
	pub async fn apply_to(self, user_id: i32, conn: &DbConn) -> Result<User, Error> {
		let password_hash =
			self.password.as_deref().map(User::hash_password).transpose()?;

		let changeset = UserChangeset {
			email:         self.email.map(|e| e.to_lowercase()),
			role:          self.role,
			is_active:     self.is_active,
			password_hash,
			updated_at:    Utc::now().naive_utc(),
		};

		let affected = conn
			.interact(move |conn| {
				diesel::update(user_account::table.find(user_id))
					.set(changeset)
					.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("user with id {user_id}")));
		}

		info!("updated user {user_id}");

		User::get_by_id(user_id, conn).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn user(password: &str, is_active: bool) -> User {
		let now = Utc::now().naive_utc();

		User {
			primitive: PrimitiveUser {
				id: 1,
				username: "editor".into(),
				email: "editor@example.com".into(),
				password_hash: User::hash_password(password).unwrap(),
				role: Role::Editor,
				is_active,
				last_login_at: None,
				created_at: now,
				updated_at: now,
			},
		}
	}

	#[test]
	fn correct_password_is_accepted() {
		assert!(user("hunter22", true).verify_login("hunter22").is_ok());
	}

	#[test]
	fn wrong_password_is_rejected() {
		let err = user("hunter22", true).verify_login("hunter23").unwrap_err();

		assert!(matches!(err, Error::LoginError(LoginError::InvalidPassword)));
	}

	#[test]
	fn disabled_accounts_cannot_log_in() {
		let err = user("hunter22", false).verify_login("hunter22").unwrap_err();

		assert!(matches!(err, Error::LoginError(LoginError::Disabled)));
	}
}
