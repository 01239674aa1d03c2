//! Building blocks shared by the model crates

#[macro_use]
extern crate tracing;

use std::collections::{HashMap, HashSet};

use common::{Error, PaginationError};
use db::{media, user_account};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use primitives::{PrimitiveMedia, UserSummary};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Which rows of a soft-deletable table a query should see
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub enum Scope {
	/// Active, non-deleted rows only
	#[default]
	Public,
	/// Every non-deleted row, active or not
	Admin,
	/// Soft-deleted rows only
	Trashed,
}

impl Scope {
	/// Admin scope, or the trash when `trashed` is set
	#[must_use]
	pub const fn admin(trashed: bool) -> Self {
		if trashed { Self::Trashed } else { Self::Admin }
	}
}

/// Apply a [`Scope`] to a boxed query over a table with `is_active` and
/// `deleted_at` columns
#[macro_export]
macro_rules! scoped {
	($query:expr, $table:ident, $scope:expr) => {
		match $scope {
			$crate::Scope::Public => {
				$query
					.filter($table::is_active.eq(true))
					.filter($table::deleted_at.is_null())
			},
			$crate::Scope::Admin => $query.filter($table::deleted_at.is_null()),
			$crate::Scope::Trashed => {
				$query.filter($table::deleted_at.is_not_null())
			},
		}
	};
}

/// Define `upsert_translations`, which inserts or replaces the row of a
/// translation table keyed on `(owner column, locale)` for every given locale
#[macro_export]
macro_rules! upsert_translations {
	($table:ident, $owner:ident, $fields:ty) => {
		fn upsert_translations<'a>(
			owner_id: i32,
			translations: impl IntoIterator<Item = (::db::Locale, &'a $fields)>,
			conn: &mut ::diesel::sqlite::SqliteConnection,
		) -> ::diesel::QueryResult<()> {
			use ::diesel::prelude::*;

			for (locale, fields) in translations {
				::diesel::insert_into($table::table)
					.values((
						$table::$owner.eq(owner_id),
						$table::locale.eq(locale),
						fields,
					))
					.on_conflict(($table::$owner, $table::locale))
					.do_update()
					.set(fields)
					.execute(conn)?;
			}

			Ok(())
		}
	};
}

#[derive(Clone, Copy, Debug)]
pub struct PaginationConfig {
	pub limit:  i64,
	pub offset: i64,
}

impl PaginationConfig {
	/// Reject pages that start beyond the end of a non-empty result
	pub fn check(&self, total: i64) -> Result<(), Error> {
		if total > 0 && self.offset >= total {
			return Err(PaginationError::OffsetTooLarge.into());
		}

		Ok(())
	}
}

/// A page of results together with the total amount of matching rows
pub type PaginatedData<T> = (i64, T);

/// Resolved creator and updater of an audited row
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Audit {
	pub created_by: Option<UserSummary>,
	pub updated_by: Option<UserSummary>,
}

impl Audit {
	#[must_use]
	pub fn resolve(
		created_by: i32,
		updated_by: Option<i32>,
		users: &HashMap<i32, UserSummary>,
	) -> Self {
		Self {
			created_by: users.get(&created_by).cloned(),
			updated_by: updated_by.and_then(|id| users.get(&id).cloned()),
		}
	}
}

/// Load the [`UserSummary`] of every given user id
pub fn load_user_summaries(
	ids: impl IntoIterator<Item = i32>,
	conn: &mut SqliteConnection,
) -> QueryResult<HashMap<i32, UserSummary>> {
	let ids: HashSet<i32> = ids.into_iter().collect();

	if ids.is_empty() {
		return Ok(HashMap::new());
	}

	let users = user_account::table
		.filter(user_account::id.eq_any(ids))
		.select(UserSummary::as_select())
		.load(conn)?
		.into_iter()
		.map(|user| (user.id, user))
		.collect();

	Ok(users)
}

/// Load every given non-deleted media item
///
/// Deleted media are left out, references to them resolve to nothing
pub fn load_media(
	ids: impl IntoIterator<Item = i32>,
	conn: &mut SqliteConnection,
) -> QueryResult<HashMap<i32, PrimitiveMedia>> {
	let ids: HashSet<i32> = ids.into_iter().collect();

	if ids.is_empty() {
		return Ok(HashMap::new());
	}

	let media = media::table
		.filter(media::id.eq_any(ids))
		.filter(media::deleted_at.is_null())
		.select(PrimitiveMedia::as_select())
		.load(conn)?
		.into_iter()
		.map(|m| (m.id, m))
		.collect();

	Ok(media)
}

/// Make sure a referenced media item exists and is not deleted
pub fn require_media(
	media_id: Option<i32>,
	conn: &mut SqliteConnection,
) -> Result<(), Error> {
	let Some(media_id) = media_id else {
		return Ok(());
	};

	let exists: bool = diesel::select(diesel::dsl::exists(
		media::table
			.filter(media::id.eq(media_id))
			.filter(media::deleted_at.is_null()),
	))
	.get_result(conn)?;

	if !exists {
		return Err(Error::NotFound(format!("media with id {media_id}")));
	}

	Ok(())
}

/// Group `(owner, value)` pairs by owner, keeping the input order within
/// each group
#[must_use]
pub fn group_by_owner<V>(
	rows: impl IntoIterator<Item = (i32, V)>,
) -> HashMap<i32, Vec<V>> {
	let mut groups: HashMap<i32, Vec<V>> = HashMap::new();

	for (owner, value) in rows {
		groups.entry(owner).or_default().push(value);
	}

	groups
}

/// Generate a random human readable code such as `PLN-4F7Q2X9A`
#[must_use]
pub fn generate_code(prefix: &str) -> String {
	let suffix: String = rand::rng()
		.sample_iter(&Alphanumeric)
		.take(8)
		.map(|c| char::from(c).to_ascii_uppercase())
		.collect();

	format!("{prefix}-{suffix}")
}

/// How many generated codes are tried before a collision is reported
pub const CODE_ATTEMPTS: usize = 3;

/// Run `insert` with a freshly generated code, drawing a new one whenever
/// the previous code collides with the unique `code` column
pub fn insert_with_code<T>(
	prefix: &str,
	mut insert: impl FnMut(String) -> QueryResult<T>,
) -> QueryResult<T> {
	for attempt in 1..CODE_ATTEMPTS {
		match insert(generate_code(prefix)) {
			Err(DieselError::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			)) if info.message().ends_with(".code") => {
				warn!("generated {prefix} code collided on attempt {attempt}");
			},
			result => return result,
		}
	}

	insert(generate_code(prefix))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn code_collision() -> DieselError {
		DieselError::DatabaseError(
			DatabaseErrorKind::UniqueViolation,
			Box::new("UNIQUE constraint failed: job_posting.code".to_string()),
		)
	}

	#[test]
	fn colliding_code_is_regenerated() {
		let mut codes = Vec::new();

		let result = insert_with_code("JOB", |code| {
			codes.push(code.clone());

			if codes.len() == 1 { Err(code_collision()) } else { Ok(code) }
		});

		assert_eq!(codes.len(), 2);
		assert_eq!(result.unwrap(), codes[1]);
	}

	#[test]
	fn code_collisions_give_up_after_every_attempt() {
		let mut calls = 0;

		let result = insert_with_code("JOB", |_| -> QueryResult<()> {
			calls += 1;
			Err(code_collision())
		});

		assert_eq!(calls, CODE_ATTEMPTS);
		assert!(matches!(
			result,
			Err(DieselError::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				_
			))
		));
	}

	#[test]
	fn other_unique_violations_are_not_retried() {
		let mut calls = 0;

		let result = insert_with_code("PLN", |_| -> QueryResult<()> {
			calls += 1;
			Err(DieselError::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				Box::new("UNIQUE constraint failed: industry.slug".to_string()),
			))
		});

		assert_eq!(calls, 1);
		assert!(result.is_err());
	}

	#[test]
	fn generated_codes_have_prefix_and_length() {
		let code = generate_code("PLN");

		assert!(code.starts_with("PLN-"));
		assert_eq!(code.len(), 12);
		assert!(code[4..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
	}

	#[test]
	fn grouping_keeps_input_order() {
		let groups = group_by_owner(vec![(1, "a"), (2, "b"), (1, "c")]);

		assert_eq!(groups[&1], vec!["a", "c"]);
		assert_eq!(groups[&2], vec!["b"]);
	}

	#[test]
	fn pagination_rejects_offsets_past_the_end() {
		let cfg = PaginationConfig { limit: 10, offset: 20 };

		assert!(cfg.check(0).is_ok());
		assert!(cfg.check(21).is_ok());
		assert!(cfg.check(20).is_err());
	}

	#[test]
	fn admin_scope_switches_to_trash() {
		assert_eq!(Scope::admin(false), Scope::Admin);
		assert_eq!(Scope::admin(true), Scope::Trashed);
	}
}
