#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{EmploymentType, LineItemKind, job_posting, job_posting_translation};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use line_item::{LineItem, NewLineItem};
use models_common::{
	Audit,
	PaginatedData,
	PaginationConfig,
	Scope,
	group_by_owner,
	insert_with_code,
	load_user_summaries,
	scoped,
};
use primitives::{JobPostingFields, JobPostingTranslation, PrimitiveJobPosting};
use translation::{TranslationSet, Translations};

const CODE_PREFIX: &str = "JOB";

const LINE_ITEM_KINDS: [LineItemKind; 2] =
	[LineItemKind::JobRequirement, LineItemKind::JobResponsibility];

/// An open position on the careers page
#[derive(Clone, Debug)]
pub struct JobPosting {
	pub primitive:        PrimitiveJobPosting,
	pub translations:     Vec<JobPostingTranslation>,
	pub requirements:     Vec<LineItem>,
	pub responsibilities: Vec<LineItem>,
	pub audit:            Audit,
}

impl JobPosting {
	fn hydrate(
		rows: Vec<PrimitiveJobPosting>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			job_posting_translation::table
				.filter(job_posting_translation::job_posting_id.eq_any(&ids))
				.order(job_posting_translation::id.asc())
				.select(JobPostingTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.job_posting_id, t)),
		);

		let mut items = LineItem::load_for(&LINE_ITEM_KINDS, &ids, conn)?;
		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let postings = rows
			.into_iter()
			.map(|primitive| {
				let id = primitive.id;
				let translations = translations.remove(&id).unwrap_or_default();
				let requirements = items
					.remove(&(LineItemKind::JobRequirement, id))
					.unwrap_or_default();
				let responsibilities = items
					.remove(&(LineItemKind::JobResponsibility, id))
					.unwrap_or_default();
				let audit = Audit::resolve(
					primitive.created_by,
					primitive.updated_by,
					&users,
				);

				Self {
					primitive,
					translations,
					requirements,
					responsibilities,
					audit,
				}
			})
			.collect();

		Ok(postings)
	}

	/// Get a single [`JobPosting`] given its id
	///
	/// Closed postings stay reachable by id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		posting_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let posting = conn
			.interact(move |conn| {
				let row =
					scoped!(job_posting::table.into_boxed(), job_posting, scope)
						.filter(job_posting::id.eq(posting_id))
						.select(PrimitiveJobPosting::as_select())
						.first(conn)
						.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut p| p.pop())
			})
			.await??;

		posting.ok_or_else(|| {
			Error::NotFound(format!("job posting with id {posting_id}"))
		})
	}

	/// Get all [`JobPosting`]s visible in the given scope
	///
	/// The public listing leaves out postings whose closing date has passed
	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, postings) = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				let mut count_query =
					scoped!(job_posting::table.into_boxed(), job_posting, scope);
				let mut query =
					scoped!(job_posting::table.into_boxed(), job_posting, scope)
						.order((
							job_posting::sort_order.asc(),
							job_posting::id.asc(),
						));

				if scope == Scope::Public {
					count_query = count_query.filter(
						job_posting::closes_at
							.is_null()
							.or(job_posting::closes_at.gt(now)),
					);
					query = query.filter(
						job_posting::closes_at
							.is_null()
							.or(job_posting::closes_at.gt(now)),
					);
				}

				let total: i64 = count_query.count().get_result(conn)?;

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows =
					query.select(PrimitiveJobPosting::as_select()).load(conn)?;
				let postings = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, postings))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, postings))
	}

	#[instrument(skip(conn))]
	pub async fn soft_delete(
		posting_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					job_posting::table
						.filter(job_posting::id.eq(posting_id))
						.filter(job_posting::deleted_at.is_null()),
				)
				.set((
					job_posting::deleted_at.eq(now),
					job_posting::is_active.eq(false),
					job_posting::updated_at.eq(now),
					job_posting::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"job posting with id {posting_id}"
			)));
		}

		info!("soft-deleted job posting {posting_id}");

		Ok(())
	}

	#[instrument(skip(conn))]
	pub async fn restore(
		posting_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					job_posting::table
						.filter(job_posting::id.eq(posting_id))
						.filter(job_posting::deleted_at.is_not_null()),
				)
				.set((
					job_posting::deleted_at.eq(None::<NaiveDateTime>),
					job_posting::is_active.eq(true),
					job_posting::updated_at.eq(Utc::now().naive_utc()),
					job_posting::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"deleted job posting with id {posting_id}"
			)));
		}

		info!("restored job posting {posting_id}");

		Self::get_by_id(posting_id, Scope::Admin, conn).await
	}
}

models_common::upsert_translations!(
	job_posting_translation,
	job_posting_id,
	JobPostingFields
);

#[derive(Clone, Debug)]
pub struct NewJobPosting {
	pub department:       String,
	pub location:         String,
	pub employment_type:  EmploymentType,
	pub closes_at:        Option<NaiveDateTime>,
	pub sort_order:       i32,
	pub is_active:        bool,
	pub translations:     TranslationSet<JobPostingFields>,
	pub requirements:     Vec<NewLineItem>,
	pub responsibilities: Vec<NewLineItem>,
	pub created_by:       i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = job_posting)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewJobPosting {
	code:            String,
	department:      String,
	location:        String,
	employment_type: EmploymentType,
	closes_at:       Option<NaiveDateTime>,
	sort_order:      i32,
	is_active:       bool,
	created_at:      NaiveDateTime,
	created_by:      i32,
	updated_at:      NaiveDateTime,
}

impl NewJobPosting {
	/// Insert this [`NewJobPosting`] under a freshly generated code, together
	/// with its translations and inline line items
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<JobPosting, Error> {
		let posting_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let now = Utc::now().naive_utc();

					let posting_id = insert_with_code(CODE_PREFIX, |code| {
						let new_posting = InsertableNewJobPosting {
							code,
							department: self.department.clone(),
							location: self.location.clone(),
							employment_type: self.employment_type,
							closes_at: self.closes_at,
							sort_order: self.sort_order,
							is_active: self.is_active,
							created_at: now,
							created_by: self.created_by,
							updated_at: now,
						};

						diesel::insert_into(job_posting::table)
							.values(new_posting)
							.returning(job_posting::id)
							.get_result(conn)
					})?;

					upsert_translations(posting_id, self.translations.iter(), conn)?;

					for requirement in &self.requirements {
						requirement.insert_with(
							LineItemKind::JobRequirement,
							posting_id,
							conn,
						)?;
					}

					for responsibility in &self.responsibilities {
						responsibility.insert_with(
							LineItemKind::JobResponsibility,
							posting_id,
							conn,
						)?;
					}

					Ok(posting_id)
				})
			})
			.await??;

		let posting = JobPosting::get_by_id(posting_id, Scope::Admin, conn).await?;

		info!("created job posting {posting_id} ({})", posting.primitive.code);

		Ok(posting)
	}
}

#[derive(Clone, Debug)]
pub struct JobPostingUpdate {
	pub department:      Option<String>,
	pub location:        Option<String>,
	pub employment_type: Option<EmploymentType>,
	pub closes_at:       Option<Option<NaiveDateTime>>,
	pub sort_order:      Option<i32>,
	pub is_active:       Option<bool>,
	pub translations:    Translations<JobPostingFields>,
	pub updated_by:      i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = job_posting)]
#[diesel(check_for_backend(Sqlite))]
struct JobPostingChangeset {
	department:      Option<String>,
	location:        Option<String>,
	employment_type: Option<EmploymentType>,
	closes_at:       Option<Option<NaiveDateTime>>,
	sort_order:      Option<i32>,
	is_active:       Option<bool>,
	updated_at:      NaiveDateTime,
	updated_by:      Option<i32>,
}

impl JobPostingUpdate {
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		posting_id: i32,
		conn: &DbConn,
	) -> Result<JobPosting, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = JobPostingChangeset {
					department:      self.department,
					location:        self.location,
					employment_type: self.employment_type,
					closes_at:       self.closes_at,
					sort_order:      self.sort_order,
					is_active:       self.is_active,
					updated_at:      Utc::now().naive_utc(),
					updated_by:      Some(self.updated_by),
				};

				let updated = diesel::update(
					job_posting::table
						.filter(job_posting::id.eq(posting_id))
						.filter(job_posting::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"job posting with id {posting_id}"
					)));
				}

				upsert_translations(
					posting_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let posting = JobPosting::get_by_id(posting_id, Scope::Admin, conn).await?;

		info!("updated job posting {posting_id}");

		Ok(posting)
	}
}
