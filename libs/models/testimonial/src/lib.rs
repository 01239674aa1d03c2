#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{testimonial, testimonial_translation};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use models_common::{
	Audit,
	PaginatedData,
	PaginationConfig,
	Scope,
	group_by_owner,
	load_media,
	load_user_summaries,
	require_media,
	scoped,
};
use primitives::{
	PrimitiveMedia,
	PrimitiveTestimonial,
	TestimonialFields,
	TestimonialTranslation,
};
use translation::{TranslationSet, Translations};

#[derive(Clone, Debug)]
pub struct Testimonial {
	pub primitive:    PrimitiveTestimonial,
	pub translations: Vec<TestimonialTranslation>,
	pub avatar:       Option<PrimitiveMedia>,
	pub audit:        Audit,
}

impl Testimonial {
	/// Attach translations, avatars and audit users to a batch of rows
	fn hydrate(
		rows: Vec<PrimitiveTestimonial>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			testimonial_translation::table
				.filter(testimonial_translation::testimonial_id.eq_any(&ids))
				.order(testimonial_translation::id.asc())
				.select(TestimonialTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.testimonial_id, t)),
		);

		let avatars = load_media(rows.iter().filter_map(|r| r.avatar_id), conn)?;
		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let testimonials = rows
			.into_iter()
			.map(|primitive| {
				let translations =
					translations.remove(&primitive.id).unwrap_or_default();
				let avatar = primitive.avatar_id.and_then(|id| avatars.get(&id).cloned());
				let audit = Audit::resolve(
					primitive.created_by,
					primitive.updated_by,
					&users,
				);

				Self { primitive, translations, avatar, audit }
			})
			.collect();

		Ok(testimonials)
	}

	/// Get a single [`Testimonial`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		testimonial_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let testimonial = conn
			.interact(move |conn| {
				let row = scoped!(testimonial::table.into_boxed(), testimonial, scope)
					.filter(testimonial::id.eq(testimonial_id))
					.select(PrimitiveTestimonial::as_select())
					.first(conn)
					.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut f| f.pop())
			})
			.await??;

		testimonial.ok_or_else(|| {
			Error::NotFound(format!("testimonial with id {testimonial_id}"))
		})
	}

	/// Get all [`Testimonial`]s visible in the given scope
	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, testimonials) = conn
			.interact(move |conn| {
				let total: i64 =
					scoped!(testimonial::table.into_boxed(), testimonial, scope)
						.count()
						.get_result(conn)?;

				let mut query =
					scoped!(testimonial::table.into_boxed(), testimonial, scope)
						.order((testimonial::sort_order.asc(), testimonial::id.asc()))
						.select(PrimitiveTestimonial::as_select());

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows = query.load(conn)?;
				let testimonials = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, testimonials))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, testimonials))
	}

	/// Soft delete a [`Testimonial`], its translations stay in place
	#[instrument(skip(conn))]
	pub async fn soft_delete(
		testimonial_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					testimonial::table
						.filter(testimonial::id.eq(testimonial_id))
						.filter(testimonial::deleted_at.is_null()),
				)
				.set((
					testimonial::deleted_at.eq(now),
					testimonial::is_active.eq(false),
					testimonial::updated_at.eq(now),
					testimonial::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("testimonial with id {testimonial_id}")));
		}

		info!("soft-deleted testimonial {testimonial_id}");

		Ok(())
	}

	/// Bring a soft-deleted [`Testimonial`] back
	#[instrument(skip(conn))]
	pub async fn restore(
		testimonial_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					testimonial::table
						.filter(testimonial::id.eq(testimonial_id))
						.filter(testimonial::deleted_at.is_not_null()),
				)
				.set((
					testimonial::deleted_at.eq(None::<NaiveDateTime>),
					testimonial::is_active.eq(true),
					testimonial::updated_at.eq(Utc::now().naive_utc()),
					testimonial::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"deleted testimonial with id {testimonial_id}"
			)));
		}

		info!("restored testimonial {testimonial_id}");

		Self::get_by_id(testimonial_id, Scope::Admin, conn).await
	}
}

models_common::upsert_translations!(
	testimonial_translation,
	testimonial_id,
	TestimonialFields
);

#[derive(Clone, Debug)]
pub struct NewTestimonial {
	pub author_name:  String,
	pub author_role:  Option<String>,
	pub company:      Option<String>,
	pub rating:       i32,
	pub avatar_id:    Option<i32>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: TranslationSet<TestimonialFields>,
	pub created_by:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = testimonial)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewTestimonial {
	author_name: String,
	author_role: Option<String>,
	company:     Option<String>,
	rating:      i32,
	avatar_id:   Option<i32>,
	sort_order:  i32,
	is_active:   bool,
	created_at:  NaiveDateTime,
	created_by:  i32,
	updated_at:  NaiveDateTime,
}

impl NewTestimonial {
	/// Insert this [`NewTestimonial`] and all of its translations
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Testimonial, Error> {
		let testimonial_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					require_media(self.avatar_id, conn)?;

					let now = Utc::now().naive_utc();

					let new_testimonial = InsertableNewTestimonial {
						author_name: self.author_name,
						author_role: self.author_role,
						company:     self.company,
						rating:      self.rating,
						avatar_id:   self.avatar_id,
						sort_order:  self.sort_order,
						is_active:   self.is_active,
						created_at:  now,
						created_by:  self.created_by,
						updated_at:  now,
					};

					let testimonial_id = diesel::insert_into(testimonial::table)
						.values(new_testimonial)
						.returning(testimonial::id)
						.get_result(conn)?;

					upsert_translations(testimonial_id, self.translations.iter(), conn)?;

					Ok(testimonial_id)
				})
			})
			.await??;

		let testimonial = Testimonial::get_by_id(testimonial_id, Scope::Admin, conn).await?;

		info!("created testimonial {testimonial_id}");

		Ok(testimonial)
	}
}

#[derive(Clone, Debug)]
pub struct TestimonialUpdate {
	pub author_name:  Option<String>,
	pub author_role:  Option<Option<String>>,
	pub company:      Option<Option<String>>,
	pub rating:       Option<i32>,
	pub avatar_id:    Option<Option<i32>>,
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	pub translations: Translations<TestimonialFields>,
	pub updated_by:   i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = testimonial)]
#[diesel(check_for_backend(Sqlite))]
struct TestimonialChangeset {
	author_name: Option<String>,
	author_role: Option<Option<String>>,
	company:     Option<Option<String>>,
	rating:      Option<i32>,
	avatar_id:   Option<Option<i32>>,
	sort_order:  Option<i32>,
	is_active:   Option<bool>,
	updated_at:  NaiveDateTime,
	updated_by:  Option<i32>,
}

impl TestimonialUpdate {
	/// Apply this update to the [`Testimonial`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		testimonial_id: i32,
		conn: &DbConn,
	) -> Result<Testimonial, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = TestimonialChangeset {
					author_name: self.author_name,
					author_role: self.author_role,
					company:     self.company,
					rating:      self.rating,
					avatar_id:   self.avatar_id,
					sort_order:  self.sort_order,
					is_active:   self.is_active,
					updated_at:  Utc::now().naive_utc(),
					updated_by:  Some(self.updated_by),
				};

				let updated = diesel::update(
					testimonial::table
						.filter(testimonial::id.eq(testimonial_id))
						.filter(testimonial::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"testimonial with id {testimonial_id}"
					)));
				}

				if let Some(avatar_id) = self.avatar_id {
					require_media(avatar_id, conn)?;
				}

				upsert_translations(
					testimonial_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let testimonial = Testimonial::get_by_id(testimonial_id, Scope::Admin, conn).await?;

		info!("updated testimonial {testimonial_id}");

		Ok(testimonial)
	}
}
