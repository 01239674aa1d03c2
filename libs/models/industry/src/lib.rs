#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{LineItemKind, industry, industry_translation};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use line_item::{LineItem, NewLineItem};
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
	IndustryFields,
	IndustryTranslation,
	PrimitiveIndustry,
	PrimitiveMedia,
};
use translation::{TranslationSet, Translations};

const LINE_ITEM_KINDS: [LineItemKind; 2] =
	[LineItemKind::IndustryProblem, LineItemKind::IndustrySolution];

/// An industry page with its problems and the matching solutions
#[derive(Clone, Debug)]
pub struct Industry {
	pub primitive:    PrimitiveIndustry,
	pub translations: Vec<IndustryTranslation>,
	pub image:        Option<PrimitiveMedia>,
	pub problems:     Vec<LineItem>,
	pub solutions:    Vec<LineItem>,
	pub audit:        Audit,
}

impl Industry {
	fn hydrate(
		rows: Vec<PrimitiveIndustry>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			industry_translation::table
				.filter(industry_translation::industry_id.eq_any(&ids))
				.order(industry_translation::id.asc())
				.select(IndustryTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.industry_id, t)),
		);

		let mut items = LineItem::load_for(&LINE_ITEM_KINDS, &ids, conn)?;
		let images = load_media(rows.iter().filter_map(|r| r.image_id), conn)?;
		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let industries = rows
			.into_iter()
			.map(|primitive| {
				let id = primitive.id;
				let translations = translations.remove(&id).unwrap_or_default();
				let image =
					primitive.image_id.and_then(|id| images.get(&id).cloned());
				let problems = items
					.remove(&(LineItemKind::IndustryProblem, id))
					.unwrap_or_default();
				let solutions = items
					.remove(&(LineItemKind::IndustrySolution, id))
					.unwrap_or_default();
				let audit = Audit::resolve(
					primitive.created_by,
					primitive.updated_by,
					&users,
				);

				Self { primitive, translations, image, problems, solutions, audit }
			})
			.collect();

		Ok(industries)
	}

	/// Get a single [`Industry`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		industry_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let industry = conn
			.interact(move |conn| {
				let row = scoped!(industry::table.into_boxed(), industry, scope)
					.filter(industry::id.eq(industry_id))
					.select(PrimitiveIndustry::as_select())
					.first(conn)
					.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut i| i.pop())
			})
			.await??;

		industry.ok_or_else(|| {
			Error::NotFound(format!("industry with id {industry_id}"))
		})
	}

	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, industries) = conn
			.interact(move |conn| {
				let total: i64 =
					scoped!(industry::table.into_boxed(), industry, scope)
						.count()
						.get_result(conn)?;

				let mut query =
					scoped!(industry::table.into_boxed(), industry, scope)
						.order((industry::sort_order.asc(), industry::id.asc()))
						.select(PrimitiveIndustry::as_select());

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows = query.load(conn)?;
				let industries = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, industries))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, industries))
	}

	/// Soft delete an [`Industry`], its line items stay attached
	#[instrument(skip(conn))]
	pub async fn soft_delete(
		industry_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					industry::table
						.filter(industry::id.eq(industry_id))
						.filter(industry::deleted_at.is_null()),
				)
				.set((
					industry::deleted_at.eq(now),
					industry::is_active.eq(false),
					industry::updated_at.eq(now),
					industry::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"industry with id {industry_id}"
			)));
		}

		info!("soft-deleted industry {industry_id}");

		Ok(())
	}

	#[instrument(skip(conn))]
	pub async fn restore(
		industry_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					industry::table
						.filter(industry::id.eq(industry_id))
						.filter(industry::deleted_at.is_not_null()),
				)
				.set((
					industry::deleted_at.eq(None::<NaiveDateTime>),
					industry::is_active.eq(true),
					industry::updated_at.eq(Utc::now().naive_utc()),
					industry::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"deleted industry with id {industry_id}"
			)));
		}

		info!("restored industry {industry_id}");

		Self::get_by_id(industry_id, Scope::Admin, conn).await
	}
}

models_common::upsert_translations!(
	industry_translation,
	industry_id,
	IndustryFields
);

#[derive(Clone, Debug)]
pub struct NewIndustry {
	pub slug:         String,
	pub image_id:     Option<i32>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: TranslationSet<IndustryFields>,
	pub problems:     Vec<NewLineItem>,
	pub solutions:    Vec<NewLineItem>,
	pub created_by:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = industry)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewIndustry {
	slug:       String,
	image_id:   Option<i32>,
	sort_order: i32,
	is_active:  bool,
	created_at: NaiveDateTime,
	created_by: i32,
	updated_at: NaiveDateTime,
}

impl NewIndustry {
	/// Insert this [`NewIndustry`] together with its translations and inline
	/// line items
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Industry, Error> {
		let industry_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					require_media(self.image_id, conn)?;

					let now = Utc::now().naive_utc();

					let new_industry = InsertableNewIndustry {
						slug:       self.slug,
						image_id:   self.image_id,
						sort_order: self.sort_order,
						is_active:  self.is_active,
						created_at: now,
						created_by: self.created_by,
						updated_at: now,
					};

					let industry_id = diesel::insert_into(industry::table)
						.values(new_industry)
						.returning(industry::id)
						.get_result(conn)?;

					upsert_translations(industry_id, self.translations.iter(), conn)?;

					for problem in &self.problems {
						problem.insert_with(
							LineItemKind::IndustryProblem,
							industry_id,
							conn,
						)?;
					}

					for solution in &self.solutions {
						solution.insert_with(
							LineItemKind::IndustrySolution,
							industry_id,
							conn,
						)?;
					}

					Ok(industry_id)
				})
			})
			.await??;

		let industry = Industry::get_by_id(industry_id, Scope::Admin, conn).await?;

		info!("created industry {industry_id}");

		Ok(industry)
	}
}

#[derive(Clone, Debug)]
pub struct IndustryUpdate {
	pub slug:         Option<String>,
	pub image_id:     Option<Option<i32>>,
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	pub translations: Translations<IndustryFields>,
	pub updated_by:   i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = industry)]
#[diesel(check_for_backend(Sqlite))]
struct IndustryChangeset {
	slug:       Option<String>,
	image_id:   Option<Option<i32>>,
	sort_order: Option<i32>,
	is_active:  Option<bool>,
	updated_at: NaiveDateTime,
	updated_by: Option<i32>,
}

impl IndustryUpdate {
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		industry_id: i32,
		conn: &DbConn,
	) -> Result<Industry, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = IndustryChangeset {
					slug:       self.slug,
					image_id:   self.image_id,
					sort_order: self.sort_order,
					is_active:  self.is_active,
					updated_at: Utc::now().naive_utc(),
					updated_by: Some(self.updated_by),
				};

				let updated = diesel::update(
					industry::table
						.filter(industry::id.eq(industry_id))
						.filter(industry::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"industry with id {industry_id}"
					)));
				}

				if let Some(image_id) = self.image_id {
					require_media(image_id, conn)?;
				}

				upsert_translations(
					industry_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let industry = Industry::get_by_id(industry_id, Scope::Admin, conn).await?;

		info!("updated industry {industry_id}");

		Ok(industry)
	}
}
