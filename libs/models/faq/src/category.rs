use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{faq, faq_category, faq_category_translation};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use models_common::{
	Audit,
	PaginatedData,
	PaginationConfig,
	Scope,
	group_by_owner,
	load_user_summaries,
	scoped,
};
use primitives::{
	FaqCategoryFields,
	FaqCategoryTranslation,
	PrimitiveFaqCategory,
};
use translation::{TranslationSet, Translations};

/// A group of FAQs, identified publicly by its slug
#[derive(Clone, Debug)]
pub struct FaqCategory {
	pub primitive:    PrimitiveFaqCategory,
	pub translations: Vec<FaqCategoryTranslation>,
	pub audit:        Audit,
}

impl FaqCategory {
	pub(crate) fn hydrate(
		rows: Vec<PrimitiveFaqCategory>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			faq_category_translation::table
				.filter(faq_category_translation::faq_category_id.eq_any(&ids))
				.order(faq_category_translation::id.asc())
				.select(FaqCategoryTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.faq_category_id, t)),
		);

		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let categories = rows
			.into_iter()
			.map(|primitive| {
				let translations =
					translations.remove(&primitive.id).unwrap_or_default();
				let audit = Audit::resolve(
					primitive.created_by,
					primitive.updated_by,
					&users,
				);

				Self { primitive, translations, audit }
			})
			.collect();

		Ok(categories)
	}

	/// Get a single [`FaqCategory`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		category_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let category = conn
			.interact(move |conn| {
				let row =
					scoped!(faq_category::table.into_boxed(), faq_category, scope)
						.filter(faq_category::id.eq(category_id))
						.select(PrimitiveFaqCategory::as_select())
						.first(conn)
						.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut c| c.pop())
			})
			.await??;

		category.ok_or_else(|| {
			Error::NotFound(format!("faq category with id {category_id}"))
		})
	}

	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, categories) = conn
			.interact(move |conn| {
				let total: i64 =
					scoped!(faq_category::table.into_boxed(), faq_category, scope)
						.count()
						.get_result(conn)?;

				let mut query =
					scoped!(faq_category::table.into_boxed(), faq_category, scope)
						.order((
							faq_category::sort_order.asc(),
							faq_category::id.asc(),
						))
						.select(PrimitiveFaqCategory::as_select());

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows = query.load(conn)?;
				let categories = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, categories))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, categories))
	}

	/// Soft delete a [`FaqCategory`]
	///
	/// FAQs in the category keep pointing at it and show up without a
	/// category until it is restored
	#[instrument(skip(conn))]
	pub async fn soft_delete(
		category_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					faq_category::table
						.filter(faq_category::id.eq(category_id))
						.filter(faq_category::deleted_at.is_null()),
				)
				.set((
					faq_category::deleted_at.eq(now),
					faq_category::is_active.eq(false),
					faq_category::updated_at.eq(now),
					faq_category::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"faq category with id {category_id}"
			)));
		}

		info!("soft-deleted faq category {category_id}");

		Ok(())
	}

	#[instrument(skip(conn))]
	pub async fn restore(
		category_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					faq_category::table
						.filter(faq_category::id.eq(category_id))
						.filter(faq_category::deleted_at.is_not_null()),
				)
				.set((
					faq_category::deleted_at.eq(None::<NaiveDateTime>),
					faq_category::is_active.eq(true),
					faq_category::updated_at.eq(Utc::now().naive_utc()),
					faq_category::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"deleted faq category with id {category_id}"
			)));
		}

		info!("restored faq category {category_id}");

		Self::get_by_id(category_id, Scope::Admin, conn).await
	}
}

/// Make sure a referenced category exists and is not deleted
pub(crate) fn require_category(
	category_id: Option<i32>,
	conn: &mut SqliteConnection,
) -> Result<(), Error> {
	let Some(category_id) = category_id else {
		return Ok(());
	};

	let exists: bool = diesel::select(diesel::dsl::exists(
		faq_category::table
			.filter(faq_category::id.eq(category_id))
			.filter(faq_category::deleted_at.is_null()),
	))
	.get_result(conn)?;

	if !exists {
		return Err(Error::NotFound(format!(
			"faq category with id {category_id}"
		)));
	}

	Ok(())
}

/// Ids of the FAQs in the non-deleted category with the given slug
pub(crate) fn faq_ids_in_category(
	slug: &str,
	conn: &mut SqliteConnection,
) -> QueryResult<Vec<i32>> {
	faq::table
		.inner_join(faq_category::table)
		.filter(faq_category::slug.eq(slug))
		.filter(faq_category::deleted_at.is_null())
		.select(faq::id)
		.load(conn)
}

models_common::upsert_translations!(
	faq_category_translation,
	faq_category_id,
	FaqCategoryFields
);

#[derive(Clone, Debug)]
pub struct NewFaqCategory {
	pub slug:         String,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: TranslationSet<FaqCategoryFields>,
	pub created_by:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = faq_category)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewFaqCategory {
	slug:       String,
	sort_order: i32,
	is_active:  bool,
	created_at: NaiveDateTime,
	created_by: i32,
	updated_at: NaiveDateTime,
}

impl NewFaqCategory {
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<FaqCategory, Error> {
		let category_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let now = Utc::now().naive_utc();

					let new_category = InsertableNewFaqCategory {
						slug:       self.slug,
						sort_order: self.sort_order,
						is_active:  self.is_active,
						created_at: now,
						created_by: self.created_by,
						updated_at: now,
					};

					let category_id = diesel::insert_into(faq_category::table)
						.values(new_category)
						.returning(faq_category::id)
						.get_result(conn)?;

					upsert_translations(
						category_id,
						self.translations.iter(),
						conn,
					)?;

					Ok(category_id)
				})
			})
			.await??;

		let category =
			FaqCategory::get_by_id(category_id, Scope::Admin, conn).await?;

		info!("created faq category {category_id}");

		Ok(category)
	}
}

#[derive(Clone, Debug)]
pub struct FaqCategoryUpdate {
	pub slug:         Option<String>,
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	pub translations: Translations<FaqCategoryFields>,
	pub updated_by:   i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = faq_category)]
#[diesel(check_for_backend(Sqlite))]
struct FaqCategoryChangeset {
	slug:       Option<String>,
	sort_order: Option<i32>,
	is_active:  Option<bool>,
	updated_at: NaiveDateTime,
	updated_by: Option<i32>,
}

impl FaqCategoryUpdate {
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		category_id: i32,
		conn: &DbConn,
	) -> Result<FaqCategory, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = FaqCategoryChangeset {
					slug:       self.slug,
					sort_order: self.sort_order,
					is_active:  self.is_active,
					updated_at: Utc::now().naive_utc(),
					updated_by: Some(self.updated_by),
				};

				let updated = diesel::update(
					faq_category::table
						.filter(faq_category::id.eq(category_id))
						.filter(faq_category::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"faq category with id {category_id}"
					)));
				}

				upsert_translations(
					category_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let category =
			FaqCategory::get_by_id(category_id, Scope::Admin, conn).await?;

		info!("updated faq category {category_id}");

		Ok(category)
	}
}
