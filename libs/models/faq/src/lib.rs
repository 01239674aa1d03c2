#[macro_use]
extern crate tracing;

use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{faq, faq_category, faq_translation};
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
use primitives::{FaqFields, FaqTranslation, PrimitiveFaq, PrimitiveFaqCategory};
use translation::{TranslationSet, Translations};

mod category;

pub use category::*;

/// A question and answer pair with its (non-deleted) category
#[derive(Clone, Debug)]
pub struct Faq {
	pub primitive:    PrimitiveFaq,
	pub translations: Vec<FaqTranslation>,
	pub category:     Option<FaqCategory>,
	pub audit:        Audit,
}

/// Narrows a FAQ listing
#[derive(Clone, Debug, Default)]
pub struct FaqFilter {
	/// Only FAQs in the category with this slug
	pub category: Option<String>,
}

impl Faq {
	fn hydrate(
		rows: Vec<PrimitiveFaq>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			faq_translation::table
				.filter(faq_translation::faq_id.eq_any(&ids))
				.order(faq_translation::id.asc())
				.select(FaqTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.faq_id, t)),
		);

		let category_ids: Vec<i32> =
			rows.iter().filter_map(|r| r.category_id).collect();

		let categories: HashMap<i32, FaqCategory> = if category_ids.is_empty() {
			HashMap::new()
		} else {
			let category_rows = faq_category::table
				.filter(faq_category::id.eq_any(&category_ids))
				.filter(faq_category::deleted_at.is_null())
				.select(PrimitiveFaqCategory::as_select())
				.load(conn)?;

			FaqCategory::hydrate(category_rows, conn)?
				.into_iter()
				.map(|c| (c.primitive.id, c))
				.collect()
		};

		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let faqs = rows
			.into_iter()
			.map(|primitive| {
				let translations =
					translations.remove(&primitive.id).unwrap_or_default();
				let category =
					primitive.category_id.and_then(|id| categories.get(&id).cloned());
				let audit = Audit::resolve(
					primitive.created_by,
					primitive.updated_by,
					&users,
				);

				Self { primitive, translations, category, audit }
			})
			.collect();

		Ok(faqs)
	}

	/// Get a single [`Faq`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		faq_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let faq = conn
			.interact(move |conn| {
				let row = scoped!(faq::table.into_boxed(), faq, scope)
					.filter(faq::id.eq(faq_id))
					.select(PrimitiveFaq::as_select())
					.first(conn)
					.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut f| f.pop())
			})
			.await??;

		faq.ok_or_else(|| Error::NotFound(format!("faq with id {faq_id}")))
	}

	/// Get all [`Faq`]s visible in the given scope, optionally limited to a
	/// single category
	///
	/// An unknown category slug yields an empty list
	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		filter: FaqFilter,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, faqs) = conn
			.interact(move |conn| {
				let in_category = match &filter.category {
					Some(slug) => Some(faq_ids_in_category(slug, conn)?),
					None => None,
				};

				let mut count_query = scoped!(faq::table.into_boxed(), faq, scope);
				let mut query = scoped!(faq::table.into_boxed(), faq, scope)
					.order((faq::sort_order.asc(), faq::id.asc()));

				if let Some(ids) = in_category {
					count_query = count_query.filter(faq::id.eq_any(ids.clone()));
					query = query.filter(faq::id.eq_any(ids));
				}

				let total: i64 = count_query.count().get_result(conn)?;

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows = query.select(PrimitiveFaq::as_select()).load(conn)?;
				let faqs = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, faqs))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, faqs))
	}

	#[instrument(skip(conn))]
	pub async fn soft_delete(
		faq_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					faq::table
						.filter(faq::id.eq(faq_id))
						.filter(faq::deleted_at.is_null()),
				)
				.set((
					faq::deleted_at.eq(now),
					faq::is_active.eq(false),
					faq::updated_at.eq(now),
					faq::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("faq with id {faq_id}")));
		}

		info!("soft-deleted faq {faq_id}");

		Ok(())
	}

	#[instrument(skip(conn))]
	pub async fn restore(
		faq_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					faq::table
						.filter(faq::id.eq(faq_id))
						.filter(faq::deleted_at.is_not_null()),
				)
				.set((
					faq::deleted_at.eq(None::<NaiveDateTime>),
					faq::is_active.eq(true),
					faq::updated_at.eq(Utc::now().naive_utc()),
					faq::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("deleted faq with id {faq_id}")));
		}

		info!("restored faq {faq_id}");

		Self::get_by_id(faq_id, Scope::Admin, conn).await
	}
}

models_common::upsert_translations!(faq_translation, faq_id, FaqFields);

#[derive(Clone, Debug)]
pub struct NewFaq {
	pub category_id:  Option<i32>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: TranslationSet<FaqFields>,
	pub created_by:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = faq)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewFaq {
	category_id: Option<i32>,
	sort_order:  i32,
	is_active:   bool,
	created_at:  NaiveDateTime,
	created_by:  i32,
	updated_at:  NaiveDateTime,
}

impl NewFaq {
	/// Insert this [`NewFaq`] and all of its translations
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Faq, Error> {
		let faq_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					require_category(self.category_id, conn)?;

					let now = Utc::now().naive_utc();

					let new_faq = InsertableNewFaq {
						category_id: self.category_id,
						sort_order:  self.sort_order,
						is_active:   self.is_active,
						created_at:  now,
						created_by:  self.created_by,
						updated_at:  now,
					};

					let faq_id = diesel::insert_into(faq::table)
						.values(new_faq)
						.returning(faq::id)
						.get_result(conn)?;

					upsert_translations(faq_id, self.translations.iter(), conn)?;

					Ok(faq_id)
				})
			})
			.await??;

		let faq = Faq::get_by_id(faq_id, Scope::Admin, conn).await?;

		info!("created faq {faq_id}");

		Ok(faq)
	}
}

#[derive(Clone, Debug)]
pub struct FaqUpdate {
	pub category_id:  Option<Option<i32>>,
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	pub translations: Translations<FaqFields>,
	pub updated_by:   i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = faq)]
#[diesel(check_for_backend(Sqlite))]
struct FaqChangeset {
	category_id: Option<Option<i32>>,
	sort_order:  Option<i32>,
	is_active:   Option<bool>,
	updated_at:  NaiveDateTime,
	updated_by:  Option<i32>,
}

impl FaqUpdate {
	#[instrument(skip(conn))]
	pub async fn apply_to(self, faq_id: i32, conn: &DbConn) -> Result<Faq, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = FaqChangeset {
					category_id: self.category_id,
					sort_order:  self.sort_order,
					is_active:   self.is_active,
					updated_at:  Utc::now().naive_utc(),
					updated_by:  Some(self.updated_by),
				};

				let updated = diesel::update(
					faq::table
						.filter(faq::id.eq(faq_id))
						.filter(faq::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!("faq with id {faq_id}")));
				}

				if let Some(category_id) = self.category_id {
					require_category(category_id, conn)?;
				}

				upsert_translations(
					faq_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let faq = Faq::get_by_id(faq_id, Scope::Admin, conn).await?;

		info!("updated faq {faq_id}");

		Ok(faq)
	}
}
