#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{about_card, about_card_translation};
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
	AboutCardFields,
	AboutCardTranslation,
	PrimitiveAboutCard,
	PrimitiveMedia,
};
use translation::{TranslationSet, Translations};

/// An about card together with its translations, image and audit users
#[derive(Clone, Debug)]
pub struct AboutCard {
	pub primitive:    PrimitiveAboutCard,
	pub translations: Vec<AboutCardTranslation>,
	pub image:        Option<PrimitiveMedia>,
	pub audit:        Audit,
}

impl AboutCard {
	fn hydrate(
		rows: Vec<PrimitiveAboutCard>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			about_card_translation::table
				.filter(about_card_translation::about_card_id.eq_any(&ids))
				.order(about_card_translation::id.asc())
				.select(AboutCardTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.about_card_id, t)),
		);

		let images = load_media(rows.iter().filter_map(|r| r.image_id), conn)?;
		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let about_cards = rows
			.into_iter()
			.map(|primitive| {
				let translations =
					translations.remove(&primitive.id).unwrap_or_default();
				let image = primitive.image_id.and_then(|id| images.get(&id).cloned());
				let audit = Audit::resolve(
					primitive.created_by,
					primitive.updated_by,
					&users,
				);

				Self { primitive, translations, image, audit }
			})
			.collect();

		Ok(about_cards)
	}

	/// Get a single [`AboutCard`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		about_card_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let about_card = conn
			.interact(move |conn| {
				let row = scoped!(about_card::table.into_boxed(), about_card, scope)
					.filter(about_card::id.eq(about_card_id))
					.select(PrimitiveAboutCard::as_select())
					.first(conn)
					.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut f| f.pop())
			})
			.await??;

		about_card.ok_or_else(|| {
			Error::NotFound(format!("about card with id {about_card_id}"))
		})
	}

	/// Get all [`AboutCard`]s visible in the given scope, ordered by their sort
	/// order
	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, about_cards) = conn
			.interact(move |conn| {
				let total: i64 =
					scoped!(about_card::table.into_boxed(), about_card, scope)
						.count()
						.get_result(conn)?;

				let mut query =
					scoped!(about_card::table.into_boxed(), about_card, scope)
						.order((about_card::sort_order.asc(), about_card::id.asc()))
						.select(PrimitiveAboutCard::as_select());

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows = query.load(conn)?;
				let about_cards = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, about_cards))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, about_cards))
	}

	/// Soft delete an [`AboutCard`]
	#[instrument(skip(conn))]
	pub async fn soft_delete(
		about_card_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					about_card::table
						.filter(about_card::id.eq(about_card_id))
						.filter(about_card::deleted_at.is_null()),
				)
				.set((
					about_card::deleted_at.eq(now),
					about_card::is_active.eq(false),
					about_card::updated_at.eq(now),
					about_card::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("about card with id {about_card_id}")));
		}

		info!("soft-deleted about card {about_card_id}");

		Ok(())
	}

	/// Bring a soft-deleted [`AboutCard`] back
	#[instrument(skip(conn))]
	pub async fn restore(
		about_card_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					about_card::table
						.filter(about_card::id.eq(about_card_id))
						.filter(about_card::deleted_at.is_not_null()),
				)
				.set((
					about_card::deleted_at.eq(None::<NaiveDateTime>),
					about_card::is_active.eq(true),
					about_card::updated_at.eq(Utc::now().naive_utc()),
					about_card::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"deleted about card with id {about_card_id}"
			)));
		}

		info!("restored about card {about_card_id}");

		Self::get_by_id(about_card_id, Scope::Admin, conn).await
	}
}

models_common::upsert_translations!(
	about_card_translation,
	about_card_id,
	AboutCardFields
);

#[derive(Clone, Debug)]
pub struct NewAboutCard {
	pub image_id:     Option<i32>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: TranslationSet<AboutCardFields>,
	pub created_by:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = about_card)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewAboutCard {
	image_id:   Option<i32>,
	sort_order: i32,
	is_active:  bool,
	created_at: NaiveDateTime,
	created_by: i32,
	updated_at: NaiveDateTime,
}

impl NewAboutCard {
	/// Insert this [`NewAboutCard`] and all of its translations
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<AboutCard, Error> {
		let about_card_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					require_media(self.image_id, conn)?;

					let now = Utc::now().naive_utc();

					let new_about_card = InsertableNewAboutCard {
						image_id:   self.image_id,
						sort_order: self.sort_order,
						is_active:  self.is_active,
						created_at: now,
						created_by: self.created_by,
						updated_at: now,
					};

					let about_card_id = diesel::insert_into(about_card::table)
						.values(new_about_card)
						.returning(about_card::id)
						.get_result(conn)?;

					upsert_translations(about_card_id, self.translations.iter(), conn)?;

					Ok(about_card_id)
				})
			})
			.await??;

		let about_card = AboutCard::get_by_id(about_card_id, Scope::Admin, conn).await?;

		info!("created about card {about_card_id}");

		Ok(about_card)
	}
}

#[derive(Clone, Debug)]
pub struct AboutCardUpdate {
	pub image_id:     Option<Option<i32>>,
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	pub translations: Translations<AboutCardFields>,
	pub updated_by:   i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = about_card)]
#[diesel(check_for_backend(Sqlite))]
struct AboutCardChangeset {
	image_id:   Option<Option<i32>>,
	sort_order: Option<i32>,
	is_active:  Option<bool>,
	updated_at: NaiveDateTime,
	updated_by: Option<i32>,
}

impl AboutCardUpdate {
	/// Apply this update to the [`AboutCard`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		about_card_id: i32,
		conn: &DbConn,
	) -> Result<AboutCard, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = AboutCardChangeset {
					image_id:   self.image_id,
					sort_order: self.sort_order,
					is_active:  self.is_active,
					updated_at: Utc::now().naive_utc(),
					updated_by: Some(self.updated_by),
				};

				let updated = diesel::update(
					about_card::table
						.filter(about_card::id.eq(about_card_id))
						.filter(about_card::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"about card with id {about_card_id}"
					)));
				}

				if let Some(image_id) = self.image_id {
					require_media(image_id, conn)?;
				}

				upsert_translations(
					about_card_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let about_card = AboutCard::get_by_id(about_card_id, Scope::Admin, conn).await?;

		info!("updated about card {about_card_id}");

		Ok(about_card)
	}
}
