#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{feature, feature_translation};
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
	FeatureFields,
	FeatureTranslation,
	PrimitiveFeature,
	PrimitiveMedia,
};
use translation::{TranslationSet, Translations};

/// A feature highlight together with its translations, icon and audit users
#[derive(Clone, Debug)]
pub struct Feature {
	pub primitive:    PrimitiveFeature,
	pub translations: Vec<FeatureTranslation>,
	pub icon:         Option<PrimitiveMedia>,
	pub audit:        Audit,
}

impl Feature {
	/// Attach translations, icons and audit users to a batch of rows
	fn hydrate(
		rows: Vec<PrimitiveFeature>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			feature_translation::table
				.filter(feature_translation::feature_id.eq_any(&ids))
				.order(feature_translation::id.asc())
				.select(FeatureTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.feature_id, t)),
		);

		let icons = load_media(rows.iter().filter_map(|r| r.icon_id), conn)?;
		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let features = rows
			.into_iter()
			.map(|primitive| {
				let translations =
					translations.remove(&primitive.id).unwrap_or_default();
				let icon = primitive.icon_id.and_then(|id| icons.get(&id).cloned());
				let audit = Audit::resolve(
					primitive.created_by,
					primitive.updated_by,
					&users,
				);

				Self { primitive, translations, icon, audit }
			})
			.collect();

		Ok(features)
	}

	/// Get a single [`Feature`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		feature_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let feature = conn
			.interact(move |conn| {
				let row = scoped!(feature::table.into_boxed(), feature, scope)
					.filter(feature::id.eq(feature_id))
					.select(PrimitiveFeature::as_select())
					.first(conn)
					.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut f| f.pop())
			})
			.await??;

		feature.ok_or_else(|| {
			Error::NotFound(format!("feature with id {feature_id}"))
		})
	}

	/// Get all [`Feature`]s visible in the given scope, ordered by their sort
	/// order
	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, features) = conn
			.interact(move |conn| {
				let total: i64 =
					scoped!(feature::table.into_boxed(), feature, scope)
						.count()
						.get_result(conn)?;

				let mut query =
					scoped!(feature::table.into_boxed(), feature, scope)
						.order((feature::sort_order.asc(), feature::id.asc()))
						.select(PrimitiveFeature::as_select());

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows = query.load(conn)?;
				let features = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, features))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, features))
	}

	/// Soft delete a [`Feature`], its translations stay in place
	#[instrument(skip(conn))]
	pub async fn soft_delete(
		feature_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					feature::table
						.filter(feature::id.eq(feature_id))
						.filter(feature::deleted_at.is_null()),
				)
				.set((
					feature::deleted_at.eq(now),
					feature::is_active.eq(false),
					feature::updated_at.eq(now),
					feature::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("feature with id {feature_id}")));
		}

		info!("soft-deleted feature {feature_id}");

		Ok(())
	}

	/// Bring a soft-deleted [`Feature`] back
	#[instrument(skip(conn))]
	pub async fn restore(
		feature_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					feature::table
						.filter(feature::id.eq(feature_id))
						.filter(feature::deleted_at.is_not_null()),
				)
				.set((
					feature::deleted_at.eq(None::<NaiveDateTime>),
					feature::is_active.eq(true),
					feature::updated_at.eq(Utc::now().naive_utc()),
					feature::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"deleted feature with id {feature_id}"
			)));
		}

		info!("restored feature {feature_id}");

		Self::get_by_id(feature_id, Scope::Admin, conn).await
	}
}

models_common::upsert_translations!(
	feature_translation,
	feature_id,
	FeatureFields
);

#[derive(Clone, Debug)]
pub struct NewFeature {
	pub icon_id:      Option<i32>,
	pub sort_order:   i32,
	pub is_active:    bool,
	pub translations: TranslationSet<FeatureFields>,
	pub created_by:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = feature)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewFeature {
	icon_id:    Option<i32>,
	sort_order: i32,
	is_active:  bool,
	created_at: NaiveDateTime,
	created_by: i32,
	updated_at: NaiveDateTime,
}

impl NewFeature {
	/// Insert this [`NewFeature`] and all of its translations
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Feature, Error> {
		let feature_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					require_media(self.icon_id, conn)?;

					let now = Utc::now().naive_utc();

					let new_feature = InsertableNewFeature {
						icon_id:    self.icon_id,
						sort_order: self.sort_order,
						is_active:  self.is_active,
						created_at: now,
						created_by: self.created_by,
						updated_at: now,
					};

					let feature_id = diesel::insert_into(feature::table)
						.values(new_feature)
						.returning(feature::id)
						.get_result(conn)?;

					upsert_translations(feature_id, self.translations.iter(), conn)?;

					Ok(feature_id)
				})
			})
			.await??;

		let feature = Feature::get_by_id(feature_id, Scope::Admin, conn).await?;

		info!("created feature {feature_id}");

		Ok(feature)
	}
}

#[derive(Clone, Debug)]
pub struct FeatureUpdate {
	pub icon_id:      Option<Option<i32>>,
	pub sort_order:   Option<i32>,
	pub is_active:    Option<bool>,
	pub translations: Translations<FeatureFields>,
	pub updated_by:   i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = feature)]
#[diesel(check_for_backend(Sqlite))]
struct FeatureChangeset {
	icon_id:    Option<Option<i32>>,
	sort_order: Option<i32>,
	is_active:  Option<bool>,
	updated_at: NaiveDateTime,
	updated_by: Option<i32>,
}

impl FeatureUpdate {
	/// Apply this update to the [`Feature`] with the given id
	///
	/// Scalar changes and translation upserts share one transaction
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		feature_id: i32,
		conn: &DbConn,
	) -> Result<Feature, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = FeatureChangeset {
					icon_id:    self.icon_id,
					sort_order: self.sort_order,
					is_active:  self.is_active,
					updated_at: Utc::now().naive_utc(),
					updated_by: Some(self.updated_by),
				};

				let updated = diesel::update(
					feature::table
						.filter(feature::id.eq(feature_id))
						.filter(feature::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"feature with id {feature_id}"
					)));
				}

				if let Some(icon_id) = self.icon_id {
					require_media(icon_id, conn)?;
				}

				upsert_translations(
					feature_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let feature = Feature::get_by_id(feature_id, Scope::Admin, conn).await?;

		info!("updated feature {feature_id}");

		Ok(feature)
	}
}
