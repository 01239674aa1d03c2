#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{BillingPeriod, pricing_plan, pricing_plan_translation};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
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
use primitives::{PricingPlanFields, PricingPlanTranslation, PrimitivePricingPlan};
use translation::{TranslationSet, Translations};

const CODE_PREFIX: &str = "PLN";

#[derive(Clone, Debug)]
pub struct PricingPlan {
	pub primitive:    PrimitivePricingPlan,
	pub translations: Vec<PricingPlanTranslation>,
	pub audit:        Audit,
}

impl PricingPlan {
	fn hydrate(
		rows: Vec<PrimitivePricingPlan>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

		let mut translations = group_by_owner(
			pricing_plan_translation::table
				.filter(pricing_plan_translation::pricing_plan_id.eq_any(&ids))
				.order(pricing_plan_translation::id.asc())
				.select(PricingPlanTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.pricing_plan_id, t)),
		);

		let users = load_user_summaries(
			rows.iter().flat_map(|r| std::iter::once(r.created_by).chain(r.updated_by)),
			conn,
		)?;

		let plans = rows
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

		Ok(plans)
	}

	/// Get a single [`PricingPlan`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		plan_id: i32,
		scope: Scope,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let plan = conn
			.interact(move |conn| {
				let row =
					scoped!(pricing_plan::table.into_boxed(), pricing_plan, scope)
						.filter(pricing_plan::id.eq(plan_id))
						.select(PrimitivePricingPlan::as_select())
						.first(conn)
						.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut p| p.pop())
			})
			.await??;

		plan.ok_or_else(|| {
			Error::NotFound(format!("pricing plan with id {plan_id}"))
		})
	}

	/// Get all [`PricingPlan`]s visible in the given scope
	#[instrument(skip(conn))]
	pub async fn get_all(
		scope: Scope,
		p_cfg: Option<PaginationConfig>,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, plans) = conn
			.interact(move |conn| {
				let total: i64 =
					scoped!(pricing_plan::table.into_boxed(), pricing_plan, scope)
						.count()
						.get_result(conn)?;

				let mut query =
					scoped!(pricing_plan::table.into_boxed(), pricing_plan, scope)
						.order((
							pricing_plan::sort_order.asc(),
							pricing_plan::id.asc(),
						))
						.select(PrimitivePricingPlan::as_select());

				if let Some(p_cfg) = p_cfg {
					query = query.limit(p_cfg.limit).offset(p_cfg.offset);
				}

				let rows = query.load(conn)?;
				let plans = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, plans))
			})
			.await??;

		if let Some(p_cfg) = p_cfg {
			p_cfg.check(total)?;
		}

		Ok((total, plans))
	}

	#[instrument(skip(conn))]
	pub async fn soft_delete(
		plan_id: i32,
		deleted_by: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				let now = Utc::now().naive_utc();

				diesel::update(
					pricing_plan::table
						.filter(pricing_plan::id.eq(plan_id))
						.filter(pricing_plan::deleted_at.is_null()),
				)
				.set((
					pricing_plan::deleted_at.eq(now),
					pricing_plan::is_active.eq(false),
					pricing_plan::updated_at.eq(now),
					pricing_plan::updated_by.eq(deleted_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"pricing plan with id {plan_id}"
			)));
		}

		info!("soft-deleted pricing plan {plan_id}");

		Ok(())
	}

	#[instrument(skip(conn))]
	pub async fn restore(
		plan_id: i32,
		restored_by: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					pricing_plan::table
						.filter(pricing_plan::id.eq(plan_id))
						.filter(pricing_plan::deleted_at.is_not_null()),
				)
				.set((
					pricing_plan::deleted_at.eq(None::<NaiveDateTime>),
					pricing_plan::is_active.eq(true),
					pricing_plan::updated_at.eq(Utc::now().naive_utc()),
					pricing_plan::updated_by.eq(restored_by),
				))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!(
				"deleted pricing plan with id {plan_id}"
			)));
		}

		info!("restored pricing plan {plan_id}");

		Self::get_by_id(plan_id, Scope::Admin, conn).await
	}
}

models_common::upsert_translations!(
	pricing_plan_translation,
	pricing_plan_id,
	PricingPlanFields
);

#[derive(Clone, Debug)]
pub struct NewPricingPlan {
	/// Price in minor currency units
	pub price:          i64,
	pub currency:       String,
	pub billing_period: BillingPeriod,
	pub is_popular:     bool,
	pub sort_order:     i32,
	pub is_active:      bool,
	pub translations:   TranslationSet<PricingPlanFields>,
	pub created_by:     i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = pricing_plan)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewPricingPlan {
	code:           String,
	price:          i64,
	currency:       String,
	billing_period: BillingPeriod,
	is_popular:     bool,
	sort_order:     i32,
	is_active:      bool,
	created_at:     NaiveDateTime,
	created_by:     i32,
	updated_at:     NaiveDateTime,
}

impl NewPricingPlan {
	/// Insert this [`NewPricingPlan`] under a freshly generated code
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PricingPlan, Error> {
		let plan_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let now = Utc::now().naive_utc();

					let plan_id = insert_with_code(CODE_PREFIX, |code| {
						let new_plan = InsertableNewPricingPlan {
							code,
							price: self.price,
							currency: self.currency.to_ascii_uppercase(),
							billing_period: self.billing_period,
							is_popular: self.is_popular,
							sort_order: self.sort_order,
							is_active: self.is_active,
							created_at: now,
							created_by: self.created_by,
							updated_at: now,
						};

						diesel::insert_into(pricing_plan::table)
							.values(new_plan)
							.returning(pricing_plan::id)
							.get_result(conn)
					})?;

					upsert_translations(plan_id, self.translations.iter(), conn)?;

					Ok(plan_id)
				})
			})
			.await??;

		let plan = PricingPlan::get_by_id(plan_id, Scope::Admin, conn).await?;

		info!("created pricing plan {plan_id} ({})", plan.primitive.code);

		Ok(plan)
	}
}

#[derive(Clone, Debug)]
pub struct PricingPlanUpdate {
	pub price:          Option<i64>,
	pub currency:       Option<String>,
	pub billing_period: Option<BillingPeriod>,
	pub is_popular:     Option<bool>,
	pub sort_order:     Option<i32>,
	pub is_active:      Option<bool>,
	pub translations:   Translations<PricingPlanFields>,
	pub updated_by:     i32,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = pricing_plan)]
#[diesel(check_for_backend(Sqlite))]
struct PricingPlanChangeset {
	price:          Option<i64>,
	currency:       Option<String>,
	billing_period: Option<BillingPeriod>,
	is_popular:     Option<bool>,
	sort_order:     Option<i32>,
	is_active:      Option<bool>,
	updated_at:     NaiveDateTime,
	updated_by:     Option<i32>,
}

impl PricingPlanUpdate {
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		plan_id: i32,
		conn: &DbConn,
	) -> Result<PricingPlan, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let changeset = PricingPlanChangeset {
					price:          self.price,
					currency:       self.currency.map(|c| c.to_ascii_uppercase()),
					billing_period: self.billing_period,
					is_popular:     self.is_popular,
					sort_order:     self.sort_order,
					is_active:      self.is_active,
					updated_at:     Utc::now().naive_utc(),
					updated_by:     Some(self.updated_by),
				};

				let updated = diesel::update(
					pricing_plan::table
						.filter(pricing_plan::id.eq(plan_id))
						.filter(pricing_plan::deleted_at.is_null()),
				)
				.set(changeset)
				.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"pricing plan with id {plan_id}"
					)));
				}

				upsert_translations(
					plan_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let plan = PricingPlan::get_by_id(plan_id, Scope::Admin, conn).await?;

		info!("updated pricing plan {plan_id}");

		Ok(plan)
	}
}
