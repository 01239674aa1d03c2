//! Ordered, translated bullet points owned by industries and job postings
//!
//! Line items are never soft-deleted. Removing one deletes its translations
//! in the same transaction.

#[macro_use]
extern crate tracing;

use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{LineItemKind, industry, job_posting, line_item, line_item_translation};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use primitives::{LineItemFields, LineItemTranslation, PrimitiveLineItem};
use translation::{TranslationSet, Translations};

#[derive(Clone, Debug)]
pub struct LineItem {
	pub primitive:    PrimitiveLineItem,
	pub translations: Vec<LineItemTranslation>,
}

impl LineItem {
	/// Load every line item of the given kinds owned by any of `owner_ids`,
	/// grouped by `(kind, owner)` and ordered by sort order
	pub fn load_for(
		kinds: &[LineItemKind],
		owner_ids: &[i32],
		conn: &mut SqliteConnection,
	) -> QueryResult<HashMap<(LineItemKind, i32), Vec<Self>>> {
		if owner_ids.is_empty() {
			return Ok(HashMap::new());
		}

		let items: Vec<PrimitiveLineItem> = line_item::table
			.filter(line_item::kind.eq_any(kinds))
			.filter(line_item::owner_id.eq_any(owner_ids))
			.order((line_item::sort_order.asc(), line_item::id.asc()))
			.select(PrimitiveLineItem::as_select())
			.load(conn)?;

		let mut translations = models_common::group_by_owner(
			line_item_translation::table
				.filter(
					line_item_translation::line_item_id
						.eq_any(items.iter().map(|i| i.id).collect::<Vec<_>>()),
				)
				.order(line_item_translation::id.asc())
				.select(LineItemTranslation::as_select())
				.load(conn)?
				.into_iter()
				.map(|t| (t.line_item_id, t)),
		);

		let mut grouped: HashMap<(LineItemKind, i32), Vec<Self>> = HashMap::new();

		for primitive in items {
			let translations =
				translations.remove(&primitive.id).unwrap_or_default();

			grouped
				.entry((primitive.kind, primitive.owner_id))
				.or_default()
				.push(Self { primitive, translations });
		}

		Ok(grouped)
	}

	/// Get a single [`LineItem`] that belongs to the given owner
	#[instrument(skip(conn))]
	pub async fn get(
		kind: LineItemKind,
		owner_id: i32,
		item_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let item = conn
			.interact(move |conn| {
				require_owner(kind, owner_id, conn)?;

				let mut items = Self::load_for(&[kind], &[owner_id], conn)?;

				let item = items
					.remove(&(kind, owner_id))
					.unwrap_or_default()
					.into_iter()
					.find(|i| i.primitive.id == item_id);

				Ok::<_, Error>(item)
			})
			.await??;

		item.ok_or_else(|| Error::NotFound(format!("{kind} with id {item_id}")))
	}

	/// Delete a [`LineItem`] and all of its translations
	#[instrument(skip(conn))]
	pub async fn delete(
		kind: LineItemKind,
		owner_id: i32,
		item_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				require_owner(kind, owner_id, conn)?;

				let target = line_item::table
					.filter(line_item::id.eq(item_id))
					.filter(line_item::kind.eq(kind))
					.filter(line_item::owner_id.eq(owner_id));

				let exists: bool =
					diesel::select(diesel::dsl::exists(target)).get_result(conn)?;

				if !exists {
					return Err(Error::NotFound(format!(
						"{kind} with id {item_id}"
					)));
				}

				diesel::delete(
					line_item_translation::table
						.filter(line_item_translation::line_item_id.eq(item_id)),
				)
				.execute(conn)?;

				diesel::delete(line_item::table.find(item_id)).execute(conn)?;

				Ok(())
			})
		})
		.await??;

		info!("deleted {kind} {item_id} of owner {owner_id}");

		Ok(())
	}
}

/// Make sure the non-deleted owner implied by `kind` exists
pub fn require_owner(
	kind: LineItemKind,
	owner_id: i32,
	conn: &mut SqliteConnection,
) -> Result<(), Error> {
	let exists: bool = match kind {
		LineItemKind::IndustryProblem | LineItemKind::IndustrySolution => {
			diesel::select(diesel::dsl::exists(
				industry::table
					.filter(industry::id.eq(owner_id))
					.filter(industry::deleted_at.is_null()),
			))
			.get_result(conn)?
		},
		LineItemKind::JobRequirement | LineItemKind::JobResponsibility => {
			diesel::select(diesel::dsl::exists(
				job_posting::table
					.filter(job_posting::id.eq(owner_id))
					.filter(job_posting::deleted_at.is_null()),
			))
			.get_result(conn)?
		},
	};

	if !exists {
		return Err(Error::NotFound(format!("owner of {kind} with id {owner_id}")));
	}

	Ok(())
}

models_common::upsert_translations!(
	line_item_translation,
	line_item_id,
	LineItemFields
);

#[derive(Clone, Debug)]
pub struct NewLineItem {
	pub sort_order:   i32,
	pub translations: TranslationSet<LineItemFields>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = line_item)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewLineItem {
	kind:       LineItemKind,
	owner_id:   i32,
	sort_order: i32,
	created_at: NaiveDateTime,
	updated_at: NaiveDateTime,
}

impl NewLineItem {
	/// Insert this [`NewLineItem`] on an open connection, used by owners that
	/// create their items inline inside their own transaction
	pub fn insert_with(
		&self,
		kind: LineItemKind,
		owner_id: i32,
		conn: &mut SqliteConnection,
	) -> QueryResult<i32> {
		let now = Utc::now().naive_utc();

		let new_item = InsertableNewLineItem {
			kind,
			owner_id,
			sort_order: self.sort_order,
			created_at: now,
			updated_at: now,
		};

		let item_id = diesel::insert_into(line_item::table)
			.values(new_item)
			.returning(line_item::id)
			.get_result(conn)?;

		upsert_translations(item_id, self.translations.iter(), conn)?;

		Ok(item_id)
	}

	/// Insert this [`NewLineItem`] for the given owner
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		kind: LineItemKind,
		owner_id: i32,
		conn: &DbConn,
	) -> Result<LineItem, Error> {
		let item_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					require_owner(kind, owner_id, conn)?;

					Ok(self.insert_with(kind, owner_id, conn)?)
				})
			})
			.await??;

		let item = LineItem::get(kind, owner_id, item_id, conn).await?;

		info!("created {kind} {item_id} for owner {owner_id}");

		Ok(item)
	}
}

#[derive(Clone, Debug)]
pub struct LineItemUpdate {
	pub sort_order:   Option<i32>,
	pub translations: Translations<LineItemFields>,
}

impl LineItemUpdate {
	/// Apply this update to the [`LineItem`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		kind: LineItemKind,
		owner_id: i32,
		item_id: i32,
		conn: &DbConn,
	) -> Result<LineItem, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				require_owner(kind, owner_id, conn)?;

				let now = Utc::now().naive_utc();

				let target = line_item::table
					.filter(line_item::id.eq(item_id))
					.filter(line_item::kind.eq(kind))
					.filter(line_item::owner_id.eq(owner_id));

				let updated = diesel::update(target)
					.set((
						self.sort_order.map(|s| line_item::sort_order.eq(s)),
						line_item::updated_at.eq(now),
					))
					.execute(conn)?;

				if updated == 0 {
					return Err(Error::NotFound(format!(
						"{kind} with id {item_id}"
					)));
				}

				upsert_translations(
					item_id,
					self.translations.iter().map(|(l, f)| (*l, f)),
					conn,
				)?;

				Ok(())
			})
		})
		.await??;

		let item = LineItem::get(kind, owner_id, item_id, conn).await?;

		info!("updated {kind} {item_id} of owner {owner_id}");

		Ok(item)
	}
}
