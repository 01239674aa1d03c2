#[macro_use]
extern crate tracing;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{MediaKind, media};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use models_common::{PaginatedData, PaginationConfig, load_user_summaries};
use primitives::{PrimitiveMedia, UserSummary};
use serde::{Deserialize, Serialize};

/// An uploaded file and the user that uploaded it
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Media {
	pub primitive:   PrimitiveMedia,
	pub uploaded_by: Option<UserSummary>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct MediaFilter {
	pub kind: Option<MediaKind>,
}

impl Media {
	fn hydrate(
		rows: Vec<PrimitiveMedia>,
		conn: &mut SqliteConnection,
	) -> QueryResult<Vec<Self>> {
		let users = load_user_summaries(rows.iter().map(|m| m.uploaded_by), conn)?;

		let media = rows
			.into_iter()
			.map(|primitive| {
				let uploaded_by = users.get(&primitive.uploaded_by).cloned();

				Self { primitive, uploaded_by }
			})
			.collect();

		Ok(media)
	}

	/// Get a single non-deleted [`Media`] item given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(media_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let media = conn
			.interact(move |conn| {
				let row = media::table
					.filter(media::id.eq(media_id))
					.filter(media::deleted_at.is_null())
					.select(PrimitiveMedia::as_select())
					.first(conn)
					.optional()?;

				let Some(row) = row else {
					return Ok(None);
				};

				Self::hydrate(vec![row], conn).map(|mut m| m.pop())
			})
			.await??;

		media.ok_or_else(|| Error::NotFound(format!("media with id {media_id}")))
	}

	/// Get all non-deleted [`Media`], newest first
	#[instrument(skip(conn))]
	pub async fn get_all(
		filter: MediaFilter,
		p_cfg: PaginationConfig,
		conn: &DbConn,
	) -> Result<PaginatedData<Vec<Self>>, Error> {
		let (total, media) = conn
			.interact(move |conn| {
				let mut count_query =
					media::table.filter(media::deleted_at.is_null()).into_boxed();
				let mut query = media::table
					.filter(media::deleted_at.is_null())
					.order((media::created_at.desc(), media::id.desc()))
					.limit(p_cfg.limit)
					.offset(p_cfg.offset)
					.into_boxed();

				if let Some(kind) = filter.kind {
					count_query = count_query.filter(media::kind.eq(kind));
					query = query.filter(media::kind.eq(kind));
				}

				let total: i64 = count_query.count().get_result(conn)?;
				let rows = query.select(PrimitiveMedia::as_select()).load(conn)?;
				let media = Self::hydrate(rows, conn)?;

				Ok::<_, diesel::result::Error>((total, media))
			})
			.await??;

		p_cfg.check(total)?;

		Ok((total, media))
	}

	/// Replace the alt text of a [`Media`] item, `None` clears it
	#[instrument(skip(conn))]
	pub async fn update_alt_text(
		media_id: i32,
		alt_text: Option<String>,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					media::table
						.filter(media::id.eq(media_id))
						.filter(media::deleted_at.is_null()),
				)
				.set(media::alt_text.eq(alt_text))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("media with id {media_id}")));
		}

		info!("updated alt text of media {media_id}");

		Self::get_by_id(media_id, conn).await
	}

	/// Soft delete a [`Media`] item
	///
	/// The stored file is kept, content referencing the item stops embedding
	/// it
	#[instrument(skip(conn))]
	pub async fn soft_delete(media_id: i32, conn: &DbConn) -> Result<(), Error> {
		let affected = conn
			.interact(move |conn| {
				diesel::update(
					media::table
						.filter(media::id.eq(media_id))
						.filter(media::deleted_at.is_null()),
				)
				.set(media::deleted_at.eq(Utc::now().naive_utc()))
				.execute(conn)
			})
			.await??;

		if affected == 0 {
			return Err(Error::NotFound(format!("media with id {media_id}")));
		}

		info!("soft-deleted media {media_id}");

		Ok(())
	}
}

#[derive(Clone, Debug)]
pub struct NewMedia {
	pub kind:          MediaKind,
	pub original_name: String,
	pub file_path:     String,
	pub mime_type:     String,
	pub size_bytes:    i64,
	pub alt_text:      Option<String>,
	pub uploaded_by:   i32,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = media)]
#[diesel(check_for_backend(Sqlite))]
struct InsertableNewMedia {
	kind:          MediaKind,
	original_name: String,
	file_path:     String,
	mime_type:     String,
	size_bytes:    i64,
	alt_text:      Option<String>,
	uploaded_by:   i32,
	created_at:    NaiveDateTime,
}

impl NewMedia {
	/// Record an already stored file
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Media, Error> {
		let media_id = conn
			.interact(move |conn| {
				let new_media = InsertableNewMedia {
					kind:          self.kind,
					original_name: self.original_name,
					file_path:     self.file_path,
					mime_type:     self.mime_type,
					size_bytes:    self.size_bytes,
					alt_text:      self.alt_text,
					uploaded_by:   self.uploaded_by,
					created_at:    Utc::now().naive_utc(),
				};

				diesel::insert_into(media::table)
					.values(new_media)
					.returning(media::id)
					.get_result::<i32>(conn)
			})
			.await??;

		info!("stored media {media_id}");

		Media::get_by_id(media_id, conn).await
	}
}
