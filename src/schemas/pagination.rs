use models_common::PaginationConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::schemas::BoundedU32Visitor;

const fn page_default() -> u32 { 1 }

const fn per_page_default() -> u32 { 12 }

/// Pagination request parameters.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
	#[serde(default = "page_default", deserialize_with = "ds_page_bounds")]
	pub page:     u32,
	#[serde(
		default = "per_page_default",
		deserialize_with = "ds_per_page_bounds"
	)]
	pub per_page: u32,
}

/// Pagination details of a list response
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
	pub page:        u32,
	pub per_page:    u32,
	pub total:       i64,
	pub total_pages: i64,
}

impl Default for PaginationOptions {
	fn default() -> Self { Self { page: 1, per_page: 12 } }
}

impl PaginationOptions {
	/// Describe the page these parameters select out of `total` items
	#[must_use]
	pub fn meta(&self, total: i64) -> PaginationMeta {
		let per_page = i64::from(self.per_page);

		PaginationMeta {
			page: self.page,
			per_page: self.per_page,
			total,
			total_pages: (total + per_page - 1) / per_page,
		}
	}

	/// Calculate the SQL LIMIT value of these parameters
	#[inline]
	#[must_use]
	pub fn limit(&self) -> i64 { self.per_page.into() }

	/// Calculate the SQL OFFSET value of these parameters
	#[inline]
	#[must_use]
	pub fn offset(&self) -> i64 {
		(i64::from(self.page) - 1) * i64::from(self.per_page)
	}

	#[must_use]
	pub fn config(&self) -> PaginationConfig {
		PaginationConfig { limit: self.limit(), offset: self.offset() }
	}
}

/// Deserialization visitor for `page` bounds.
fn ds_page_bounds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: u32::MAX })
}

/// Deserialization visitor for `per_page` bounds.
fn ds_per_page_bounds<'de, D: Deserializer<'de>>(
	d: D,
) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: 100 })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offset_skips_earlier_pages() {
		let opts = PaginationOptions { page: 3, per_page: 10 };

		assert_eq!(opts.limit(), 10);
		assert_eq!(opts.offset(), 20);
	}

	#[test]
	fn total_pages_round_up() {
		let opts = PaginationOptions { page: 1, per_page: 10 };

		assert_eq!(opts.meta(0).total_pages, 0);
		assert_eq!(opts.meta(10).total_pages, 1);
		assert_eq!(opts.meta(11).total_pages, 2);
	}
}
