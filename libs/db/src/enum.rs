use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string that does not name any variant of a SQL-mapped enum
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
	pub kind:  &'static str,
	pub value: String,
}

/// Define an enum that is stored as its lowercase name in a `TEXT` column
macro_rules! sql_text_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$(
				$(#[$vmeta:meta])*
				$variant:ident => $repr:literal,
			)+
		}
	) => {
		$(#[$meta])*
		#[derive(
			AsExpression,
			Clone,
			Copy,
			Debug,
			Deserialize,
			Eq,
			FromSqlRow,
			Hash,
			Ord,
			PartialEq,
			PartialOrd,
			Serialize,
		)]
		#[diesel(sql_type = Text)]
		pub enum $name {
			$(
				$(#[$vmeta])*
				#[serde(rename = $repr)]
				$variant,
			)+
		}

		impl $name {
			/// Every variant in declaration order
			pub const ALL: &'static [Self] = &[$(Self::$variant),+];

			#[must_use]
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $repr,)+
				}
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl std::str::FromStr for $name {
			type Err = UnknownVariant;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($repr => Ok(Self::$variant),)+
					_ => Err(UnknownVariant {
						kind:  stringify!($name),
						value: s.to_string(),
					}),
				}
			}
		}

		impl ToSql<Text, Sqlite> for $name {
			fn to_sql<'b>(
				&'b self,
				out: &mut Output<'b, '_, Sqlite>,
			) -> serialize::Result {
				<str as ToSql<Text, Sqlite>>::to_sql(self.as_str(), out)
			}
		}

		impl FromSql<Text, Sqlite> for $name {
			fn from_sql(
				bytes: <Sqlite as Backend>::RawValue<'_>,
			) -> deserialize::Result<Self> {
				let value = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;

				Ok(value.parse()?)
			}
		}
	};
}

sql_text_enum! {
	/// The closed set of locales content can be translated into
	#[derive(Default)]
	pub enum Locale {
		/// Indonesian
		#[default]
		Id => "id",
		/// English
		En => "en",
	}
}

impl Locale {
	/// Parse a BCP 47 language tag, ignoring case and any region or script
	/// subtags (`en-US` → [`Locale::En`])
	#[must_use]
	pub fn from_tag(tag: &str) -> Option<Self> {
		let primary = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();

		primary.parse().ok()
	}
}

sql_text_enum! {
	/// Role of a back-office user
	pub enum Role {
		Admin => "admin",
		Editor => "editor",
	}
}

sql_text_enum! {
	/// Broad category of an uploaded file, derived from its MIME type
	pub enum MediaKind {
		Image => "image",
		Video => "video",
		Document => "document",
	}
}

sql_text_enum! {
	pub enum BillingPeriod {
		Monthly => "monthly",
		Yearly => "yearly",
		OneTime => "one_time",
	}
}

sql_text_enum! {
	pub enum EmploymentType {
		FullTime => "full_time",
		PartTime => "part_time",
		Contract => "contract",
		Internship => "internship",
	}
}

sql_text_enum! {
	/// Which parent aggregate (and which list on it) a line item belongs to
	pub enum LineItemKind {
		IndustryProblem => "industry_problem",
		IndustrySolution => "industry_solution",
		JobRequirement => "job_requirement",
		JobResponsibility => "job_responsibility",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn locale_round_trips_through_its_code() {
		for locale in Locale::ALL {
			assert_eq!(locale.as_str().parse::<Locale>(), Ok(*locale));
		}
	}

	#[test]
	fn locale_from_tag_ignores_region_and_case() {
		assert_eq!(Locale::from_tag("en-US"), Some(Locale::En));
		assert_eq!(Locale::from_tag("ID"), Some(Locale::Id));
		assert_eq!(Locale::from_tag("id_ID"), Some(Locale::Id));
		assert_eq!(Locale::from_tag("fr"), None);
		assert_eq!(Locale::from_tag(""), None);
	}

	#[test]
	fn default_locale_is_indonesian() {
		assert_eq!(Locale::default(), Locale::Id);
	}

	#[test]
	fn unknown_variant_names_the_enum() {
		let err = "owner".parse::<Role>().unwrap_err();

		assert_eq!(err.to_string(), "unknown Role 'owner'");
	}

	#[test]
	fn serde_uses_the_sql_representation() {
		let json = serde_json::to_string(&BillingPeriod::OneTime).unwrap();

		assert_eq!(json, "\"one_time\"");
	}
}
