mod util;

use std::env;
use std::ops::Range;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use common::{DbConn, DbPool, Error};
use db::{BillingPeriod, EmploymentType, Role};
use deadpool_diesel::sqlite::Manager;
use faq::{NewFaq, NewFaqCategory};
use fake::Fake;
use fake::faker::address::raw::CityName;
use fake::faker::company::raw::{CompanyName, Industry};
use fake::faker::job::raw::Title;
use fake::faker::lorem::raw::{Paragraph, Sentence, Words};
use fake::faker::name::raw::Name;
use fake::locales::EN;
use feature::NewFeature;
use industry::NewIndustry;
use job_posting::NewJobPosting;
use line_item::NewLineItem;
use primitives::{
	FaqCategoryFields,
	FaqFields,
	FeatureFields,
	IndustryFields,
	JobPostingFields,
	LineItemFields,
	PricingPlanFields,
	TestimonialFields,
};
use pricing_plan::NewPricingPlan;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use testimonial::NewTestimonial;
use user::{NewUser, User};

use crate::util::{every_locale, generate_unique_slugs};

#[derive(Parser, Debug)]
struct Opt {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Create a back-office user
	User {
		#[arg(long, short = 'u')]
		username: String,
		#[arg(long, short = 'e')]
		email:    String,
		#[arg(long, short = 'p')]
		password: String,
		#[arg(long)]
		editor:   bool,
	},
	/// Fill every content section with generated entries
	Demo {
		/// Username or email of the user the content is attributed to
		#[arg(long, short = 'a', default_value = "admin")]
		author:     String,
		#[arg(long, default_value_t = 6)]
		features:   usize,
		#[arg(long, default_value_t = 8)]
		faqs:       usize,
		#[arg(long, default_value_t = 4)]
		industries: usize,
		#[arg(long, default_value_t = 3)]
		jobs:       usize,
	},
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await;

	match cli.command {
		Command::User { username, email, password, editor } => {
			let role = if editor { Role::Editor } else { Role::Admin };

			let new_user =
				NewUser { username, email, password, role, is_active: true };
			let user = new_user.insert(&conn).await?;

			println!(
				"Created {} user '{}' with id {}",
				role.as_str(),
				user.primitive.username,
				user.primitive.id
			);
		},
		Command::Demo { author, features, faqs, industries, jobs } => {
			let user = User::get_by_identifier(author.clone(), &conn).await?;
			let Some(author) = user else {
				return Err(Error::NotFound(format!("user '{author}'")));
			};
			let author = author.primitive.id;

			println!("Seeding {features} features…");
			seed_features(&conn, features, author).await?;

			println!("Seeding testimonials and pricing plans…");
			seed_testimonials(&conn, author).await?;
			seed_pricing_plans(&conn, author).await?;

			println!("Seeding {faqs} faqs…");
			seed_faqs(&conn, faqs, author).await?;

			println!("Seeding {industries} industries…");
			seed_industries(&conn, industries, author).await?;

			println!("Seeding {jobs} job postings…");
			seed_job_postings(&conn, jobs, author).await?;
		},
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = DbPool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

fn sentence() -> String { Sentence(EN, 3..8).fake() }

fn paragraph() -> String { Paragraph(EN, 1..3).fake() }

fn words(count: Range<usize>) -> String {
	Words(EN, count).fake::<Vec<String>>().join(" ")
}

fn line_items(count: usize) -> Result<Vec<NewLineItem>, Error> {
	(0..count)
		.map(|idx| {
			Ok(NewLineItem {
				sort_order:   i32::try_from(idx).unwrap_or(i32::MAX),
				translations: every_locale(|_| {
					LineItemFields { content: sentence() }
				})?,
			})
		})
		.collect()
}

async fn seed_features(
	conn: &DbConn,
	count: usize,
	author: i32,
) -> Result<(), Error> {
	for sort_order in 0..count {
		NewFeature {
			icon_id:      None,
			sort_order:   i32::try_from(sort_order).unwrap_or(i32::MAX),
			is_active:    true,
			translations: every_locale(|_| {
				FeatureFields {
					title:       words(2..4),
					description: paragraph(),
				}
			})?,
			created_by:   author,
		}
		.insert(conn)
		.await?;
	}

	Ok(())
}

async fn seed_testimonials(conn: &DbConn, author: i32) -> Result<(), Error> {
	let mut rng = rng();

	for sort_order in 0..5 {
		NewTestimonial {
			author_name: Name(EN).fake(),
			author_role: Some(Title(EN).fake()),
			company: Some(CompanyName(EN).fake()),
			rating: rng.random_range(4..=5),
			avatar_id: None,
			sort_order,
			is_active: true,
			translations: every_locale(|_| {
				TestimonialFields { quote: paragraph() }
			})?,
			created_by: author,
		}
		.insert(conn)
		.await?;
	}

	Ok(())
}

async fn seed_pricing_plans(conn: &DbConn, author: i32) -> Result<(), Error> {
	let plans = [
		("Starter", 0, BillingPeriod::Monthly, false),
		("Pro", 299_000, BillingPeriod::Monthly, true),
		("Enterprise", 2_990_000, BillingPeriod::Yearly, false),
	];

	for (sort_order, (name, price, billing_period, is_popular)) in
		(0..).zip(plans)
	{
		NewPricingPlan {
			price,
			currency: "IDR".to_string(),
			billing_period,
			is_popular,
			sort_order,
			is_active: true,
			translations: every_locale(|_| {
				PricingPlanFields {
					name:        name.to_string(),
					description: sentence(),
					cta_label:   None,
				}
			})?,
			created_by: author,
		}
		.insert(conn)
		.await?;
	}

	Ok(())
}

async fn seed_faqs(
	conn: &DbConn,
	count: usize,
	author: i32,
) -> Result<(), Error> {
	let mut category_ids = vec![];

	for (sort_order, slug) in (0..).zip(["general", "billing", "support"]) {
		let category = NewFaqCategory {
			slug: slug.to_string(),
			sort_order,
			is_active: true,
			translations: every_locale(|_| {
				FaqCategoryFields { name: words(1..3) }
			})?,
			created_by: author,
		}
		.insert(conn)
		.await?;

		category_ids.push(category.primitive.id);
	}

	for sort_order in 0..count {
		let category_id = category_ids.choose(&mut rng()).copied();

		NewFaq {
			category_id,
			sort_order: i32::try_from(sort_order).unwrap_or(i32::MAX),
			is_active: true,
			translations: every_locale(|_| {
				FaqFields { question: sentence(), answer: paragraph() }
			})?,
			created_by: author,
		}
		.insert(conn)
		.await?;
	}

	Ok(())
}

async fn seed_industries(
	conn: &DbConn,
	count: usize,
	author: i32,
) -> Result<(), Error> {
	let names: Vec<String> = (0..count).map(|_| Industry(EN).fake()).collect();
	let mut names = names.into_iter();
	let slugs = generate_unique_slugs(count, || {
		names.next().unwrap_or_else(|| "industry".to_string())
	});

	for (sort_order, slug) in (0..).zip(slugs) {
		NewIndustry {
			slug,
			image_id: None,
			sort_order,
			is_active: true,
			translations: every_locale(|_| {
				IndustryFields {
					name:        Industry(EN).fake(),
					description: paragraph(),
				}
			})?,
			problems: line_items(3)?,
			solutions: line_items(3)?,
			created_by: author,
		}
		.insert(conn)
		.await?;
	}

	Ok(())
}

async fn seed_job_postings(
	conn: &DbConn,
	count: usize,
	author: i32,
) -> Result<(), Error> {
	let mut rng = rng();
	let now = Utc::now().naive_utc();

	for sort_order in 0..count {
		let employment_type = *EmploymentType::ALL
			.choose(&mut rng)
			.unwrap_or(&EmploymentType::FullTime);
		let closes_at = rng
			.random_bool(0.5)
			.then(|| now + Duration::days(rng.random_range(7..60)));

		NewJobPosting {
			department: words(1..2),
			location: CityName(EN).fake(),
			employment_type,
			closes_at,
			sort_order: i32::try_from(sort_order).unwrap_or(i32::MAX),
			is_active: true,
			translations: every_locale(|_| {
				JobPostingFields {
					title:       Title(EN).fake(),
					summary:     sentence(),
					description: paragraph(),
				}
			})?,
			requirements: line_items(4)?,
			responsibilities: line_items(4)?,
			created_by: author,
		}
		.insert(conn)
		.await?;
	}

	Ok(())
}
