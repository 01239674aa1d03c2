use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::{
	about_card,
	analytics,
	auth,
	faq,
	feature,
	healthcheck,
	industry,
	job_posting,
	line_item,
	media,
	pricing_plan,
	testimonial,
	user,
};
use crate::middleware::{AuthLayer, RoleLayer};
use crate::schemas::line_item::{IndustryList, JobPostingList};

/// Room left in an upload request for the multipart framing and the other
/// form fields
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/analytics", tracking_routes())
		.merge(public_routes())
		.nest("/admin", admin_routes(&state))
		.nest_service("/uploads", ServeDir::new(&state.config.upload_dir));

	let mut router = Router::new().merge(api_routes).layer(
		ServiceBuilder::new()
			.layer(TraceLayer::new_for_http())
			.layer(TimeoutLayer::new(state.config.request_timeout))
			.layer(CompressionLayer::new()),
	);

	if let Some(origin) = &state.config.cors_origin {
		match origin.parse::<HeaderValue>() {
			Ok(origin) => {
				router = router.layer(
					CorsLayer::new()
						.allow_origin(origin)
						.allow_credentials(true)
						.allow_headers([CONTENT_TYPE, ACCEPT_LANGUAGE])
						.allow_methods([
							Method::GET,
							Method::POST,
							Method::PATCH,
							Method::DELETE,
						]),
				);
			},
			Err(e) => warn!("ignoring invalid CORS origin {origin:?}: {e}"),
		}
	}

	router.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	let authenticated = Router::new()
		.route("/logout", post(auth::logout))
		.route("/me", get(auth::me))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new().route("/login", post(auth::login)).merge(authenticated)
}

/// Visitor tracking, called by the public site
fn tracking_routes() -> Router<AppState> {
	Router::new()
		.route("/track", post(analytics::track_page_view))
		.route("/page-views/{id}", patch(analytics::set_page_view_duration))
}

/// Localized read-only content
fn public_routes() -> Router<AppState> {
	Router::new()
		.route("/features", get(feature::get_features))
		.route("/features/{id}", get(feature::get_feature))
		.route("/about-cards", get(about_card::get_about_cards))
		.route("/about-cards/{id}", get(about_card::get_about_card))
		.route("/testimonials", get(testimonial::get_testimonials))
		.route("/testimonials/{id}", get(testimonial::get_testimonial))
		.route("/pricing-plans", get(pricing_plan::get_pricing_plans))
		.route("/pricing-plans/{id}", get(pricing_plan::get_pricing_plan))
		.route("/faqs", get(faq::get_faqs))
		.route("/faqs/{id}", get(faq::get_faq))
		.route("/faq-categories", get(faq::get_faq_categories))
		.route("/industries", get(industry::get_industries))
		.route("/industries/{id}", get(industry::get_industry))
		.route("/job-postings", get(job_posting::get_job_postings))
		.route("/job-postings/{id}", get(job_posting::get_job_posting))
}

/// Back-office routes, every one of them requires a logged in user
fn admin_routes(state: &AppState) -> Router<AppState> {
	let admin_only = Router::new()
		.route("/users", get(user::get_users).post(user::create_user))
		.route("/users/{id}", get(user::get_user).patch(user::update_user))
		.route_layer(RoleLayer::admin());

	let staff = Router::new()
		.merge(content_routes())
		.merge(line_item_routes())
		.merge(media_routes(state))
		.merge(report_routes())
		.route_layer(RoleLayer::staff());

	Router::new()
		.merge(staff)
		.merge(admin_only)
		.route_layer(AuthLayer::new(state.clone()))
}

/// CRUD of every translatable content entity
fn content_routes() -> Router<AppState> {
	Router::new()
		.route(
			"/features",
			get(feature::admin_get_features).post(feature::create_feature),
		)
		.route(
			"/features/{id}",
			get(feature::admin_get_feature)
				.patch(feature::update_feature)
				.delete(feature::delete_feature),
		)
		.route("/features/{id}/restore", post(feature::restore_feature))
		.route(
			"/about-cards",
			get(about_card::admin_get_about_cards)
				.post(about_card::create_about_card),
		)
		.route(
			"/about-cards/{id}",
			get(about_card::admin_get_about_card)
				.patch(about_card::update_about_card)
				.delete(about_card::delete_about_card),
		)
		.route(
			"/about-cards/{id}/restore",
			post(about_card::restore_about_card),
		)
		.route(
			"/testimonials",
			get(testimonial::admin_get_testimonials)
				.post(testimonial::create_testimonial),
		)
		.route(
			"/testimonials/{id}",
			get(testimonial::admin_get_testimonial)
				.patch(testimonial::update_testimonial)
				.delete(testimonial::delete_testimonial),
		)
		.route(
			"/testimonials/{id}/restore",
			post(testimonial::restore_testimonial),
		)
		.route(
			"/pricing-plans",
			get(pricing_plan::admin_get_pricing_plans)
				.post(pricing_plan::create_pricing_plan),
		)
		.route(
			"/pricing-plans/{id}",
			get(pricing_plan::admin_get_pricing_plan)
				.patch(pricing_plan::update_pricing_plan)
				.delete(pricing_plan::delete_pricing_plan),
		)
		.route(
			"/pricing-plans/{id}/restore",
			post(pricing_plan::restore_pricing_plan),
		)
		.route("/faqs", get(faq::admin_get_faqs).post(faq::create_faq))
		.route(
			"/faqs/{id}",
			get(faq::admin_get_faq).patch(faq::update_faq).delete(faq::delete_faq),
		)
		.route("/faqs/{id}/restore", post(faq::restore_faq))
		.route(
			"/faq-categories",
			get(faq::admin_get_faq_categories).post(faq::create_faq_category),
		)
		.route(
			"/faq-categories/{id}",
			get(faq::admin_get_faq_category)
				.patch(faq::update_faq_category)
				.delete(faq::delete_faq_category),
		)
		.route(
			"/faq-categories/{id}/restore",
			post(faq::restore_faq_category),
		)
		.route(
			"/industries",
			get(industry::admin_get_industries).post(industry::create_industry),
		)
		.route(
			"/industries/{id}",
			get(industry::admin_get_industry)
				.patch(industry::update_industry)
				.delete(industry::delete_industry),
		)
		.route("/industries/{id}/restore", post(industry::restore_industry))
		.route(
			"/job-postings",
			get(job_posting::admin_get_job_postings)
				.post(job_posting::create_job_posting),
		)
		.route(
			"/job-postings/{id}",
			get(job_posting::admin_get_job_posting)
				.patch(job_posting::update_job_posting)
				.delete(job_posting::delete_job_posting),
		)
		.route(
			"/job-postings/{id}/restore",
			post(job_posting::restore_job_posting),
		)
}

/// Nested line items of industries and job postings
fn line_item_routes() -> Router<AppState> {
	Router::new()
		.route(
			"/industries/{id}/items/{list}",
			post(line_item::create_line_item::<IndustryList>),
		)
		.route(
			"/industries/{id}/items/{list}/{item_id}",
			get(line_item::get_line_item::<IndustryList>)
				.patch(line_item::update_line_item::<IndustryList>)
				.delete(line_item::delete_line_item::<IndustryList>),
		)
		.route(
			"/job-postings/{id}/items/{list}",
			post(line_item::create_line_item::<JobPostingList>),
		)
		.route(
			"/job-postings/{id}/items/{list}/{item_id}",
			get(line_item::get_line_item::<JobPostingList>)
				.patch(line_item::update_line_item::<JobPostingList>)
				.delete(line_item::delete_line_item::<JobPostingList>),
		)
}

/// The media library
fn media_routes(state: &AppState) -> Router<AppState> {
	let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

	Router::new()
		.route(
			"/media",
			get(media::get_all_media)
				.post(media::upload_media)
				.layer(DefaultBodyLimit::max(upload_limit)),
		)
		.route(
			"/media/{id}",
			get(media::get_media)
				.patch(media::update_media)
				.delete(media::delete_media),
		)
}

/// Visitor analytics reports
fn report_routes() -> Router<AppState> {
	Router::new()
		.route("/analytics/summary", get(analytics::get_summary))
		.route("/analytics/pages", get(analytics::get_top_pages))
		.route("/analytics/daily", get(analytics::get_daily))
		.route("/analytics/locales", get(analytics::get_locales))
		.route("/analytics/referrers", get(analytics::get_top_referrers))
}
