//! Plain row structs mirroring the database tables
//!
//! Every translatable entity has three types here: the primitive row, a
//! `...Fields` struct holding the translated text and a `...Translation`
//! row tying those fields to an owner and a [`Locale`](db::Locale).

mod about_card;
mod analytics;
mod faq;
mod feature;
mod industry;
mod job_posting;
mod line_item;
mod media;
mod pricing_plan;
mod testimonial;
mod user;

pub use about_card::*;
pub use analytics::*;
pub use faq::*;
pub use feature::*;
pub use industry::*;
pub use job_posting::*;
pub use line_item::*;
pub use media::*;
pub use pricing_plan::*;
pub use testimonial::*;
pub use user::*;
