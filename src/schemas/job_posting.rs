use chrono::NaiveDateTime;
use common::Error;
use db::{EmploymentType, Locale};
use job_posting::{JobPosting, JobPostingUpdate, NewJobPosting};
use primitives::JobPostingFields;
use serde::{Deserialize, Serialize};
use translation::{TranslationSet, Translations, merge_all_translations};
use validator_derive::Validate;

use crate::schemas::line_item::{
	CreateLineItemRequest,
	LineItemAdminResponse,
	LineItemResponse,
	check_items,
	insertable_items,
};
use crate::schemas::validation::FieldCheck;
use crate::schemas::{AuditResponse, BuildResponse, ResponseContext, build_all};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingResponse {
	pub id:               i32,
	pub code:             String,
	pub department:       String,
	pub location:         String,
	pub employment_type:  EmploymentType,
	pub closes_at:        Option<NaiveDateTime>,
	#[serde(flatten)]
	pub fields:           JobPostingFields,
	pub requirements:     Vec<LineItemResponse>,
	pub responsibilities: Vec<LineItemResponse>,
	pub sort_order:       i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingAdminResponse {
	pub id:               i32,
	pub code:             String,
	pub department:       String,
	pub location:         String,
	pub employment_type:  EmploymentType,
	pub closes_at:        Option<NaiveDateTime>,
	pub sort_order:       i32,
	pub is_active:        bool,
	pub translations:     Translations<JobPostingFields>,
	pub requirements:     Vec<LineItemAdminResponse>,
	pub responsibilities: Vec<LineItemAdminResponse>,
	#[serde(flatten)]
	pub audit:            AuditResponse,
}

impl BuildResponse<JobPostingResponse> for JobPosting {
	fn build_response(self, ctx: &ResponseContext) -> JobPostingResponse {
		JobPostingResponse {
			id:               self.primitive.id,
			code:             self.primitive.code,
			department:       self.primitive.department,
			location:         self.primitive.location,
			employment_type:  self.primitive.employment_type,
			closes_at:        self.primitive.closes_at,
			fields:           ctx.localize(self.translations),
			requirements:     build_all(self.requirements, ctx),
			responsibilities: build_all(self.responsibilities, ctx),
			sort_order:       self.primitive.sort_order,
		}
	}
}

impl BuildResponse<JobPostingAdminResponse> for JobPosting {
	fn build_response(self, ctx: &ResponseContext) -> JobPostingAdminResponse {
		JobPostingAdminResponse {
			id:               self.primitive.id,
			code:             self.primitive.code,
			department:       self.primitive.department,
			location:         self.primitive.location,
			employment_type:  self.primitive.employment_type,
			closes_at:        self.primitive.closes_at,
			sort_order:       self.primitive.sort_order,
			is_active:        self.primitive.is_active,
			translations:     merge_all_translations(self.translations),
			requirements:     build_all(self.requirements, ctx),
			responsibilities: build_all(self.responsibilities, ctx),
			audit:            AuditResponse::new(
				self.primitive.created_at,
				self.primitive.updated_at,
				self.primitive.deleted_at,
				self.audit,
			),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPostingRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "department must be between 1 and 100 characters long"
	))]
	pub department:       String,
	#[validate(length(
		min = 1,
		max = 100,
		message = "location must be between 1 and 100 characters long"
	))]
	pub location:         String,
	pub employment_type:  EmploymentType,
	pub closes_at:        Option<NaiveDateTime>,
	#[serde(default)]
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:       i32,
	#[serde(default = "crate::schemas::active_default")]
	pub is_active:        bool,
	pub translations:     Translations<JobPostingFields>,
	#[serde(default)]
	pub requirements:     Vec<CreateLineItemRequest>,
	#[serde(default)]
	pub responsibilities: Vec<CreateLineItemRequest>,
}

impl CreateJobPostingRequest {
	pub fn to_insertable(
		self,
		required: Locale,
		created_by: i32,
	) -> Result<NewJobPosting, Error> {
		let check = FieldCheck::new()
			.validate("", &self)
			.required("translations", &self.translations, required)
			.translations("translations", &self.translations);
		let check = check_items(check, "requirements", &self.requirements, required);
		let check =
			check_items(check, "responsibilities", &self.responsibilities, required);

		check.finish()?;

		Ok(NewJobPosting {
			department: self.department,
			location: self.location,
			employment_type: self.employment_type,
			closes_at: self.closes_at,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: TranslationSet::new(self.translations, required)?,
			requirements: insertable_items(self.requirements, required)?,
			responsibilities: insertable_items(self.responsibilities, required)?,
			created_by,
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPostingRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "department must be between 1 and 100 characters long"
	))]
	pub department:      Option<String>,
	#[validate(length(
		min = 1,
		max = 100,
		message = "location must be between 1 and 100 characters long"
	))]
	pub location:        Option<String>,
	pub employment_type: Option<EmploymentType>,
	/// `null` keeps the posting open indefinitely
	#[serde(
		default,
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub closes_at:       Option<Option<NaiveDateTime>>,
	#[validate(range(min = 0, message = "sort order must not be negative"))]
	pub sort_order:      Option<i32>,
	pub is_active:       Option<bool>,
	#[serde(default)]
	pub translations:    Translations<JobPostingFields>,
}

impl UpdateJobPostingRequest {
	pub fn to_insertable(self, updated_by: i32) -> Result<JobPostingUpdate, Error> {
		FieldCheck::new()
			.validate("", &self)
			.translations("translations", &self.translations)
			.finish()?;

		Ok(JobPostingUpdate {
			department: self.department,
			location: self.location,
			employment_type: self.employment_type,
			closes_at: self.closes_at,
			sort_order: self.sort_order,
			is_active: self.is_active,
			translations: self.translations,
			updated_by,
		})
	}
}
