pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::config::FormSettings;
pub use crate::dto::job_post_dto::{
    Field, FieldBinding, FieldChange, FieldValue, FormErrors, SetChange, SubmissionContext,
    SubmitOutcome,
};
pub use crate::error::{Error, Result};
pub use crate::models::curator::CuratorIdentity;
pub use crate::models::job_post::{CompanyRef, JobPostDraft, JobPostRecord, JobStatus};
pub use crate::models::select_option::{OptionKind, SelectOption};
pub use crate::services::job_creator::{HttpJobCreator, JobCreator};
pub use crate::services::option_source::{HttpOptionSource, OptionSource, StaticOptionSource};
pub use crate::services::submission_service::{JobPostForm, SubmissionPhase};
