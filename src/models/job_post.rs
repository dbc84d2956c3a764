use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const MAX_STACK_SELECTIONS: usize = 5;

pub const STACK_LIMIT_MESSAGE: &str = "No more than 5 technologies";
pub const STACK_EMPTY_MESSAGE: &str = "Select at least one technology";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyRef {
    Id(i64),
    Name(String),
}

impl CompanyRef {
    pub fn is_blank(&self) -> bool {
        matches!(self, CompanyRef::Name(name) if name.trim().is_empty())
    }
}

impl fmt::Display for CompanyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyRef::Id(id) => write!(f, "{}", id),
            CompanyRef::Name(name) => write!(f, "{}", name.trim()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPostDraft {
    #[validate(custom(function = "required_text"))]
    pub title: String,
    #[validate(required, custom(function = "required_company"))]
    pub company: Option<CompanyRef>,
    #[validate(custom(function = "required_text"))]
    pub description: String,
    #[validate(custom(function = "required_text"))]
    pub location: String,
    pub requisites: BTreeSet<String>,
    #[validate(custom(function = "stack_selection"))]
    pub stack: BTreeSet<String>,
    #[validate(custom(function = "required_text"))]
    pub url: String,
    #[validate(custom(function = "required_text"))]
    pub source: String,
}

fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn required_company(company: &CompanyRef) -> Result<(), ValidationError> {
    if company.is_blank() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn stack_selection(stack: &BTreeSet<String>) -> Result<(), ValidationError> {
    if stack.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed(STACK_EMPTY_MESSAGE));
        return Err(err);
    }
    if stack.len() > MAX_STACK_SELECTIONS {
        let mut err = ValidationError::new("max_stack");
        err.message = Some(Cow::Borrowed(STACK_LIMIT_MESSAGE));
        err.add_param(Cow::Borrowed("max"), &MAX_STACK_SELECTIONS);
        err.add_param(Cow::Borrowed("actual"), &stack.len());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostRecord {
    title: String,
    company: CompanyRef,
    description: String,
    location: String,
    requisites: BTreeSet<String>,
    stack: BTreeSet<String>,
    url: String,
    source: String,
    status: JobStatus,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    curator: i64,
    indicated_by: Option<i64>,
    blob: String,
}

pub(crate) struct RecordParts {
    pub title: String,
    pub company: CompanyRef,
    pub description: String,
    pub location: String,
    pub requisites: BTreeSet<String>,
    pub stack: BTreeSet<String>,
    pub url: String,
    pub source: String,
    pub now: DateTime<Utc>,
    pub curator: i64,
    pub indicated_by: Option<i64>,
    pub blob: String,
}

impl JobPostRecord {
    pub(crate) fn open(parts: RecordParts) -> Self {
        Self {
            title: parts.title,
            company: parts.company,
            description: parts.description,
            location: parts.location,
            requisites: parts.requisites,
            stack: parts.stack,
            url: parts.url,
            source: parts.source,
            status: JobStatus::Open,
            created_at: parts.now,
            modified_at: parts.now,
            curator: parts.curator,
            indicated_by: parts.indicated_by,
            blob: parts.blob,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &CompanyRef {
        &self.company
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn requisites(&self) -> &BTreeSet<String> {
        &self.requisites
    }

    pub fn stack(&self) -> &BTreeSet<String> {
        &self.stack
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn curator(&self) -> i64 {
        self.curator
    }

    pub fn indicated_by(&self) -> Option<i64> {
        self.indicated_by
    }

    pub fn blob(&self) -> &str {
        &self.blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> JobPostDraft {
        JobPostDraft {
            title: "Backend Engineer".into(),
            company: Some(CompanyRef::Name("Acme".into())),
            description: "Build services".into(),
            location: "Remote".into(),
            requisites: BTreeSet::new(),
            stack: ["go", "rust"].iter().map(|s| s.to_string()).collect(),
            url: "https://acme.example/jobs/1".into(),
            source: "linkedin".into(),
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let mut draft = complete_draft();
        draft.location = "   ".into();
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("location"));
    }

    #[test]
    fn company_must_be_present_and_not_blank() {
        let mut draft = complete_draft();
        draft.company = None;
        assert!(draft.validate().unwrap_err().field_errors().contains_key("company"));

        draft.company = Some(CompanyRef::Name(" ".into()));
        assert!(draft.validate().unwrap_err().field_errors().contains_key("company"));

        draft.company = Some(CompanyRef::Id(7));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn stack_cap_uses_dedicated_code() {
        let mut draft = complete_draft();
        draft.stack = (0..6).map(|i| format!("tech-{}", i)).collect();
        let errors = draft.validate().unwrap_err();
        let stack_errors = errors.field_errors();
        let codes: Vec<String> = stack_errors["stack"].iter().map(|e| e.code.to_string()).collect();
        assert_eq!(codes, vec!["max_stack".to_string()]);
    }

    #[test]
    fn company_ref_accepts_numbers_and_text() {
        let by_id: CompanyRef = serde_json::from_str("12").unwrap();
        assert_eq!(by_id, CompanyRef::Id(12));
        let by_name: CompanyRef = serde_json::from_str("\"Acme\"").unwrap();
        assert_eq!(by_name, CompanyRef::Name("Acme".into()));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&JobStatus::Open).unwrap(), "\"open\"");
    }
}
