use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::curator::CuratorIdentity;
use crate::models::job_post::{CompanyRef, JobPostRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Company,
    Description,
    Location,
    Requisites,
    Stack,
    Url,
    Source,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Title,
        Field::Company,
        Field::Description,
        Field::Location,
        Field::Requisites,
        Field::Stack,
        Field::Url,
        Field::Source,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Company => "company",
            Field::Description => "description",
            Field::Location => "location",
            Field::Requisites => "requisites",
            Field::Stack => "stack",
            Field::Url => "url",
            Field::Source => "source",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetChange {
    Select(String),
    Deselect(String),
    Toggle(String),
    Replace(BTreeSet<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Title(String),
    Company(Option<CompanyRef>),
    Description(String),
    Location(String),
    Requisites(SetChange),
    Stack(SetChange),
    Url(String),
    Source(String),
}

impl FieldChange {
    pub fn field(&self) -> Field {
        match self {
            FieldChange::Title(_) => Field::Title,
            FieldChange::Company(_) => Field::Company,
            FieldChange::Description(_) => Field::Description,
            FieldChange::Location(_) => Field::Location,
            FieldChange::Requisites(_) => Field::Requisites,
            FieldChange::Stack(_) => Field::Stack,
            FieldChange::Url(_) => Field::Url,
            FieldChange::Source(_) => Field::Source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Text(String),
    Company(Option<CompanyRef>),
    Tags(BTreeSet<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBinding {
    pub field: Field,
    pub value: FieldValue,
    pub error: Option<String>,
}

/// Field name to human-readable message, produced by submit-time validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionContext {
    pub curator: Option<CuratorIdentity>,
    pub indicated_by: Option<i64>,
}

impl SubmissionContext {
    pub fn for_curator(curator: CuratorIdentity) -> Self {
        Self {
            curator: Some(curator),
            indicated_by: None,
        }
    }

    pub fn indicated_by(mut self, referrer: i64) -> Self {
        self.indicated_by = Some(referrer);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(FormErrors),
    Succeeded {
        record: JobPostRecord,
        message: String,
    },
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded { .. })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJobResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("salary"), None);
    }

    #[test]
    fn form_errors_keep_first_message_per_field() {
        let mut errors = FormErrors::new();
        errors.insert(Field::Stack, "first");
        errors.insert(Field::Stack, "second");
        errors.insert(Field::Title, "title is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Stack), Some("first"));
        assert_eq!(errors.to_string(), "title: title is required; stack: first");
    }
}
