use validator::{Validate, ValidationErrors};

use crate::dto::job_post_dto::{Field, FormErrors};
use crate::models::job_post::JobPostDraft;

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

pub fn validate_draft(draft: &JobPostDraft) -> Result<(), FormErrors> {
    validate(draft).map_err(|errors| form_errors(&errors))
}

pub fn form_errors(errors: &ValidationErrors) -> FormErrors {
    let mut form_errors = FormErrors::new();

    for (name, field_errors) in errors.field_errors() {
        let Some(field) = Field::from_name(&name) else {
            continue;
        };
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| default_message(field, &error.code));
            form_errors.insert(field, message);
        }
    }

    form_errors
}

fn default_message(field: Field, code: &str) -> String {
    match code {
        "required" => format!("{} is required", field),
        _ => format!("{} is invalid", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_post::{CompanyRef, STACK_EMPTY_MESSAGE, STACK_LIMIT_MESSAGE};

    fn complete_draft() -> JobPostDraft {
        JobPostDraft {
            title: "Backend Engineer".into(),
            company: Some(CompanyRef::Name("Acme".into())),
            description: "Build services".into(),
            location: "Remote".into(),
            requisites: ["pcd".to_string()].into_iter().collect(),
            stack: ["go", "rust"].iter().map(|s| s.to_string()).collect(),
            url: "https://acme.example/jobs/1".into(),
            source: "linkedin".into(),
        }
    }

    fn without(field: Field) -> JobPostDraft {
        let mut draft = complete_draft();
        match field {
            Field::Title => draft.title.clear(),
            Field::Company => draft.company = None,
            Field::Description => draft.description.clear(),
            Field::Location => draft.location.clear(),
            Field::Requisites => draft.requisites.clear(),
            Field::Stack => draft.stack.clear(),
            Field::Url => draft.url.clear(),
            Field::Source => draft.source.clear(),
        }
        draft
    }

    #[test]
    fn each_missing_required_field_is_reported() {
        for field in Field::ALL {
            let result = validate_draft(&without(field));
            if field == Field::Requisites {
                assert!(result.is_ok(), "empty requisites must be accepted");
                continue;
            }
            let errors = result.unwrap_err();
            assert_eq!(errors.len(), 1, "only {} should fail", field);
            assert!(errors.get(field).is_some(), "{} should be reported", field);
        }
    }

    #[test]
    fn missing_text_uses_required_message() {
        let errors = validate_draft(&without(Field::Title)).unwrap_err();
        assert_eq!(errors.get(Field::Title), Some("title is required"));

        let errors = validate_draft(&without(Field::Company)).unwrap_err();
        assert_eq!(errors.get(Field::Company), Some("company is required"));
    }

    #[test]
    fn stack_of_five_passes_and_six_fails_with_cap_message() {
        let mut draft = complete_draft();
        draft.stack = (0..5).map(|i| format!("tech-{}", i)).collect();
        assert!(validate_draft(&draft).is_ok());

        draft.stack.insert("tech-5".into());
        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.get(Field::Stack), Some(STACK_LIMIT_MESSAGE));
    }

    #[test]
    fn empty_stack_is_distinct_from_cap() {
        let errors = validate_draft(&without(Field::Stack)).unwrap_err();
        assert_eq!(errors.get(Field::Stack), Some(STACK_EMPTY_MESSAGE));
    }
}
