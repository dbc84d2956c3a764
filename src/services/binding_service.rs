use std::collections::BTreeSet;

use crate::dto::job_post_dto::{Field, FieldBinding, FieldChange, FieldValue, FormErrors, SetChange};
use crate::models::job_post::JobPostDraft;

pub fn reduce(mut draft: JobPostDraft, change: FieldChange) -> JobPostDraft {
    match change {
        FieldChange::Title(value) => draft.title = value,
        FieldChange::Company(value) => draft.company = value,
        FieldChange::Description(value) => draft.description = value,
        FieldChange::Location(value) => draft.location = value,
        FieldChange::Requisites(change) => apply_set_change(&mut draft.requisites, change),
        FieldChange::Stack(change) => apply_set_change(&mut draft.stack, change),
        FieldChange::Url(value) => draft.url = value,
        FieldChange::Source(value) => draft.source = value,
    }
    draft
}

fn apply_set_change(set: &mut BTreeSet<String>, change: SetChange) {
    match change {
        SetChange::Select(id) => {
            set.insert(id);
        }
        SetChange::Deselect(id) => {
            set.remove(&id);
        }
        SetChange::Toggle(id) => {
            if !set.remove(&id) {
                set.insert(id);
            }
        }
        SetChange::Replace(ids) => *set = ids,
    }
}

pub fn field_value(draft: &JobPostDraft, field: Field) -> FieldValue {
    match field {
        Field::Title => FieldValue::Text(draft.title.clone()),
        Field::Company => FieldValue::Company(draft.company.clone()),
        Field::Description => FieldValue::Text(draft.description.clone()),
        Field::Location => FieldValue::Text(draft.location.clone()),
        Field::Requisites => FieldValue::Tags(draft.requisites.clone()),
        Field::Stack => FieldValue::Tags(draft.stack.clone()),
        Field::Url => FieldValue::Text(draft.url.clone()),
        Field::Source => FieldValue::Text(draft.source.clone()),
    }
}

pub fn bind(draft: &JobPostDraft, errors: &FormErrors, field: Field) -> FieldBinding {
    FieldBinding {
        field,
        value: field_value(draft, field),
        error: errors.get(field).map(str::to_string),
    }
}
