use chrono::{DateTime, FixedOffset, Locale, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::curator::CuratorIdentity;
use crate::models::job_post::{CompanyRef, JobPostDraft, JobPostRecord, RecordParts};
use crate::models::select_option::{OptionCatalog, OptionKind};
use crate::utils::slug::{derive_blob, BlobParts};
use crate::utils::time::blob_date;
use crate::utils::validation::validate;

#[derive(Debug, Clone, Copy)]
pub struct BlobCalendar {
    pub locale: Locale,
    pub offset: FixedOffset,
}

#[derive(Debug, Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub curator: Option<&'a CuratorIdentity>,
    pub curator_role: &'a str,
    pub indicated_by: Option<i64>,
    pub company_label: &'a str,
    pub now: DateTime<Utc>,
    pub calendar: BlobCalendar,
}

/// Text used for the company in the blob: the option label for selected ids,
/// the typed name otherwise.
pub fn company_label(company: &CompanyRef, catalog: &OptionCatalog) -> String {
    match company {
        CompanyRef::Id(id) => catalog
            .label_of(OptionKind::Company, &id.to_string())
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string()),
        CompanyRef::Name(name) => name.trim().to_string(),
    }
}

pub fn require_curator<'a>(
    curator: Option<&'a CuratorIdentity>,
    role: &str,
) -> Result<&'a CuratorIdentity> {
    let curator = curator.ok_or_else(|| {
        Error::Precondition("Sign in as a curator before posting a job".to_string())
    })?;
    if !curator.has_role(role) {
        return Err(Error::Precondition(format!(
            "Only curators can post jobs ({} lacks the {} role)",
            curator.name, role
        )));
    }
    Ok(curator)
}

pub fn assemble_record(draft: &JobPostDraft, ctx: &AssemblyContext<'_>) -> Result<JobPostRecord> {
    let curator = require_curator(ctx.curator, ctx.curator_role)?;
    validate(draft)?;

    let company = draft
        .company
        .clone()
        .ok_or_else(|| Error::Precondition("company is required".to_string()))?;

    let date = blob_date(ctx.now, ctx.calendar.offset, ctx.calendar.locale);
    let blob = derive_blob(&BlobParts {
        title: draft.title.trim(),
        stack: &draft.stack,
        company: ctx.company_label,
        curator_name: &curator.name,
        year: date.year,
        month: &date.month,
        day: date.day,
    });
    debug!(%blob, curator = curator.id, "Assembled job post");

    Ok(JobPostRecord::open(RecordParts {
        title: draft.title.trim().to_string(),
        company,
        description: draft.description.clone(),
        location: draft.location.trim().to_string(),
        requisites: draft.requisites.clone(),
        stack: draft.stack.clone(),
        url: draft.url.trim().to_string(),
        source: draft.source.trim().to_string(),
        now: ctx.now,
        curator: curator.id,
        indicated_by: ctx.indicated_by,
        blob,
    }))
}
