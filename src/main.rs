use std::process::ExitCode;

use anyhow::Context;
use job_post_form::{
    config::{get_config, init_config, Config},
    FormSettings, HttpJobCreator, HttpOptionSource, JobPostDraft, JobPostForm, OptionKind,
    SubmissionContext, SubmitOutcome,
};
use reqwest::Client;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config()?;

    let draft_path = std::env::args()
        .nth(1)
        .context("usage: job-post-form <draft.json>")?;
    let raw = tokio::fs::read_to_string(&draft_path)
        .await
        .with_context(|| format!("reading draft from {}", draft_path))?;
    let draft: JobPostDraft = serde_json::from_str(&raw)?;

    let settings = FormSettings::from_config(config)?;
    let creator = HttpJobCreator::new(
        config.job_api_url.clone(),
        settings.create_timeout,
        settings.success_message.clone(),
    )?;
    let form = JobPostForm::new(creator, settings);
    refresh_configured_options(&form, config).await;
    form.load_draft(draft)?;

    let ctx = SubmissionContext {
        curator: config.curator(),
        indicated_by: config.indicated_by,
    };
    info!(draft = %draft_path, "Submitting job post");

    match form.submit(&ctx).await? {
        SubmitOutcome::Succeeded { record, message } => {
            println!("{} ({})", message, record.blob());
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {}", field, message);
            }
            Ok(ExitCode::from(2))
        }
        SubmitOutcome::Failed { message } => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn refresh_configured_options(form: &JobPostForm<HttpJobCreator>, config: &Config) {
    let client = Client::new();
    let sources = [
        (OptionKind::Stack, &config.stack_options_url),
        (OptionKind::Requisites, &config.requisites_options_url),
        (OptionKind::Company, &config.company_options_url),
    ];

    for (kind, url) in sources {
        let Some(url) = url else { continue };
        let source = HttpOptionSource::new(client.clone(), url.clone());
        if let Err(e) = form.refresh_options(kind, &source).await {
            warn!(?kind, error = %e, "Continuing without refreshed options");
        }
    }
}
