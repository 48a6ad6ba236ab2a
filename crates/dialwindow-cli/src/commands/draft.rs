use crate::commands::{print_json, Context};
use crate::error::{invalid_input, rejected};
use crate::util::{parse_date_arg, print_errors, read_draft};
use anyhow::Result;
use clap::Args;
use dialwindow_core::domain::CampaignSubmission;
use dialwindow_core::dto::ValidationReportDto;
use dialwindow_core::rules::{Step, ValidationErrors, Validator};
use dialwindow_core::session::{CampaignForm, FieldUpdate, SubmitOutcome};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct NewArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Draft JSON file, or `-` for stdin
    pub file: PathBuf,
    /// Only run the rules for this step (1 or 2)
    #[arg(long)]
    pub step: Option<Step>,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Draft JSON file, or `-` for stdin
    pub file: PathBuf,
}

pub fn new_draft(ctx: &Context<'_>, args: NewArgs) -> Result<()> {
    let mut updates = Vec::new();
    if let Some(name) = args.name {
        updates.push(FieldUpdate::Name(name));
    }
    if let Some(zone) = args.timezone {
        if ctx.config.reference.timezone(&zone).is_none() {
            return Err(invalid_input(format!("unsupported timezone: {zone}")));
        }
        updates.push(FieldUpdate::Timezone(zone));
    }
    if let Some(start) = args.start {
        updates.push(FieldUpdate::StartDate(Some(parse_date_arg("--start", &start)?)));
    }
    if let Some(end) = args.end {
        updates.push(FieldUpdate::EndDate(Some(parse_date_arg("--end", &end)?)));
    }

    let mut form = CampaignForm::open(
        &ctx.config.defaults,
        ctx.config.reference.clone(),
        ctx.today,
        |_: CampaignSubmission| {},
    );
    for update in updates {
        form.apply(update);
    }
    print_json(form.draft())?;
    form.cancel();
    Ok(())
}

pub fn validate_draft(ctx: &Context<'_>, args: ValidateArgs) -> Result<()> {
    let draft = read_draft(&args.file)?;
    let validator = Validator::new(ctx.today).with_reference(&ctx.config.reference);
    let errors = match args.step {
        Some(step) => validator.validate_step(&draft, step),
        None => validator.validate_all(&draft),
    };
    debug!(
        step = ?args.step.map(|step| step.number()),
        errors = errors.len(),
        "draft validated"
    );

    let count = errors.len();
    if ctx.json {
        print_json(&ValidationReportDto::new(args.step, errors))?;
    } else if count == 0 {
        println!("valid");
    } else {
        println!("invalid:");
        print_errors(&errors);
    }

    if count > 0 {
        return Err(rejected(count));
    }
    Ok(())
}

pub fn submit_draft(ctx: &Context<'_>, args: SubmitArgs) -> Result<()> {
    let draft = read_draft(&args.file)?;
    let mut submitted: Option<CampaignSubmission> = None;
    let mut errors = ValidationErrors::new();
    {
        let mut form = CampaignForm::with_draft(
            draft,
            ctx.config.reference.clone(),
            ctx.today,
            |submission: CampaignSubmission| submitted = Some(submission),
        );
        if let SubmitOutcome::Rejected { .. } = form.submit() {
            errors = form.submit_errors().clone();
        }
    }

    match submitted {
        Some(submission) => {
            if ctx.json {
                print_json(&submission)?;
            } else {
                let days = submission.campaign.weekly_schedule.enabled_days();
                let caller = submission
                    .caller_number
                    .as_deref()
                    .unwrap_or(&submission.campaign.caller_id);
                println!(
                    "submitted {} from {} ({} day(s) per week)",
                    submission.campaign.name.trim(),
                    caller,
                    days.len()
                );
            }
            Ok(())
        }
        None => {
            let count = errors.len();
            if ctx.json {
                print_json(&ValidationReportDto::new(None, errors))?;
            } else {
                println!("rejected:");
                print_errors(&errors);
            }
            Err(rejected(count))
        }
    }
}
