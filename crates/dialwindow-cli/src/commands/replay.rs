use crate::commands::{print_json, Context};
use crate::util::{print_errors, read_json};
use anyhow::Result;
use clap::Args;
use dialwindow_core::domain::{CampaignDraft, CampaignSubmission};
use dialwindow_core::rules::{Step, ValidationErrors};
use dialwindow_core::session::{CampaignForm, FieldUpdate, StepOutcome, SubmitOutcome};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::warn;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Script JSON file, or `-` for stdin
    pub file: PathBuf,
}

/// A scripted form session: optional starting draft plus user actions.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplayScript {
    #[serde(default)]
    draft: Option<CampaignDraft>,
    actions: Vec<ReplayAction>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ReplayAction {
    Set { update: FieldUpdate },
    Next,
    Previous,
    Submit,
    Cancel,
}

impl ReplayAction {
    fn name(&self) -> &'static str {
        match self {
            ReplayAction::Set { .. } => "set",
            ReplayAction::Next => "next",
            ReplayAction::Previous => "previous",
            ReplayAction::Submit => "submit",
            ReplayAction::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ActionOutcome {
    Step(StepOutcome),
    Submit(SubmitOutcome),
    Edit { derived: bool },
    Moved { step: Step },
    Cancelled { cancelled: bool },
}

#[derive(Debug, Serialize)]
struct TraceEntryDto {
    action: &'static str,
    step: Step,
    result: ActionOutcome,
    errors: ValidationErrors,
}

#[derive(Debug, Serialize)]
struct ReplayReportDto {
    trace: Vec<TraceEntryDto>,
    draft: Option<CampaignDraft>,
    submission: Option<CampaignSubmission>,
    cancelled: bool,
}

pub fn replay(ctx: &Context<'_>, args: ReplayArgs) -> Result<()> {
    let script: ReplayScript = read_json(&args.file)?;
    let submitted: Rc<RefCell<Option<CampaignSubmission>>> = Rc::default();
    let sink = Rc::clone(&submitted);
    let on_complete = move |submission: CampaignSubmission| {
        *sink.borrow_mut() = Some(submission);
    };
    let reference = ctx.config.reference.clone();
    let form = match script.draft {
        Some(draft) => CampaignForm::with_draft(draft, reference, ctx.today, on_complete),
        None => CampaignForm::open(&ctx.config.defaults, reference, ctx.today, on_complete),
    };

    let mut form = Some(form);
    let mut trace = Vec::with_capacity(script.actions.len());
    let total = script.actions.len();
    for (index, action) in script.actions.into_iter().enumerate() {
        let Some(active) = form.as_mut() else {
            warn!(skipped = total - index, "actions after cancel ignored");
            break;
        };
        let name = action.name();
        let result = match action {
            ReplayAction::Set { update } => ActionOutcome::Edit {
                derived: active.apply(update),
            },
            ReplayAction::Next => ActionOutcome::Step(active.next()),
            ReplayAction::Previous => ActionOutcome::Moved {
                step: active.previous(),
            },
            ReplayAction::Submit => ActionOutcome::Submit(active.submit()),
            ReplayAction::Cancel => {
                let step = active.step();
                if let Some(closed) = form.take() {
                    closed.cancel();
                }
                trace.push(TraceEntryDto {
                    action: name,
                    step,
                    result: ActionOutcome::Cancelled { cancelled: true },
                    errors: ValidationErrors::new(),
                });
                continue;
            }
        };
        trace.push(TraceEntryDto {
            action: name,
            step: active.step(),
            result,
            errors: active.visible_errors(),
        });
    }

    let cancelled = form.is_none();
    let draft = form.as_ref().map(|active| active.draft().clone());
    drop(form);
    let report = ReplayReportDto {
        trace,
        draft,
        submission: submitted.borrow_mut().take(),
        cancelled,
    };

    if ctx.json {
        return print_json(&report);
    }
    print_human(&report);
    Ok(())
}

fn print_human(report: &ReplayReportDto) {
    for (index, entry) in report.trace.iter().enumerate() {
        println!(
            "{}. {} -> step {} ({})",
            index + 1,
            entry.action,
            entry.step,
            describe(&entry.result)
        );
        print_errors(&entry.errors);
    }
    match (&report.submission, report.cancelled) {
        (Some(submission), _) => println!("submitted {}", submission.campaign.name.trim()),
        (None, true) => println!("cancelled"),
        (None, false) => println!("not submitted"),
    }
}

fn describe(result: &ActionOutcome) -> String {
    match result {
        ActionOutcome::Step(StepOutcome::Advanced { step }) => format!("advanced to {step}"),
        ActionOutcome::Step(StepOutcome::Blocked { errors }) => format!("blocked, {errors} error(s)"),
        ActionOutcome::Step(StepOutcome::Ready) => "ready to submit".to_string(),
        ActionOutcome::Submit(SubmitOutcome::Submitted) => "submitted".to_string(),
        ActionOutcome::Submit(SubmitOutcome::Rejected { errors }) => {
            format!("rejected, {errors} error(s)")
        }
        ActionOutcome::Submit(SubmitOutcome::AlreadySubmitted) => "already submitted".to_string(),
        ActionOutcome::Edit { derived: true } => "updated, weekdays derived".to_string(),
        ActionOutcome::Edit { derived: false } => "updated".to_string(),
        ActionOutcome::Moved { step } => format!("moved to {step}"),
        ActionOutcome::Cancelled { .. } => "cancelled".to_string(),
    }
}
