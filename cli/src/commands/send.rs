use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use colored::*;

use crate::commands::SendArgs;
use crate::terminal::{colors, format, print, spinner};
use crate::{mprint, prompt};
use mailr_common::config::{RowPolicy, RunConfig, SmtpSettings};
use mailr_common::report::{Outcome, SendReport};
use mailr_common::{info, warn};
use mailr_core::builder;
use mailr_core::dispatch::Dispatcher;
use mailr_core::roster::{self, RosterSummary};
use mailr_core::template::TemplateSet;
use mailr_core::transport::SmtpSender;

pub async fn send(args: SendArgs, dev: bool) -> anyhow::Result<()> {
    let template_dir = prompt::template_dir(args.template_dir)?;
    let template = prompt::template(args.template, &template_dir)?;
    let file = prompt::roster_file(args.file)?;
    let sender_address = prompt::sender_email(args.email)?;
    let password = prompt::password(args.password)?;

    let run = RunConfig {
        limit: args.limit,
        retry_delay: Duration::from_secs(args.retry_delay),
        max_attempts: args.max_attempts,
        row_policy: if args.strict {
            RowPolicy::Strict
        } else {
            RowPolicy::Skip
        },
        dev,
    };

    let (recipients, roster_summary) = roster::load(&file, run.row_policy)
        .with_context(|| format!("failed to load roster '{}'", file.display()))?;
    info!(
        "{} recipients loaded, {} rows skipped",
        recipients.len(),
        roster_summary.skipped
    );
    if recipients.is_empty() {
        bail!("roster '{}' has no valid recipients", file.display());
    }

    let templates = TemplateSet::load(&template_dir, &template)
        .with_context(|| format!("failed to load template '{template}'"))?;

    let messages = builder::build_all(&recipients, &templates)
        .context("failed to render the message batch")?;
    info!("{} messages rendered", messages.len());

    let settings = SmtpSettings {
        host: args.host,
        port: args.port,
        sender: sender_address,
        password,
        display_name: templates.sender_display_name().unwrap_or_default().to_string(),
        pooled: !args.no_pool,
        verbose: dev,
    };
    let transport = SmtpSender::connect(&settings)?;

    print::header("sending");
    let spinner_handle = spinner::get_spinner();
    spinner_handle.set_message("Verifying the relay connection...".to_string());

    let total = messages.len();
    let start_time: Instant = Instant::now();
    let dispatcher = Dispatcher::new(&run);
    let report = dispatcher
        .run(
            &transport,
            &messages,
            Some(Box::new(move |sent| {
                spinner::report_send_progress(sent, total)
            })),
        )
        .await
        .context("mail run aborted before the first send")?;
    spinner_handle.finish_and_clear();

    run_ends(&report, roster_summary, start_time.elapsed());
    Ok(())
}

fn run_ends(report: &SendReport, roster: RosterSummary, total_time: Duration) {
    mprint!();
    print::header("Mail Run");
    print_failures(report);
    print_summary(report, roster, total_time);
    print::end_of_program();
}

fn print_failures(report: &SendReport) {
    let failures: Vec<&Outcome> = report
        .outcomes()
        .iter()
        .filter(|outcome| matches!(outcome, Outcome::Failed { .. }))
        .collect();

    for (idx, outcome) in failures.iter().enumerate() {
        print::tree_head(idx, format::outcome_recipient(outcome));
        print::as_tree_one_level(format::outcome_to_details(outcome));
        if idx + 1 != failures.len() {
            mprint!();
        }
    }
    if !failures.is_empty() {
        mprint!();
    }
}

fn print_summary(report: &SendReport, roster: RosterSummary, total_time: Duration) {
    let sent: ColoredString = format!("{} sent", report.sent()).bold().green();
    let failed: ColoredString = format!("{} failed", report.failed()).bold().red();
    let capped: ColoredString = format!("{} not attempted", report.not_attempted())
        .bold()
        .yellow();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Dispatch complete: {sent}, {failed}, {capped} in {total_time}")
            .color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());

    if roster.skipped > 0 {
        warn!("{} roster rows were skipped before dispatch", roster.skipped);
    }
}
