use crate::terminal::colors;
use colored::*;
use mailr_common::report::Outcome;

pub type Detail = (String, ColoredString);

/// Tree details for one message outcome.
pub fn outcome_to_details(outcome: &Outcome) -> Vec<Detail> {
    match outcome {
        Outcome::Sent {
            message_id,
            attempts,
            ..
        } => vec![
            (
                String::from("Status"),
                "sent".color(colors::PRIMARY).bold(),
            ),
            (String::from("Reply"), message_id.normal()),
            (String::from("Tries"), attempts.to_string().normal()),
        ],
        Outcome::Failed {
            attempts, cause, ..
        } => vec![
            (String::from("Status"), "failed".red().bold()),
            (String::from("Cause"), cause.red()),
            (String::from("Tries"), attempts.to_string().normal()),
        ],
        Outcome::NotAttempted { .. } => vec![(
            String::from("Status"),
            "not attempted (send cap reached)".yellow(),
        )],
    }
}

pub fn outcome_recipient(outcome: &Outcome) -> &str {
    match outcome {
        Outcome::Sent { to, .. }
        | Outcome::Failed { to, .. }
        | Outcome::NotAttempted { to } => to,
    }
}
