//! # Roster Loading
//!
//! Reads the recipient CSV into validated [`Recipient`] records.
//!
//! Accepted shapes, comma-delimited, UTF-8:
//! * `name,email,language`
//! * `id,name,email,language`
//!
//! A header row is optional; it is recognized by the literal `email`
//! column name. Field whitespace is trimmed. Row order is preserved.

use std::path::Path;

use mailr_common::config::RowPolicy;
use mailr_common::recipient::{Recipient, RecipientError};
use mailr_common::warn;

use crate::error::MailError;

/// Skip accounting for a loaded roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Loads and validates the roster at `path`.
///
/// Under [`RowPolicy::Skip`] each malformed row is logged and counted;
/// under [`RowPolicy::Strict`] the first malformed row fails the load.
pub fn load(path: &Path, policy: RowPolicy) -> Result<(Vec<Recipient>, RosterSummary), MailError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
        return Err(MailError::Config(format!(
            "'{}' is not a .csv file",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| MailError::Roster(format!("cannot open '{}': {e}", path.display())))?;

    let mut recipients: Vec<Recipient> = Vec::new();
    let mut skipped: usize = 0;

    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;
        let parsed = record.map_err(|e| e.to_string()).and_then(|rec| {
            if line == 1 && is_header(&rec) {
                Ok(None)
            } else {
                parse_record(&rec).map(Some).map_err(|e| e.to_string())
            }
        });

        match parsed {
            Ok(Some(recipient)) => recipients.push(recipient),
            Ok(None) => {}
            Err(cause) => match policy {
                RowPolicy::Skip => {
                    warn!("skipping row {line}: {cause}");
                    skipped += 1;
                }
                RowPolicy::Strict => {
                    return Err(MailError::Roster(format!("row {line}: {cause}")));
                }
            },
        }
    }

    let summary = RosterSummary {
        loaded: recipients.len(),
        skipped,
    };
    Ok((recipients, summary))
}

fn parse_record(record: &csv::StringRecord) -> Result<Recipient, RecipientError> {
    match record.len() {
        3 => Recipient::parse(None, &record[0], &record[1], &record[2]),
        4 => Recipient::parse(Some(&record[0]), &record[1], &record[2], &record[3]),
        n => Err(RecipientError::ColumnCount(n)),
    }
}

/// A first row naming its own columns is a header, not data.
fn is_header(record: &csv::StringRecord) -> bool {
    record.iter().any(|field| field.eq_ignore_ascii_case("email"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
