#![cfg(test)]
use std::fs;
use std::io::Write;
use std::path::Path;

use mailr_common::config::{RowPolicy, RunConfig};
use mailr_core::builder;
use mailr_core::dispatch::Dispatcher;
use mailr_core::roster;
use mailr_core::template::TemplateSet;
use mailr_core::MailError;
use serde_json::json;

use crate::support::MockTransport;

const MIXED_ROSTER: &str = "\
Ada,ada@example.com,en
Brice,brice@example.fr,fr
Bogus,not-an-email,en
";

fn write_roster(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("emails.csv");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn write_templates(dir: &Path) -> TemplateSet {
    let base = dir.join("welcome");
    fs::create_dir_all(&base).unwrap();
    fs::write(base.join("text.hbs"), "{{greeting}} {{name}}").unwrap();
    fs::write(base.join("html.hbs"), "<p>{{greeting}} {{name}}</p>").unwrap();
    fs::write(
        base.join("language.json"),
        json!({
            "en": {
                "subject": "Welcome",
                "from": "The Team",
                "greeting": "Hello",
                "meta": {"unsubscribe": {"url": "https://example.com/out?email={{email}}"}}
            },
            "fr": {
                "subject": "Bienvenue",
                "from": "L'équipe",
                "greeting": "Bonjour"
            }
        })
        .to_string(),
    )
    .unwrap();
    TemplateSet::load(dir, "welcome").unwrap()
}

#[tokio::test]
async fn lenient_run_skips_the_bad_row_and_sends_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_roster(dir.path(), MIXED_ROSTER);
    let templates = write_templates(dir.path());

    let (recipients, summary) = roster::load(&csv, RowPolicy::Skip).unwrap();
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.skipped, 1);

    let messages = builder::build_all(&recipients, &templates).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].to, "ada@example.com");
    assert_eq!(messages[0].text, "Hello Ada");
    assert_eq!(
        messages[0].unsubscribe_url,
        "https://example.com/out?email=ada@example.com"
    );
    assert_eq!(messages[1].to, "brice@example.fr");
    assert_eq!(messages[1].text, "Bonjour Brice");
    assert_eq!(messages[1].unsubscribe_url, "");

    let transport = MockTransport::accepting();
    let report = Dispatcher::new(&RunConfig::default())
        .run(&transport, &messages, None)
        .await
        .unwrap();

    assert_eq!(report.sent(), 2);
    assert_eq!(transport.attempts().len(), 2);
}

#[tokio::test]
async fn strict_run_aborts_with_zero_sends() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_roster(dir.path(), MIXED_ROSTER);

    let result = roster::load(&csv, RowPolicy::Strict);
    assert!(matches!(result, Err(MailError::Roster(_))));
    // Nothing downstream runs; the transport is never touched.
}

#[tokio::test]
async fn rendered_payload_reaches_the_transport_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_roster(dir.path(), "Ada,ada@example.com,en\n");
    let templates = write_templates(dir.path());

    let (recipients, _) = roster::load(&csv, RowPolicy::Skip).unwrap();
    let messages = builder::build_all(&recipients, &templates).unwrap();

    let transport = MockTransport::accepting();
    Dispatcher::new(&RunConfig::default())
        .run(&transport, &messages, None)
        .await
        .unwrap();

    let attempts = transport.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0], messages[0]);
    assert_eq!(attempts[0].html, "<p>Hello Ada</p>");
    assert_eq!(attempts[0].subject, "Welcome");
}
