//! Turns validated recipients into rendered outbound messages.

use mailr_common::message::Outbound;
use mailr_common::recipient::Recipient;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use crate::error::MailError;
use crate::template::TemplateSet;

/// Markup remover for the plain-text body. Deliberately a lossy tag
/// strip, not an HTML parser.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+(>|$)").unwrap());

/// Placeholder substituted with the recipient address in unsubscribe
/// URL templates.
const EMAIL_PLACEHOLDER: &str = "{{email}}";

/// Renders one message for one recipient.
///
/// The render context is the recipient's language entry merged with the
/// `name` and `email` fields; recipient fields win on collision.
pub fn build_message(recipient: &Recipient, templates: &TemplateSet) -> Result<Outbound, MailError> {
    let meta = templates.language(recipient.language).ok_or_else(|| {
        MailError::Template(format!(
            "language.json has no entry for '{}'",
            recipient.language
        ))
    })?;

    let subject = meta
        .get("subject")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            MailError::Template(format!(
                "language entry '{}' has no subject",
                recipient.language
            ))
        })?
        .to_string();

    let mut context = meta.clone();
    context.insert("name".to_string(), json!(recipient.name));
    context.insert("email".to_string(), json!(recipient.email.as_ref()));
    let context = Value::Object(context);

    let html = templates.render_html(&context)?;
    let text = strip_tags(&templates.render_text(&context)?);

    let unsubscribe_url = meta
        .get("meta")
        .and_then(|m| m.get("unsubscribe"))
        .and_then(|u| u.get("url"))
        .and_then(Value::as_str)
        .map(|url| url.replace(EMAIL_PLACEHOLDER, recipient.email.as_ref()))
        .unwrap_or_default();

    Ok(Outbound {
        to: recipient.email.to_string(),
        subject,
        text,
        html,
        unsubscribe_url,
    })
}

/// Builds the whole batch, preserving roster order.
///
/// Builder failures are template/data errors and abort the batch before
/// any send, regardless of the row policy; row-level validation already
/// happened in the roster loader.
pub fn build_all(recipients: &[Recipient], templates: &TemplateSet) -> Result<Vec<Outbound>, MailError> {
    recipients
        .iter()
        .map(|recipient| build_message(recipient, templates))
        .collect()
}

fn strip_tags(rendered: &str) -> String {
    TAG.replace_all(rendered, "").into_owned()
}
