//! # Template Set
//!
//! One sendable template is a directory holding the text/HTML pair and
//! its per-language metadata:
//!
//! ```text
//! {template_dir}/{template}/text.hbs
//! {template_dir}/{template}/html.hbs
//! {template_dir}/{template}/language.json
//! ```
//!
//! `language.json` maps a language code to `{ subject, from, meta, ... }`;
//! every field of the entry is merged into the render context, so
//! templates can reference arbitrary per-language values.
//!
//! Both templates compile at load time. Any compile or metadata failure
//! is fatal before a single message is built.

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use mailr_common::recipient::Language;
use serde_json::{Map, Value};

use crate::error::MailError;

const TEXT_TEMPLATE: &str = "text";
const HTML_TEMPLATE: &str = "html";

pub struct TemplateSet {
    handlebars: Handlebars<'static>,
    languages: Map<String, Value>,
}

impl TemplateSet {
    /// Compiles `text.hbs` and `html.hbs` and parses `language.json`
    /// from `{template_dir}/{name}`.
    pub fn load(template_dir: &Path, name: &str) -> Result<Self, MailError> {
        let base = template_dir.join(name);

        let mut handlebars = Handlebars::new();
        for (template_name, file) in [(TEXT_TEMPLATE, "text.hbs"), (HTML_TEMPLATE, "html.hbs")] {
            let source = fs::read_to_string(base.join(file))
                .map_err(|e| MailError::Template(format!("cannot read {file}: {e}")))?;
            handlebars
                .register_template_string(template_name, source)
                .map_err(|e| MailError::Template(format!("cannot compile {file}: {e}")))?;
        }

        let language_data = fs::read_to_string(base.join("language.json"))
            .map_err(|e| MailError::Template(format!("cannot read language.json: {e}")))?;
        let languages: Map<String, Value> = serde_json::from_str(&language_data)
            .map_err(|e| MailError::Template(format!("invalid language.json: {e}")))?;

        Ok(Self {
            handlebars,
            languages,
        })
    }

    /// Metadata entry for one language, if `language.json` declares it.
    pub fn language(&self, language: Language) -> Option<&Map<String, Value>> {
        self.languages.get(language.code()).and_then(Value::as_object)
    }

    /// Display name for the sender, taken from the English entry the way
    /// the transport banner expects it.
    pub fn sender_display_name(&self) -> Option<&str> {
        self.languages
            .get(Language::En.code())
            .and_then(|entry| entry.get("from"))
            .and_then(Value::as_str)
    }

    pub fn render_text(&self, context: &Value) -> Result<String, MailError> {
        self.render(TEXT_TEMPLATE, context)
    }

    pub fn render_html(&self, context: &Value) -> Result<String, MailError> {
        self.render(HTML_TEMPLATE, context)
    }

    fn render(&self, template_name: &str, context: &Value) -> Result<String, MailError> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| MailError::Template(format!("cannot render {template_name}: {e}")))
    }
}
