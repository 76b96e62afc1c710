//! Interactive fallbacks for values the command line did not supply.
//!
//! Every prompt carries a sensible default; sender credentials default
//! to the `MAILR_USER` / `MAILR_PASSWORD` environment variables. A
//! value that fails validation is fatal, prompted or not.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::bail;
use dialoguer::{Input, Password, Select};
use validator::ValidateEmail;

pub fn template_dir(cli: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let dir: PathBuf = match cli {
        Some(dir) => dir,
        None => Input::<String>::new()
            .with_prompt("Enter the path to the templates directory")
            .default("templates".to_string())
            .interact_text()?
            .into(),
    };

    if !dir.is_dir() {
        bail!("templates directory '{}' does not exist", dir.display());
    }
    Ok(dir)
}

pub fn template(cli: Option<String>, template_dir: &Path) -> anyhow::Result<String> {
    let choices = list_templates(template_dir)?;
    if choices.is_empty() {
        bail!("no templates found in '{}'", template_dir.display());
    }

    match cli {
        Some(name) if choices.contains(&name) => Ok(name),
        Some(name) => bail!(
            "template '{}' not found in '{}'",
            name,
            template_dir.display()
        ),
        None => {
            let index = Select::new()
                .with_prompt("Which template do you want to send?")
                .items(&choices)
                .default(0)
                .interact()?;
            Ok(choices[index].clone())
        }
    }
}

pub fn roster_file(cli: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let file: PathBuf = match cli {
        Some(file) => file,
        None => Input::<String>::new()
            .with_prompt("Enter the path to a CSV file with name, email, and language columns")
            .default("emails.csv".to_string())
            .interact_text()?
            .into(),
    };

    if !file.is_file() {
        bail!("CSV file '{}' does not exist", file.display());
    }
    Ok(file)
}

pub fn sender_email(cli: Option<String>) -> anyhow::Result<String> {
    let email = match cli {
        Some(email) => email,
        None => {
            let mut input =
                Input::<String>::new().with_prompt("Enter the email address to send from");
            if let Ok(user) = env::var("MAILR_USER") {
                input = input.default(user);
            }
            input.interact_text()?
        }
    };

    if !email.validate_email() {
        bail!("'{email}' is not a valid sender address");
    }
    Ok(email)
}

pub fn password(cli: Option<String>) -> anyhow::Result<String> {
    let password = match cli {
        Some(password) => password,
        None => {
            // dialoguer has no default for password prompts; an empty
            // entry falls back to the environment.
            let typed = Password::new()
                .with_prompt("Enter the password to use")
                .allow_empty_password(true)
                .interact()?;
            if typed.is_empty() {
                env::var("MAILR_PASSWORD").unwrap_or_default()
            } else {
                typed
            }
        }
    };

    if password.is_empty() {
        bail!("a password is required to authenticate with the relay");
    }
    Ok(password)
}

/// Subdirectories of the template dir, sorted, each one a candidate
/// template.
fn list_templates(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    Ok(names)
}
