pub mod info;
pub mod send;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mailr")]
#[command(about = "A batch mail-merge sender.")]
pub struct CommandLine {
    /// Run in development mode (debug logging, verbose transport)
    #[arg(short = 'v', long, global = true)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show tool and environment information
    #[command(alias = "i")]
    Info,
    /// Render a template for every roster row and dispatch over SMTP
    #[command(alias = "s")]
    Send(SendArgs),
}

#[derive(Args)]
pub struct SendArgs {
    /// Path to the templates directory
    #[arg(short = 'd', long)]
    pub template_dir: Option<PathBuf>,

    /// Template to send
    #[arg(short, long)]
    pub template: Option<String>,

    /// CSV roster to read
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Address to send from
    #[arg(short, long)]
    pub email: Option<String>,

    /// SMTP password
    #[arg(short, long)]
    pub password: Option<String>,

    /// SMTP relay host
    #[arg(long, default_value = "smtp.gmail.com")]
    pub host: String,

    /// SMTP relay port
    #[arg(long, default_value_t = 587)]
    pub port: u16,

    /// Maximum sends for this run (the provider quota)
    #[arg(long, default_value_t = 450)]
    pub limit: usize,

    /// Seconds to wait before retrying a failed send
    #[arg(long, default_value_t = 60)]
    pub retry_delay: u64,

    /// Attempts per message before giving up on it
    #[arg(long, default_value_t = 5)]
    pub max_attempts: u32,

    /// Abort the run on the first malformed roster row
    #[arg(long)]
    pub strict: bool,

    /// Open a fresh connection per message instead of pooling
    #[arg(long)]
    pub no_pool: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
