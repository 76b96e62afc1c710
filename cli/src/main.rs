mod commands;
mod prompt;
mod terminal;

use commands::{info, send, CommandLine, Commands};
use terminal::print;

use crate::terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let commands = CommandLine::parse_args();

    logging::init(commands.dev);
    print::banner();

    match commands.command {
        Commands::Info => {
            print::header("about the tool");
            Ok(info::info())
        }
        Commands::Send(args) => {
            print::header("preparing mail run");
            send::send(args, commands.dev).await
        }
    }
}
