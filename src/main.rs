use anyhow::Result;
use clap::Parser;
use tracing::error;

use command::*;

mod command;
mod log;
mod payload;
mod status;

/// Middleware hook for an HTTP simulation proxy: reads a request/response
/// pair as one JSON line on stdin and writes it back with a new response status.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    modify: ModifyStatus,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = log::file_subscriber(&cli.modify.log_file)?;
    tracing::subscriber::with_default(subscriber, || {
        let result = cli.modify.run();
        if let Err(e) = &result {
            error!(err = ?e, "Middleware failed");
        }
        result
    })
}
