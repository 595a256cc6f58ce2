use clap::Parser;
use unwind_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // File logging, falling back to stderr.
    logging::init(cli.verbose);

    if let Err(err) = cli.run().await {
        eprintln!("unwind error: {:#}", err);
        std::process::exit(1);
    }
}
