use backgrounds_core::logging;
use clap::Parser;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if cli.log_file {
        if let Err(err) = logging::init_logging(cli.verbose) {
            logging::init_logging_stderr(cli.verbose);
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
        }
    } else {
        logging::init_logging_stderr(cli.verbose);
    }

    if let Err(err) = cli.run() {
        eprintln!("backgrounds error: {:#}", err);
        std::process::exit(1);
    }
}
