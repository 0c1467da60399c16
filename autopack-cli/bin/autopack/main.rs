//! Smart archive dispatcher
//!
//! Recognizes archives by signature and extension, then compresses or
//! extracts them with the matching system tool (tar, zip, 7z, ...).

use std::process;

use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

mod opts;

use opts::AutopackOpts;

use autopack_cli::messages::Message;
use autopack_cli::{exit_code, format_error_for_stderr, run, Terminal};

/// Installs the stderr log subscriber; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn main() {
    let opts = match AutopackOpts::parse_env() {
        Ok(opts) => opts,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            process::exit(exit_code::MISSING_ARGS);
        }
    };

    init_logging(opts.verbose);

    let mut terminal = Terminal::new();
    match run(opts.config(), &mut terminal) {
        Ok(_) => {
            println!("{}", Message::Goodbye.text());
        }
        Err(err) => {
            eprintln!("{}", format_error_for_stderr(&err));
            process::exit(err.exit_code());
        }
    }
}
