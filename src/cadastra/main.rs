use cadastra::logging::{init_logging, Verbosity};
use clap::Parser;
use std::process::ExitCode;

mod cli;
use cli::args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose));

    match cli::handlers::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
