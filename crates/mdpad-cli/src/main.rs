use std::io;
use std::process::ExitCode;

use clap::Parser;
use mdpad_cli::{Cli, Outcome, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    let mut stdout = io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::UnsafeContent) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
