use std::io;
use std::process::ExitCode;

use clap::Parser;

use agenda_sift::cli::{execute, Cli};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if execute(&cli, &mut io::stdout().lock(), &mut io::stderr().lock()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
