use clap::Parser;
use dipbot::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
