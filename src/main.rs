use clap::Parser;
use goldcross::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
