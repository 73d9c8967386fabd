use drawbar::{cli, config::Config};
use env_logger::Env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    ExitCode::from(cli::run(std::env::args(), &Config::default()))
}
