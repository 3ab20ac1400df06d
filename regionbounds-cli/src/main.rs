//! Entry point for the `regionbounds` command.
#![forbid(unsafe_code)]

use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = regionbounds_cli::run() {
        eprintln!("regionbounds: {err}");
        std::process::exit(1);
    }
}
