#![doc = include_str!("../README.md")]

use clap::Parser;

mod args;
mod commands;
mod constants;
mod info;
mod logging;

fn main() {
    let args = args::Args::parse();

    logging::init_logging(args.log_level);

    tracing::info!("{}", constants::VERSION_BUILD);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::run(args.command.unwrap_or_default(), &mut stdout) {
        logging::eprintln_red(&format!("{e:#}"));
        std::process::exit(1);
    }
}
