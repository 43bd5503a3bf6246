mod app;
mod consumer;
mod manifest;
mod report;
mod resolve;
mod unit;

use clap::Parser;

fn main() {
    let cli = app::Cli::parse();
    if let Err(error) = app::run_app(cli) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
