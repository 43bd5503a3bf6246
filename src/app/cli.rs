use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Reports the externally visible name surface of a Rust library crate.", long_about = None)]
pub struct Cli {
    /// Directory of the library crate to analyze (must contain Cargo.toml).
    pub crate_dir: PathBuf,

    /// Also check this consumer crate's imports against the analyzed surface.
    #[clap(long)]
    pub consumer: Option<PathBuf>,

    /// Where to write the rendered surface report.
    #[clap(long, default_value = "surface_report.txt")]
    pub report: PathBuf,

    /// Suppress verbose output, only printing 'Done.' on success or errors.
    #[clap(short, long)]
    pub quiet: bool,
}
