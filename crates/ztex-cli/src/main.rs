// crates/ztex-cli/src/main.rs

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "ztex-cli")]
#[command(about = "Height-indexed texture post-processor for G-code", long_about = None)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Modulate nozzle temperature with a wood-grain noise texture
    Wood(cmd::wood::WoodArgs),

    /// Modulate mixing ratios (or tool selection) along the Z axis
    Mix(cmd::mix::MixArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Wood(args) => cmd::wood::run(args),
        Commands::Mix(args) => cmd::mix::run(args),
    }
}
