use clap::Parser;
use colored::*;

use crate::args::{Args, RunMode};
use crate::portscan::DEFAULT_PORT_RANGE;
use crate::BoxError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "reco")]
#[command(version = VERSION)]
#[command(about = "OSINT reconnaissance toolkit driving external recon tools", long_about = None)]
#[command(after_help = "\
Examples:
  reco -t example.com --full
  reco -t target.com --harvester
  reco -t target.com --nmap -p 1-65535
")]
struct Cli {
    /// Target domain
    #[arg(short, long)]
    target: String,

    /// Full reconnaissance (harvester, nmap, whatweb in sequence)
    #[arg(long)]
    full: bool,

    /// Only theHarvester
    #[arg(long)]
    harvester: bool,

    /// Only nmap
    #[arg(long)]
    nmap: bool,

    /// Only WhatWeb
    #[arg(long)]
    whatweb: bool,

    /// Custom output directory
    #[arg(short, long)]
    output: Option<String>,

    /// Port range for nmap
    #[arg(short, long, default_value = DEFAULT_PORT_RANGE)]
    ports: String,

    /// Persist best-effort results if the run is interrupted
    #[arg(long)]
    save_on_interrupt: bool,
}

/// First matching branch wins: full > harvester > nmap > whatweb.
fn resolve_mode(full: bool, harvester: bool, nmap: bool, whatweb: bool) -> Option<RunMode> {
    if full {
        Some(RunMode::Full)
    } else if harvester {
        Some(RunMode::Harvester)
    } else if nmap {
        Some(RunMode::Nmap)
    } else if whatweb {
        Some(RunMode::WhatWeb)
    } else {
        None
    }
}

pub struct RecoCli;

impl RecoCli {
    pub async fn run() -> Result<(), BoxError> {
        let cli = Cli::parse();

        let Some(mode) = resolve_mode(cli.full, cli.harvester, cli.nmap, cli.whatweb) else {
            eprintln!("{} Specify --full or a single tool", "[!]".bright_yellow());
            eprintln!("{} Use -h for help", "[!]".bright_yellow());
            return Ok(());
        };

        let args = Args {
            target: cli.target,
            output: cli.output,
            ports: cli.ports,
            save_on_interrupt: cli.save_on_interrupt,
        };

        crate::run(args, mode).await
    }
}
