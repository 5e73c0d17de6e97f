use std::path::PathBuf;

use anyhow::anyhow;
use tokio::signal;

use crate::args::{Args, RunMode};
use crate::portscan::DEFAULT_PORT_RANGE;
use crate::results::ReconResult;
use crate::webtech::TechDetection;
use crate::{harvester, portscan, webtech, BoxError};

/// What one run produced: the aggregate plus whether the operator cut it
/// short. The caller decides what an interrupted run persists.
pub struct RunOutcome {
    pub result: ReconResult,
    pub interrupted: bool,
}

#[derive(Clone, Copy)]
enum Phase {
    Harvest,
    PortScan,
    WebTech,
}

/// Drives the adapters in sequence and owns the aggregate for the run.
pub struct ReconEngine {
    target: String,
    output_dir: PathBuf,
    ports: String,
}

impl ReconEngine {
    pub fn bootstrap(args: &Args) -> Result<Self, BoxError> {
        let output_dir = PathBuf::from(
            args.output
                .clone()
                .unwrap_or_else(|| default_output_dir(&args.target)),
        );
        std::fs::create_dir_all(&output_dir)
            .map_err(|err| anyhow!("could not create {}: {}", output_dir.display(), err))?;

        eprintln!("\n[*] Target: {}", args.target);
        eprintln!("[*] Output: {}\n", output_dir.display());

        Ok(Self {
            target: args.target.clone(),
            output_dir,
            ports: args.ports.clone(),
        })
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Run the phases the mode selects, strictly one at a time. Ctrl-C
    /// between or during phases aborts the rest immediately; the in-flight
    /// child process is killed when its future is dropped.
    pub async fn execute(&self, mode: RunMode) -> RunOutcome {
        let phases: &[Phase] = match mode {
            RunMode::Full => &[Phase::Harvest, Phase::PortScan, Phase::WebTech],
            RunMode::Harvester => &[Phase::Harvest],
            RunMode::Nmap => &[Phase::PortScan],
            RunMode::WhatWeb => &[Phase::WebTech],
        };

        if matches!(mode, RunMode::Full) {
            eprintln!("[*] Starting full reconnaissance of {}", self.target);
        }

        // The -p flag is only consulted in nmap mode; a full run always
        // scans the default range.
        let scan_range = match mode {
            RunMode::Nmap => self.ports.as_str(),
            _ => DEFAULT_PORT_RANGE,
        };

        let mut result = ReconResult::new(&self.target);
        let mut interrupted = false;

        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        for phase in phases {
            tokio::select! {
                _ = &mut ctrl_c => {
                    interrupted = true;
                    break;
                }
                _ = self.run_phase(*phase, scan_range, &mut result) => {}
            }
        }

        RunOutcome {
            result,
            interrupted,
        }
    }

    async fn run_phase(&self, phase: Phase, scan_range: &str, result: &mut ReconResult) {
        match phase {
            Phase::Harvest => self.harvest(result).await,
            Phase::PortScan => self.scan_ports(scan_range, result).await,
            Phase::WebTech => self.fingerprint_web(result).await,
        }
    }

    async fn harvest(&self, result: &mut ReconResult) {
        eprintln!("[*] Running theHarvester...");
        if let Some(findings) = harvester::collect(&self.target, &self.output_dir).await {
            eprintln!("[+] theHarvester complete");
            result.record_harvest(findings);
            eprintln!(
                "[+] Found {} subdomains, {} emails",
                result.subdomains.len(),
                result.emails.len()
            );
        }
    }

    async fn scan_ports(&self, range: &str, result: &mut ReconResult) {
        eprintln!("[*] Running nmap (ports {range})...");
        if let Some(lines) = portscan::collect(&self.target, range, &self.output_dir).await {
            eprintln!("[+] nmap complete");
            result.record_ports(lines);
            eprintln!("[+] Found {} open ports", result.ports.len());
        }
    }

    async fn fingerprint_web(&self, result: &mut ReconResult) {
        eprintln!("[*] Running WhatWeb...");
        match webtech::collect(&self.target, &self.output_dir).await {
            TechDetection::Detected(names) => {
                eprintln!("[+] WhatWeb complete");
                result.record_technologies(names);
                eprintln!("[+] Detected {} technologies", result.technologies.len());
            }
            // Nothing detected and nothing parseable both leave the field
            // empty without further console noise.
            TechDetection::Empty | TechDetection::Unparseable => {}
        }
    }
}

/// `recon_` plus the target with every `.` replaced by `_`.
pub fn default_output_dir(target: &str) -> String {
    format!("recon_{}", target.replace('.', "_"))
}
