/// Which adapters a run executes. Chosen once at startup, never re-entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Harvester, then port scan, then web tech, in that fixed order.
    Full,
    Harvester,
    Nmap,
    WhatWeb,
}

#[derive(Clone, Debug)]
pub struct Args {
    /// Target domain under reconnaissance
    pub target: String,

    /// Output directory; defaults to `recon_<target with '.' -> '_'>`
    pub output: Option<String>,

    /// Port range handed verbatim to the scanner (only consulted by nmap)
    pub ports: String,

    /// Persist best-effort results when the run is interrupted
    pub save_on_interrupt: bool,
}
