use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::harvester::HarvesterFindings;

pub const SUBDOMAIN_CAP: usize = 20;
pub const EMAIL_CAP: usize = 10;
pub const TECHNOLOGY_CAP: usize = 15;

/// The single aggregate built up over one run.
///
/// Owned exclusively by the engine; adapters hand back typed fragments and
/// each fragment lands through exactly one `record_*` method, so no adapter
/// can overwrite another's field. Caps are applied here, at recording time;
/// truncated excess is discarded for good.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReconResult {
    pub target: String,
    pub timestamp: String,
    pub subdomains: Vec<String>,
    pub emails: Vec<String>,
    pub ports: Vec<String>,
    pub technologies: Vec<String>,
}

impl ReconResult {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            timestamp: Local::now().to_rfc3339(),
            subdomains: Vec::new(),
            emails: Vec::new(),
            ports: Vec::new(),
            technologies: Vec::new(),
        }
    }

    pub fn record_harvest(&mut self, findings: HarvesterFindings) {
        let HarvesterFindings {
            mut emails,
            mut subdomains,
        } = findings;
        emails.truncate(EMAIL_CAP);
        subdomains.truncate(SUBDOMAIN_CAP);
        self.emails = emails;
        self.subdomains = subdomains;
    }

    pub fn record_ports(&mut self, lines: Vec<String>) {
        // Unbounded by design; each entry is a raw "port/proto state service" line.
        self.ports = lines;
    }

    pub fn record_technologies(&mut self, mut names: Vec<String>) {
        names.truncate(TECHNOLOGY_CAP);
        self.technologies = names;
    }
}
