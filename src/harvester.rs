use std::path::Path;

use crate::runner::{run_tool, CommandSpec};

/// Typed fragment produced by the harvester adapter. Caps are applied later
/// by `ReconResult::record_harvest`.
#[derive(Clone, Debug, Default)]
pub struct HarvesterFindings {
    pub emails: Vec<String>,
    pub subdomains: Vec<String>,
}

impl HarvesterFindings {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.subdomains.is_empty()
    }
}

const HOSTS_MARKER: &str = "Hosts found";

pub fn command(target: &str) -> CommandSpec {
    CommandSpec::new("theHarvester")
        .arg("-d")
        .arg(target)
        .arg("-b")
        .arg("all")
}

/// Scrape emails and subdomains out of theHarvester's stdout.
///
/// Emails are trimmed lines containing both `@` and the target string.
/// Subdomains are the trimmed lines after the first "Hosts found" marker that
/// contain the target string. Missing markers or empty output yield empty
/// vectors, which is not an error.
pub fn parse(stdout: &str, target: &str) -> HarvesterFindings {
    let emails = stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('@') && line.contains(target))
        .map(str::to_string)
        .collect();

    let subdomains = match stdout.split_once(HOSTS_MARKER) {
        Some((_, tail)) => tail
            .lines()
            .map(str::trim)
            .filter(|line| line.contains(target))
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    HarvesterFindings { emails, subdomains }
}

/// Run theHarvester, capturing raw stdout to `harvester_results` under the
/// output directory. Returns `None` when the tool failed or produced nothing.
pub async fn collect(target: &str, output_dir: &Path) -> Option<HarvesterFindings> {
    let capture = output_dir.join("harvester_results");
    let output = run_tool(&command(target), Some(&capture)).await;

    if !output.succeeded() {
        eprintln!("[!] theHarvester failed (is it installed?)");
        return None;
    }

    output.stdout.map(|stdout| parse(&stdout, target))
}
