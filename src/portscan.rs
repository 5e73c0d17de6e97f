use std::path::Path;

use crate::runner::{run_tool, CommandSpec};

pub const DEFAULT_PORT_RANGE: &str = "1-1000";

/// Service-version detection across the caller-supplied range. The range is
/// free text ("1-65535", "22,80,443"); syntax is nmap's problem, not ours.
pub fn command(target: &str, ports: &str, report_path: &Path) -> CommandSpec {
    CommandSpec::new("nmap")
        .arg("-sV")
        .arg("-T4")
        .arg("-p")
        .arg(ports)
        .arg(target)
        .arg("-oN")
        .arg(report_path.to_string_lossy().into_owned())
}

/// Keep every trimmed line that mentions both `open` and `/tcp`, verbatim and
/// in output order. Deliberately uncapped.
pub fn parse(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.contains("open") && line.contains("/tcp"))
        .map(str::to_string)
        .collect()
}

/// Run nmap, which writes its own normal-format report to `nmap_scan.txt`.
/// Returns `None` when the tool failed.
pub async fn collect(target: &str, ports: &str, output_dir: &Path) -> Option<Vec<String>> {
    let report_path = output_dir.join("nmap_scan.txt");
    let output = run_tool(&command(target, ports, &report_path), None).await;

    if !output.succeeded() {
        eprintln!("[!] nmap failed (is it installed?)");
        return None;
    }

    output.stdout.map(|stdout| parse(&stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn keeps_only_open_tcp_lines_in_order() {
        let stdout = "80/tcp open http\n22/tcp closed ssh\n443/tcp open https\n";
        assert_eq!(
            parse(stdout),
            vec!["80/tcp open http", "443/tcp open https"]
        );
    }

    #[test]
    fn udp_and_noise_lines_are_ignored() {
        let stdout = "\
Starting Nmap 7.94 ( https://nmap.org )
53/udp open domain
Nmap done: 1 IP address (1 host up)
";
        assert!(parse(stdout).is_empty());
    }

    #[test]
    fn command_carries_range_and_report_path_as_argv() {
        let spec = command("example.com", "1-65535", &PathBuf::from("out/nmap_scan.txt"));
        assert_eq!(
            spec.display(),
            "nmap -sV -T4 -p 1-65535 example.com -oN out/nmap_scan.txt"
        );
    }
}
