use std::fs;
use std::path::Path;

use anyhow::anyhow;
use colored::*;

use crate::results::ReconResult;
use crate::BoxError;

const SUMMARY_FILE: &str = "summary.json";

/// Serialize the aggregate as indented JSON to `<outputDir>/summary.json`.
///
/// This is the one persistence path that must succeed; an I/O failure here
/// terminates the run with a visible error.
pub fn persist(result: &ReconResult, output_dir: &Path) -> Result<(), BoxError> {
    let path = output_dir.join(SUMMARY_FILE);
    fs::write(&path, serde_json::to_string_pretty(result)?)
        .map_err(|err| anyhow!("could not write {}: {}", path.display(), err))?;
    eprintln!("[+] Summary saved to {}", path.display());
    Ok(())
}

/// Console report: every non-empty field with a truncated preview and totals.
pub fn present_summary(result: &ReconResult) {
    let rule = "═".repeat(60);
    println!("\n{}", rule.bright_black());
    println!("{}", "RECON SUMMARY".bright_white().bold());
    println!("{}", rule.bright_black());

    print_section("Subdomains", &result.subdomains, 5);
    print_section("Emails", &result.emails, 5);
    print_section("Open ports", &result.ports, usize::MAX);
    print_section("Technologies", &result.technologies, 10);

    println!("\n{}", rule.bright_black());
    println!(
        "{} Results for {} stored on disk",
        "[✓]".bright_green(),
        result.target.bright_cyan()
    );
    println!("{}\n", rule.bright_black());
}

fn print_section(title: &str, items: &[String], preview: usize) {
    if items.is_empty() {
        return;
    }
    println!(
        "\n{} {} ({}):",
        "[+]".bright_green(),
        title.bright_white().bold(),
        items.len()
    );
    for item in items.iter().take(preview) {
        println!("    {item}");
    }
    if items.len() > preview {
        println!(
            "    {}",
            format!("... and {} more", items.len() - preview).bright_black()
        );
    }
}
