pub mod args;
pub mod cli;
mod engine;
mod harvester;
mod portscan;
mod reporting;
mod results;
mod runner;
mod webtech;

pub use args::{Args, RunMode};
pub use engine::{default_output_dir, ReconEngine, RunOutcome};
pub use harvester::HarvesterFindings;
pub use results::ReconResult;
pub use webtech::TechDetection;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Drive one reconnaissance run: bootstrap, execute the selected phases,
/// persist the summary, and (in full mode) present the console report.
pub async fn run(args: Args, mode: RunMode) -> Result<(), BoxError> {
    let save_on_interrupt = args.save_on_interrupt;
    let engine = ReconEngine::bootstrap(&args)?;
    let outcome = engine.execute(mode).await;

    if outcome.interrupted {
        eprintln!("\n[!] Interrupted by user");
        if save_on_interrupt {
            reporting::persist(&outcome.result, engine.output_dir())?;
        }
        return Ok(());
    }

    reporting::persist(&outcome.result, engine.output_dir())?;

    if mode == RunMode::Full {
        reporting::present_summary(&outcome.result);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn single_tool_run_writes_summary_json_exactly_once() {
        let dir = std::env::temp_dir().join(format!("reco_run_single_{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();

        let args = Args {
            target: "reco-single.invalid".to_string(),
            output: Some(dir.to_string_lossy().into_owned()),
            ports: "1-1000".to_string(),
            save_on_interrupt: false,
        };
        run(args, RunMode::WhatWeb).await.expect("run should succeed");

        let summaries: Vec<_> = std::fs::read_dir(&dir)
            .expect("output dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name() == "summary.json")
            .collect();
        assert_eq!(summaries.len(), 1);

        let raw = std::fs::read_to_string(dir.join("summary.json")).expect("summary file");
        let reloaded: ReconResult = serde_json::from_str(&raw).expect("valid summary json");
        assert_eq!(reloaded.target, "reco-single.invalid");
        assert!(reloaded.technologies.is_empty());

        std::fs::remove_dir_all(dir).ok();
    }
}
