use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Hard wall-clock bound per external tool invocation.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(300);

/// An external tool invocation as a program plus a discrete argument vector.
///
/// The target domain and every other caller-supplied value travel as
/// individual argv entries; nothing is ever interpolated into a shell string.
#[derive(Clone, Debug)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Human-readable rendering for progress lines.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Outcome of one tool invocation.
///
/// `stdout: None` with `exit_code: 1` covers launch failures and timeouts
/// alike; callers only ever branch on `succeeded()`.
#[derive(Debug)]
pub struct ToolOutput {
    pub stdout: Option<String>,
    pub exit_code: i32,
}

impl ToolOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    fn failure() -> Self {
        Self {
            stdout: None,
            exit_code: 1,
        }
    }
}

/// Run an external tool, capturing stdout as text.
///
/// Best-effort contract: a missing binary, OS launch error, or timeout is
/// reported as a failed `ToolOutput` and logged, never returned as an error,
/// so one absent tool cannot abort the whole run. When `capture` is given and
/// the process produced output, the raw stdout text is written there
/// (overwrite) regardless of exit code.
pub async fn run_tool(spec: &CommandSpec, capture: Option<&Path>) -> ToolOutput {
    run_tool_with_timeout(spec, capture, TOOL_TIMEOUT).await
}

/// Same contract as `run_tool` with an explicit wall-clock bound.
pub async fn run_tool_with_timeout(
    spec: &CommandSpec,
    capture: Option<&Path>,
    limit: Duration,
) -> ToolOutput {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let output = match timeout(limit, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            eprintln!("[!] Failed to launch {}: {}", spec.program, err);
            return ToolOutput::failure();
        }
        Err(_) => {
            eprintln!("[!] {} timed out after {}s", spec.program, limit.as_secs());
            return ToolOutput::failure();
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if let Some(path) = capture {
        if !stdout.is_empty() {
            if let Err(err) = tokio::fs::write(path, &stdout).await {
                eprintln!("[!] Could not write {}: {}", path.display(), err);
            }
        }
    }

    ToolOutput {
        stdout: Some(stdout),
        exit_code: output.status.code().unwrap_or(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_renders_program_and_args() {
        let spec = CommandSpec::new("nmap").arg("-sV").arg("example.com");
        assert_eq!(spec.display(), "nmap -sV example.com");
        assert_eq!(spec.program(), "nmap");
    }

    #[tokio::test]
    async fn captures_stdout_of_a_real_process() {
        let spec = CommandSpec::new("echo").arg("hello");
        let output = run_tool(&spec, None).await;
        assert!(output.succeeded());
        assert_eq!(output.stdout.as_deref(), Some("hello\n"));
    }

    #[tokio::test]
    async fn timeout_bounds_a_hung_tool_and_degrades_to_failure() {
        let spec = CommandSpec::new("sleep").arg("30");
        let started = std::time::Instant::now();
        let output = run_tool_with_timeout(&spec, None, Duration::from_millis(100)).await;
        assert!(!output.succeeded());
        assert_eq!(output.exit_code, 1);
        assert!(output.stdout.is_none());
        // Well under the sleep duration; the child is killed with the future.
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn missing_binary_degrades_to_failure() {
        let spec = CommandSpec::new("reco-test-no-such-binary");
        let output = run_tool(&spec, None).await;
        assert!(!output.succeeded());
        assert_eq!(output.exit_code, 1);
        assert!(output.stdout.is_none());
    }

    #[tokio::test]
    async fn writes_capture_file_when_output_present() {
        let path = std::env::temp_dir().join(format!(
            "reco_runner_capture_{}.txt",
            std::process::id()
        ));
        let spec = CommandSpec::new("echo").arg("captured");
        let output = run_tool(&spec, Some(&path)).await;
        assert!(output.succeeded());
        let written = std::fs::read_to_string(&path).expect("capture file");
        assert_eq!(written, "captured\n");
        std::fs::remove_file(path).ok();
    }
}
