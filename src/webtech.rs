use std::path::Path;

use serde_json::Value;

use crate::runner::{run_tool, CommandSpec};

/// Outcome of reading WhatWeb's JSON log.
///
/// `Empty` and `Unparseable` both leave `technologies` untouched, but tests
/// (and future callers) can tell "the tool found nothing" apart from "the
/// tool wrote something we could not read".
#[derive(Clone, Debug, PartialEq)]
pub enum TechDetection {
    Detected(Vec<String>),
    Empty,
    Unparseable,
}

pub fn command(target: &str, log_path: &Path) -> CommandSpec {
    CommandSpec::new("whatweb")
        .arg(target)
        .arg(format!("--log-json={}", log_path.display()))
}

/// Parse WhatWeb's JSON log: an array of records, each carrying a `plugins`
/// mapping whose keys are technology names. Key order follows the document.
pub fn parse_log(text: &str) -> TechDetection {
    let records: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => return TechDetection::Unparseable,
    };

    let Some(records) = records.as_array() else {
        return TechDetection::Unparseable;
    };

    let Some(first) = records.first() else {
        return TechDetection::Empty;
    };

    match first.get("plugins").and_then(Value::as_object) {
        Some(plugins) if !plugins.is_empty() => {
            TechDetection::Detected(plugins.keys().cloned().collect())
        }
        _ => TechDetection::Empty,
    }
}

/// Run WhatWeb and read its JSON log back. A missing log file means the tool
/// produced nothing; a malformed one is absorbed as `Unparseable`. Neither is
/// surfaced on the console; only a failed tool invocation warns.
pub async fn collect(target: &str, output_dir: &Path) -> TechDetection {
    let log_path = output_dir.join("whatweb_results.json");
    let output = run_tool(&command(target, &log_path), None).await;

    if !output.succeeded() {
        eprintln!("[!] whatweb failed (is it installed?)");
        return TechDetection::Empty;
    }

    match tokio::fs::read_to_string(&log_path).await {
        Ok(text) => parse_log(&text),
        Err(_) => TechDetection::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_keys_come_back_in_document_order() {
        let log = r#"[{"target":"http://example.com","plugins":{"Apache":{"version":["2.4"]},"PHP":{},"jQuery":{}}}]"#;
        assert_eq!(
            parse_log(log),
            TechDetection::Detected(vec![
                "Apache".to_string(),
                "PHP".to_string(),
                "jQuery".to_string()
            ])
        );
    }

    #[test]
    fn two_key_mapping_preserves_order() {
        let log = r#"[{"plugins":{"A":1,"B":2}}]"#;
        assert_eq!(
            parse_log(log),
            TechDetection::Detected(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn empty_array_is_empty_not_an_error() {
        assert_eq!(parse_log("[]"), TechDetection::Empty);
    }

    #[test]
    fn record_without_plugins_is_empty() {
        assert_eq!(parse_log(r#"[{"target":"x"}]"#), TechDetection::Empty);
    }

    #[test]
    fn malformed_json_is_unparseable() {
        assert_eq!(parse_log("{not json"), TechDetection::Unparseable);
        assert_eq!(parse_log(r#"{"plugins":{}}"#), TechDetection::Unparseable);
    }

    #[test]
    fn command_points_whatweb_at_the_log_file() {
        let spec = command("example.com", Path::new("out/whatweb_results.json"));
        assert_eq!(
            spec.display(),
            "whatweb example.com --log-json=out/whatweb_results.json"
        );
    }
}
