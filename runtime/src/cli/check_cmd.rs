//! `phishscope check` — verify the manifest and model load and line up.

use crate::cli::output::{self, Styled};
use crate::config::{Config, StartupError};
use crate::pipeline::Detector;
use anyhow::{bail, Result};
use serde_json::Value;

/// Run the check command. Exits non-zero when startup would fail.
pub fn run(config: &Config) -> Result<()> {
    let outcome = config.build_detector();

    if output::is_json() {
        output::print_json(&check_json(config, &outcome));
        if let Err(e) = outcome {
            bail!(e);
        }
        return Ok(());
    }

    let s = Styled::new();
    output::print_header(&s);
    output::print_section(&s, "Configuration");
    output::print_check(s.ok_sym(), "Manifest:", &config.schema_path.display().to_string());
    output::print_check(s.ok_sym(), "Model:", &config.model_path.display().to_string());
    let fetch = if config.fetch {
        format!(
            "enabled ({:.1}s timeout, UA {:?})",
            config.fetch_timeout.as_secs_f64(),
            config.user_agent
        )
    } else {
        "disabled".to_string()
    };
    output::print_check(s.ok_sym(), "Fetching:", &fetch);
    eprintln!();

    output::print_section(&s, "Artifacts");
    match outcome {
        Ok(detector) => {
            output::print_check(
                s.ok_sym(),
                "Columns:",
                &format!("{} aligned with model", detector.schema().len()),
            );
            let unknown = detector.schema().unknown_columns();
            if !unknown.is_empty() {
                output::print_check(
                    s.warn_sym(),
                    "Unproduced:",
                    &format!("{} column(s) always 0", unknown.len()),
                );
                output::print_detail(&unknown.join(", "));
            }
            output::print_check(
                s.ok_sym(),
                "Threshold:",
                &format!("{}", detector.model().threshold()),
            );
            Ok(())
        }
        Err(e) => {
            output::print_check(s.fail_sym(), "Load:", "failed");
            output::print_detail(&e.to_string());
            bail!(e)
        }
    }
}

/// The `--json` report for a startup attempt.
pub fn check_json(config: &Config, outcome: &Result<Detector, StartupError>) -> Value {
    let (error, unknown) = match outcome {
        Ok(d) => (None, d.schema().unknown_columns()),
        Err(e) => (Some(e.to_string()), Vec::new()),
    };
    serde_json::json!({
        "ok": outcome.is_ok(),
        "error": error,
        "unknown_columns": unknown,
        "config": config,
    })
}
