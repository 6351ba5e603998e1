//! `phishscope classify <url>` — classify one URL.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::model::Label;
use crate::pipeline::Classification;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Run the classify command.
pub async fn run(config: &Config, url: &str, debug: bool) -> Result<()> {
    let detector = config
        .build_detector()
        .context("cannot start classifier")?;
    let result = detector
        .classify(url)
        .await
        .with_context(|| format!("classifying {url}"))?;

    if output::is_json() {
        output::print_json(&classification_json(&result, Utc::now()));
        return Ok(());
    }

    let s = Styled::new();
    if !output::is_quiet() {
        output::print_header(&s);
    }
    for line in verdict_lines(&s, &result) {
        eprintln!("{line}");
    }

    if debug || output::is_verbose() {
        eprintln!();
        output::print_section(&s, "Extracted features");
        for row in output::feature_table(result.features.iter()) {
            eprintln!("    {row}");
        }
    }

    Ok(())
}

/// Human-readable verdict and confidence lines.
pub fn verdict_lines(s: &Styled, result: &Classification) -> Vec<String> {
    let p = &result.prediction;
    let verdict = match p.label {
        Label::Phishing => format!("  {} {}", s.fail_sym(), s.red("Phishing website detected")),
        Label::Legitimate => format!("  {} {}", s.ok_sym(), s.green("Legitimate website")),
    };
    let mut lines = vec![
        verdict,
        format!(
            "  Confidence: legitimate {}, phishing {}",
            output::format_percent(p.legitimate()),
            output::format_percent(p.phishing())
        ),
    ];
    if !result.html_signals {
        lines.push(format!(
            "  {} {}",
            s.warn_sym(),
            s.dim("page not fetched; HTML signals defaulted to 0")
        ));
    }
    lines
}

/// JSON document for `--json` output.
pub fn classification_json(result: &Classification, at: DateTime<Utc>) -> serde_json::Value {
    let p = &result.prediction;
    serde_json::json!({
        "url": result.url,
        "label": p.label,
        "probabilities": {
            "legitimate": p.legitimate(),
            "phishing": p.phishing(),
        },
        "html_signals": result.html_signals,
        "features": result.features,
        "classified_at": at.to_rfc3339(),
    })
}
