//! `phishscope features <url>` — print the assembled feature vector only.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use anyhow::{Context, Result};

/// Run the features command. Needs the manifest but not the model.
pub async fn run(config: &Config, url: &str) -> Result<()> {
    let extractor = config
        .build_extractor()
        .context("cannot start feature extractor")?;
    let extraction = extractor.extract(url).await;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "url": url,
            "html_signals": extraction.html_signals,
            "features": extraction.vector,
        }));
        return Ok(());
    }

    let s = Styled::new();
    if !output::is_quiet() {
        eprintln!("  {} {url}", s.bold("Features for"));
        if !extraction.html_signals {
            eprintln!(
                "  {} {}",
                s.warn_sym(),
                s.dim("page not fetched; HTML signals defaulted to 0")
            );
        }
        eprintln!();
    }
    for row in output::feature_table(extraction.vector.iter()) {
        println!("{row}");
    }

    Ok(())
}
