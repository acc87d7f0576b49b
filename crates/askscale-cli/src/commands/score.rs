//! The `askscale score` command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use askscale_core::error::ProfileError;
use askscale_core::parser::{parse_catalog, parse_pools, parse_responses};
use askscale_core::random::{RandomSource, RngSource};
use askscale_core::report::{generate, ProfileReport};

use crate::config::load_config_from;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Markdown,
    Html,
}

impl Format {
    fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "markdown" | "md" => Ok(Format::Markdown),
            "html" => Ok(Format::Html),
            other => bail!("unknown format '{other}' (expected text, json, markdown or html)"),
        }
    }
}

pub fn execute(
    responses_path: PathBuf,
    catalog_path: Option<PathBuf>,
    pools_path: Option<PathBuf>,
    seed: Option<u64>,
    format: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let format = Format::parse(format.as_deref().unwrap_or(config.default_format.as_str()))?;
    let catalog_path = catalog_path.unwrap_or(config.catalog);
    let pools_path = pools_path.unwrap_or(config.pools);

    let catalog = parse_catalog(&catalog_path)?;
    let pools = parse_pools(&pools_path)?;
    let responses = parse_responses(&responses_path)?;

    tracing::info!(
        catalog = %catalog.name,
        items = catalog.len(),
        responses = responses.len(),
        "scoring session"
    );

    let mut rng: Box<dyn RandomSource> = match seed.or(config.seed) {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::thread()),
    };

    let report = generate(&catalog, &pools, &responses, &mut *rng).map_err(|e| {
        let context = failure_context(&e, &responses_path);
        anyhow::Error::new(e).context(context)
    })?;

    print_summary(&report);

    match output {
        Some(path) => {
            write_report(&report, format, &path)?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", render(&report, format)?),
    }

    Ok(())
}

/// Blame the responses file for bad session input, the configuration otherwise.
fn failure_context(err: &ProfileError, responses_path: &Path) -> String {
    if err.is_session_error() {
        format!("invalid responses in {}", responses_path.display())
    } else {
        "catalog and pools are inconsistent".to_string()
    }
}

fn render(report: &ProfileReport, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => to_text(report),
        Format::Json => report.to_json()?,
        Format::Markdown => askscale_report::markdown::to_markdown(report),
        Format::Html => askscale_report::html::generate_html(report),
    })
}

fn write_report(report: &ProfileReport, format: Format, path: &Path) -> Result<()> {
    if format == Format::Html {
        return askscale_report::html::write_html_report(report, path);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render(report, format)?)
        .with_context(|| format!("failed to write report: {}", path.display()))
}

/// Plain-text rendering for the terminal.
fn to_text(report: &ProfileReport) -> String {
    let narrative = &report.report;
    let mut out = String::new();

    if let Some(affirmation) = &narrative.affirmation {
        out.push_str(&format!("{affirmation}\n\n"));
    }
    for highlight in &narrative.highlights {
        out.push_str(&format!("  * {highlight}\n"));
    }
    if !narrative.highlights.is_empty() {
        out.push('\n');
    }
    if let Some(conflict) = &narrative.conflict {
        out.push_str(&format!("[{}] {}\n\n", conflict.category, conflict.text));
    }
    for r in &narrative.representatives {
        let band = if r.high { "strength" } else { "growth area" };
        out.push_str(&format!(
            "\"{}\" ({}, {band}, answered {})\n",
            r.prompt,
            r.dimension.label(),
            r.response
        ));
        if let Some(commentary) = &r.commentary {
            out.push_str(&format!("  {commentary}\n"));
        }
    }
    if !narrative.representatives.is_empty() {
        out.push('\n');
    }
    if let Some(suggestion) = &narrative.suggestion {
        out.push_str(&format!("Try this: {suggestion}\n\n"));
    }
    out.push_str(&narrative.call_to_action);
    out
}

fn print_summary(report: &ProfileReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Average", "Level", "Answered"]);

    for s in &report.scores {
        table.add_row(vec![
            Cell::new(s.dimension.label()),
            Cell::new(format!("{:.2}", s.average)),
            Cell::new(s.level),
            Cell::new(s.answered),
        ]);
    }

    eprintln!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_aliases() {
        assert_eq!(Format::parse("MD").unwrap(), Format::Markdown);
        assert_eq!(Format::parse("txt").unwrap(), Format::Text);
        assert_eq!(Format::parse("html").unwrap(), Format::Html);
        assert!(Format::parse("sarif").is_err());
    }

    #[test]
    fn failure_context_blames_the_right_input() {
        let path = Path::new("session.json");
        let bad_value = ProfileError::ResponseOutOfRange {
            item_id: 4,
            value: 9,
        };
        assert_eq!(
            failure_context(&bad_value, path),
            "invalid responses in session.json"
        );
        assert_eq!(
            failure_context(&ProfileError::EmptyCallToActionPool, path),
            "catalog and pools are inconsistent"
        );
    }
}
