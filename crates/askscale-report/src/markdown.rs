//! Markdown report generator.

use askscale_core::report::ProfileReport;

/// Render a profile report as Markdown.
pub fn to_markdown(report: &ProfileReport) -> String {
    let narrative = &report.report;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.catalog.name));
    md.push_str(&format!(
        "**Answered:** {} of {} items | generated {}\n\n",
        report.catalog.answered,
        report.catalog.item_count,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if let Some(affirmation) = &narrative.affirmation {
        md.push_str(&format!("> {affirmation}\n\n"));
    }
    for highlight in &narrative.highlights {
        md.push_str(&format!("- {highlight}\n"));
    }
    if !narrative.highlights.is_empty() {
        md.push('\n');
    }

    if let Some(conflict) = &narrative.conflict {
        md.push_str(&format!("### {}\n\n{}\n\n", conflict.category, conflict.text));
    }

    md.push_str("## Scores\n\n");
    md.push_str("| Dimension | Average | Level | Answered |\n");
    md.push_str("|-----------|---------|-------|----------|\n");
    for s in &report.scores {
        md.push_str(&format!(
            "| {} | {:.2} | {} | {} |\n",
            s.dimension.label(),
            s.average,
            s.level,
            s.answered
        ));
    }
    md.push('\n');

    if !narrative.representatives.is_empty() {
        md.push_str("## In your own words\n\n");
        for r in &narrative.representatives {
            md.push_str(&format!(
                "- *\"{}\"* ({}, answered {})\n",
                r.prompt,
                r.dimension.label(),
                r.response
            ));
            if let Some(commentary) = &r.commentary {
                md.push_str(&format!("  {commentary}\n"));
            }
        }
        md.push('\n');
    }

    if let Some(suggestion) = &narrative.suggestion {
        md.push_str(&format!("**Try this:** {suggestion}\n\n"));
    }

    md.push_str(&format!("**{}**\n", narrative.call_to_action));
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::make_test_report;

    #[test]
    fn markdown_has_all_sections() {
        let md = to_markdown(&make_test_report());
        assert!(md.starts_with("# Parent <Trait> Assessment"));
        assert!(md.contains("> You keep asking why"));
        assert!(md.contains("### inner conflict"));
        assert!(md.contains("| Curiosity | 4.50 | high | 2 |"));
        assert!(md.contains("## In your own words"));
        assert!(md.contains("**Try this:** Pause before you respond."));
        assert!(md.trim_end().ends_with("**Book a session to plan the next step.**"));
    }

    #[test]
    fn markdown_without_optional_content() {
        let mut report = make_test_report();
        report.report.affirmation = None;
        report.report.conflict = None;
        report.report.highlights.clear();
        report.report.representatives.clear();
        report.report.suggestion = None;

        let md = to_markdown(&report);
        assert!(!md.contains("\n> "));
        assert!(!md.contains("###"));
        assert!(!md.contains("In your own words"));
        assert!(md.contains("## Scores"));
    }
}
