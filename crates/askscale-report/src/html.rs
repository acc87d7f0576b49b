//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use askscale_core::model::{Level, SCALE_MAX};
use askscale_core::report::ProfileReport;
use askscale_core::representative::Representative;
use askscale_core::scoring::DimensionScore;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::High => "high",
        Level::Medium => "medium",
        Level::Low => "low",
    }
}

/// Generate an HTML page from a profile report.
pub fn generate_html(report: &ProfileReport) -> String {
    let mut html = String::new();
    let narrative = &report.report;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>askscale report: {}</title>\n",
        html_escape(&report.catalog.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Your profile</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Questionnaire: <strong>{}</strong> | {} of {} items answered | {}</p>\n",
        html_escape(&report.catalog.name),
        report.catalog.answered,
        report.catalog.item_count,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Narrative
    html.push_str("<section class=\"narrative\">\n");
    if let Some(affirmation) = &narrative.affirmation {
        html.push_str(&format!(
            "<p class=\"affirmation\">{}</p>\n",
            html_escape(affirmation)
        ));
    }
    for highlight in &narrative.highlights {
        html.push_str(&format!(
            "<p class=\"highlight\">{}</p>\n",
            html_escape(highlight)
        ));
    }
    if let Some(conflict) = &narrative.conflict {
        html.push_str(&format!(
            "<div class=\"conflict\"><h3>{}</h3><p>{}</p></div>\n",
            html_escape(&conflict.category),
            html_escape(&conflict.text)
        ));
    }
    if let Some(suggestion) = &narrative.suggestion {
        html.push_str(&format!(
            "<p class=\"suggestion\">{}</p>\n",
            html_escape(suggestion)
        ));
    }
    html.push_str(&format!(
        "<p class=\"cta\">{}</p>\n",
        html_escape(&narrative.call_to_action)
    ));
    html.push_str("</section>\n");

    // Scores
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Scores</h2>\n");
    if !report.scores.is_empty() {
        html.push_str(&generate_bar_chart(&report.scores));
    }
    html.push_str("<table class=\"scores\" id=\"scores\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Dimension</th><th onclick=\"sortTable(1)\">Average</th><th onclick=\"sortTable(2)\">Level</th><th onclick=\"sortTable(3)\">Answered</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in &report.scores {
        let class = level_class(s.level);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
            html_escape(s.dimension.label()),
            s.average,
            class,
            s.level,
            s.answered
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Representative answers
    if !narrative.representatives.is_empty() {
        html.push_str("<section class=\"answers\">\n");
        html.push_str("<h2>In your own words</h2>\n");
        for r in &narrative.representatives {
            html.push_str(&representative_card(r));
        }
        html.push_str("</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &ProfileReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn representative_card(r: &Representative) -> String {
    let class = if r.high { "high" } else { "low" };
    let mut card = format!(
        "<div class=\"card {}\">\n<p class=\"prompt\">&ldquo;{}&rdquo;</p>\n<p class=\"meta\">{} | you answered {}</p>\n",
        class,
        html_escape(&r.prompt),
        html_escape(r.dimension.label()),
        r.response
    );
    if let Some(commentary) = &r.commentary {
        card.push_str(&format!("<p>{}</p>\n", html_escape(commentary)));
    }
    card.push_str("</div>\n");
    card
}

fn generate_bar_chart(scores: &[DimensionScore]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 200;

    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, s) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let ratio = (s.average / SCALE_MAX as f64).clamp(0.0, 1.0);
        let width = (ratio * max_width as f64) as usize;

        let color = match s.level {
            Level::High => "#22c55e",
            Level::Medium => "#eab308",
            Level::Low => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(s.dimension.label())
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            s.average
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --high: #dcfce7; --low: #fde2e2; --medium: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --high: #064e3b; --low: #7f1d1d; --medium: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 56rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.affirmation { font-size: 1.25rem; }
.conflict { border-left: 4px solid #eab308; padding-left: 1rem; }
.cta { font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.high { background: var(--high); }
.medium { background: var(--medium); }
.low { background: var(--low); }
.card { border-radius: 8px; padding: 0.5rem 1rem; margin: 1rem 0; }
.prompt { font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('scores');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, { numeric: true }) : vb.localeCompare(va, undefined, { numeric: true });
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
