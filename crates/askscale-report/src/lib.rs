//! askscale-report: Renders profile reports as HTML and Markdown.

pub mod html;
pub mod markdown;
