//! askscale-core: Likert scoring, banding and narrative selection.
//!
//! This crate turns one questionnaire session into a dimension profile and
//! assembles the personalised report from the configured content pools.
//! Rendering and the command line live in the sibling crates.

pub mod band;
pub mod condition;
pub mod error;
pub mod model;
pub mod narrative;
pub mod parser;
pub mod pools;
pub mod random;
pub mod report;
pub mod representative;
pub mod scoring;
