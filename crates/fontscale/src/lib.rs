#![forbid(unsafe_code)]

//! Resolution-scaled bitmap font asset pipeline.
//!
//! Reads a `fonts.xml` manifest (XML with embedded JSON configuration
//! blocks), computes per-target font point sizes relative to a reference
//! screen configuration, drives an external TTF rasterizer once per
//! (font, charset) batch per target, and rewrites the manifest for each
//! target with patched filenames and stripped configuration blocks. An
//! optional markdown report tabulates the computed sizes.
//!
//! Design goals:
//! - deterministic output ordering (directories, tool invocations, report rows)
//! - fail-fast validation before the first rasterizer call
//! - the source manifest is never written

pub mod batch;
pub mod config;
pub mod error;
pub mod manifest;
pub mod materialize;
pub mod pipeline;
pub mod report;
pub mod scale;

pub use config::{ReportTarget, RunConfig};
pub use error::{Error, Result};
pub use manifest::{FontTask, Manifest, ScreenConfig};
pub use pipeline::Pipeline;
pub use scale::calculate_size;

#[cfg(test)]
mod tests;
