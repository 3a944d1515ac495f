//! Pipeline controller: load, validate, materialize, report.

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::materialize::materialize_target;
use crate::report::generate_report;
use tracing::info;

/// One run of the font processing pipeline over a loaded manifest.
///
/// The stages are strictly linear: the manifest is parsed once, source TTF
/// files are validated before any rasterizer invocation, targets are
/// materialized in manifest order, and the optional report comes last. Any
/// failure aborts the remaining stages.
#[derive(Debug)]
pub struct Pipeline<'a> {
    config: &'a RunConfig,
    manifest: Manifest,
}

impl<'a> Pipeline<'a> {
    /// Parses the source manifest. Fails if the manifest is missing, is not
    /// well-formed, or lacks a usable screen-resolution configuration.
    pub fn load(config: &'a RunConfig) -> Result<Self> {
        let manifest = Manifest::load(&config.manifest_path())?;
        Ok(Self { config, manifest })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn run(&self) -> Result<()> {
        info!("font processing pipeline");
        info!("project directory: {}", self.config.project_dir().display());
        info!("reference configuration: {}", self.manifest.reference().key());
        info!(
            "target configurations: {}",
            self.manifest
                .targets()
                .iter()
                .map(|t| t.key())
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.validate_sources()?;

        for target in self.manifest.targets() {
            materialize_target(self.config, &self.manifest, target)?;
        }

        if let Some(destination) = self.config.report() {
            generate_report(self.config, &self.manifest, destination)?;
        }

        info!("batch processing complete");
        Ok(())
    }

    /// Every distinct TTF referenced by any task must exist before the first
    /// tool invocation; the error lists every missing filename at once.
    fn validate_sources(&self) -> Result<()> {
        let fonts_dir = self.config.resources_fonts_dir();
        let mut missing = Vec::new();
        for task in self.manifest.tasks() {
            if missing.iter().any(|m| m == &task.ttf_filename) {
                continue;
            }
            if !fonts_dir.join(&task.ttf_filename).exists() {
                missing.push(task.ttf_filename.clone());
            }
        }
        if !missing.is_empty() {
            return Err(Error::MissingSourceFiles { names: missing });
        }
        Ok(())
    }
}
