//! Run configuration and project-wide defaults.
//!
//! `RunConfig` is assembled once via chained `with_*` calls and treated as
//! immutable once the pipeline starts; derived paths are computed on demand so
//! there is no cached state to keep in sync.

use std::path::{Path, PathBuf};

pub const DEFAULT_PROJECT_DIR: &str = ".";
pub const DEFAULT_RESOURCES_DIR: &str = "resources";
pub const DEFAULT_FONTS_SUBDIR: &str = "fonts";
pub const DEFAULT_MANIFEST_FILENAME: &str = "fonts.xml";
pub const DEFAULT_TOOL_PATH: &str = "ttf2bmp";
pub const DEFAULT_REPORT_FILENAME: &str = "fonts.md";

/// Fallback charset when the manifest carries no `DefaultCharset` block.
pub const DEFAULT_CHARSET: &str = "0123456789:";
/// Hinting mode passed to the rasterizer on every invocation.
pub const DEFAULT_HINTING: &str = "none";

/// Per-target resource directories are named `resources-{shape}-{w}x{h}`.
pub const TARGET_RESOURCES_DIR_PREFIX: &str = "resources-";

// Rasterizer flag spellings. These are the tool's CLI contract and must not
// be reworded.
pub const TOOL_SOURCE_TTF_FLAG: &str = "-f";
pub const TOOL_CHARSET_FLAG: &str = "-c";
pub const TOOL_HINTING_FLAG: &str = "-hinting";
pub const TOOL_SIZE_FLAG: &str = "-s";
pub const TOOL_OUTPUT_FLAG: &str = "-o";
pub const TOOL_PADDING_FLAG: &str = "-p";

/// Where the sizing report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    /// A file, resolved relative to the project directory.
    File(String),
    /// Standard output.
    Stdout,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    project_dir: PathBuf,
    resources_dir: String,
    fonts_subdir: String,
    manifest_filename: String,
    tool_path: String,
    padding: Option<u32>,
    report: Option<ReportTarget>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from(DEFAULT_PROJECT_DIR),
            resources_dir: DEFAULT_RESOURCES_DIR.to_string(),
            fonts_subdir: DEFAULT_FONTS_SUBDIR.to_string(),
            manifest_filename: DEFAULT_MANIFEST_FILENAME.to_string(),
            tool_path: DEFAULT_TOOL_PATH.to_string(),
            padding: None,
            report: None,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_dir(mut self, project_dir: impl Into<PathBuf>) -> Self {
        self.project_dir = project_dir.into();
        self
    }

    pub fn with_resources_dir(mut self, resources_dir: impl Into<String>) -> Self {
        self.resources_dir = resources_dir.into();
        self
    }

    pub fn with_fonts_subdir(mut self, fonts_subdir: impl Into<String>) -> Self {
        self.fonts_subdir = fonts_subdir.into();
        self
    }

    pub fn with_manifest_filename(mut self, manifest_filename: impl Into<String>) -> Self {
        self.manifest_filename = manifest_filename.into();
        self
    }

    pub fn with_tool_path(mut self, tool_path: impl Into<String>) -> Self {
        self.tool_path = tool_path.into();
        self
    }

    pub fn with_padding(mut self, padding: Option<u32>) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_report(mut self, report: Option<ReportTarget>) -> Self {
        self.report = report;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn fonts_subdir(&self) -> &str {
        &self.fonts_subdir
    }

    pub fn tool_path(&self) -> &str {
        &self.tool_path
    }

    pub fn padding(&self) -> Option<u32> {
        self.padding
    }

    pub fn report(&self) -> Option<&ReportTarget> {
        self.report.as_ref()
    }

    /// Directory holding the source TTF files and the source manifest.
    pub fn resources_fonts_dir(&self) -> PathBuf {
        self.project_dir
            .join(&self.resources_dir)
            .join(&self.fonts_subdir)
    }

    /// Full path to the source manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.resources_fonts_dir().join(&self.manifest_filename)
    }

    pub fn manifest_filename(&self) -> &str {
        &self.manifest_filename
    }

    /// Per-target resources directory, e.g. `<project>/resources-round-454x454`.
    pub fn target_resources_dir(&self, key: &str) -> PathBuf {
        self.project_dir
            .join(format!("{TARGET_RESOURCES_DIR_PREFIX}{key}"))
    }
}
