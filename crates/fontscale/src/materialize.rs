//! Per-target output tree preparation, rasterizer invocation, and manifest
//! rewriting.

use crate::batch::{plan_batches, size_argument};
use crate::config::{
    DEFAULT_HINTING, RunConfig, TOOL_CHARSET_FLAG, TOOL_HINTING_FLAG, TOOL_OUTPUT_FLAG,
    TOOL_PADDING_FLAG, TOOL_SIZE_FLAG, TOOL_SOURCE_TTF_FLAG,
};
use crate::error::{Error, Result};
use crate::manifest::{
    FONT_FILENAME_ATTR, FONT_NODE_NAME, JSON_NODE_NAME, Manifest, NODE_ID_ATTR, ScreenConfig,
    XmlElement,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// Generates one target configuration's asset tree: creates the output
/// directories, writes a config-free copy of the manifest, rasterizes every
/// batch, and patches the copy's font filenames to the generated sizes.
///
/// A failed batch aborts the whole run; the partially generated target tree
/// is left in place, not rolled back.
pub fn materialize_target(
    config: &RunConfig,
    manifest: &Manifest,
    target: &ScreenConfig,
) -> Result<()> {
    info!("processing target configuration: {}", target.key());

    let target_fonts_dir = prepare_target_dirs(config, target)?;
    let target_manifest_path = target_fonts_dir.join(config.manifest_filename());

    // Fresh parse per target keeps the source tree and the in-flight output
    // tree fully independent.
    let mut output_root =
        XmlElement::parse(manifest.source_text()).map_err(|e| Error::TargetPreparation {
            message: e.to_string(),
        })?;
    output_root.retain_elements(|el| el.name != JSON_NODE_NAME);
    write_manifest(&output_root, &target_manifest_path)?;

    let resources_fonts_dir = config.resources_fonts_dir();
    for (key, tasks) in plan_batches(manifest.tasks(), manifest.reference(), target) {
        let ttf_path = resources_fonts_dir.join(&key.ttf_filename);
        run_tool(
            config,
            &key.ttf_filename,
            &ttf_path,
            &key.charset,
            &size_argument(&tasks),
            &target_fonts_dir,
        )?;

        for task in &tasks {
            patch_font_filename(&mut output_root, &task.font_id, &task.output_filename());
        }
    }

    write_manifest(&output_root, &target_manifest_path)
}

/// Creates `<project>/resources-{key}/<fonts-subdir>/` if absent. Idempotent.
fn prepare_target_dirs(config: &RunConfig, target: &ScreenConfig) -> Result<PathBuf> {
    let target_fonts_dir = config
        .target_resources_dir(&target.key())
        .join(config.fonts_subdir());
    fs::create_dir_all(&target_fonts_dir).map_err(|source| Error::WriteFile {
        path: target_fonts_dir.display().to_string(),
        source,
    })?;
    Ok(target_fonts_dir)
}

fn write_manifest(root: &XmlElement, path: &Path) -> Result<()> {
    fs::write(path, root.to_xml_string()).map_err(|source| Error::WriteFile {
        path: path.display().to_string(),
        source,
    })
}

fn run_tool(
    config: &RunConfig,
    ttf_filename: &str,
    ttf_path: &Path,
    charset: &str,
    sizes: &str,
    output_dir: &Path,
) -> Result<()> {
    let mut cmd = Command::new(config.tool_path());
    cmd.arg(TOOL_SOURCE_TTF_FLAG)
        .arg(ttf_path)
        .arg(TOOL_CHARSET_FLAG)
        .arg(charset)
        .arg(TOOL_HINTING_FLAG)
        .arg(DEFAULT_HINTING)
        .arg(TOOL_SIZE_FLAG)
        .arg(sizes)
        .arg(TOOL_OUTPUT_FLAG)
        .arg(output_dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(padding) = config.padding() {
        cmd.arg(TOOL_PADDING_FLAG).arg(padding.to_string());
    }

    let status = cmd.status().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ToolNotFound {
                tool: config.tool_path().to_string(),
            }
        } else {
            Error::ToolInvocation {
                ttf: ttf_filename.to_string(),
                message: e.to_string(),
            }
        }
    })?;
    if !status.success() {
        return Err(Error::ToolInvocation {
            ttf: ttf_filename.to_string(),
            message: format!("tool exited with {}", status.code().unwrap_or(-1)),
        });
    }
    Ok(())
}

/// Rewrites the `filename` attribute of every `<font>` node matching
/// `font_id`. Nodes absent from the output tree are skipped silently.
fn patch_font_filename(root: &mut XmlElement, font_id: &str, new_filename: &str) {
    root.for_each_element_mut(&mut |el| {
        if el.name == FONT_NODE_NAME && el.attr(NODE_ID_ATTR) == Some(font_id) {
            el.set_attr(FONT_FILENAME_ATTR, new_filename);
        }
    });
}
