//! Markdown sizing report: computed font sizes across every configuration,
//! tabulated by element and by resolution.

use crate::config::{ReportTarget, RunConfig};
use crate::error::{Error, Result};
use crate::manifest::{FontTask, Manifest, ScreenConfig};
use crate::scale::calculate_size;
use regex::Regex;
use std::fs;
use std::io::Write as _;
use std::sync::OnceLock;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

fn trailing_font_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)font$").expect("valid regex"))
}

fn camel_boundary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"))
}

/// Element display name from a font id: strip a trailing `font` suffix
/// (case-insensitive), break camelCase boundaries with spaces, uppercase the
/// first letter and leave the remainder as-cased.
///
/// `SingleLineHourFont` → `Single Line Hour`.
pub fn humanize_element_name(font_id: &str) -> String {
    let stripped = trailing_font_suffix_regex().replace(font_id, "");
    let spaced = camel_boundary_regex().replace_all(&stripped, "$1 $2");
    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Font display name from a family: split on `-`, lowercase everything after
/// the first part, join with spaces. `SUSEMono-Bold` → `SUSEMono bold`.
pub fn humanize_font_name(font_name: &str) -> String {
    let mut parts = font_name.split('-');
    let Some(base) = parts.next() else {
        return font_name.to_string();
    };
    let mut out = base.to_string();
    for part in parts {
        out.push(' ');
        out.push_str(&part.to_lowercase());
    }
    out
}

/// Writes the report to its configured destination.
pub fn generate_report(
    config: &RunConfig,
    manifest: &Manifest,
    destination: &ReportTarget,
) -> Result<()> {
    let content = render_report(manifest);
    match destination {
        ReportTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .map_err(|source| Error::ReportWrite {
                    destination: "<stdout>".to_string(),
                    source,
                })
        }
        ReportTarget::File(name) => {
            let path = config.project_dir().join(name);
            info!("generating markdown report: {}", path.display());
            fs::write(&path, content).map_err(|source| Error::ReportWrite {
                destination: path.display().to_string(),
                source,
            })
        }
    }
}

pub fn render_report(manifest: &Manifest) -> String {
    let configs = report_configs(manifest);
    let mut out = String::new();
    out.push_str("# Font sizes by element\n\n");
    render_matrix_table(&mut out, manifest, &configs);
    out.push('\n');
    out.push_str("# Font sizes by resolution\n\n");
    render_resolution_list_table(&mut out, manifest, &configs);
    out
}

/// Reference first, then targets in manifest order, dropping any
/// configuration whose key collides with an earlier one.
fn report_configs(manifest: &Manifest) -> Vec<&ScreenConfig> {
    let mut configs = vec![manifest.reference()];
    let mut keys = vec![manifest.reference().key()];
    for target in manifest.targets() {
        let key = target.key();
        if !keys.contains(&key) {
            keys.push(key);
            configs.push(target);
        }
    }
    configs
}

/// The reference configuration's own size is reported verbatim; recomputing
/// it through the calculator could drift by a rounding unit.
fn size_for(manifest: &Manifest, task: &FontTask, config: &ScreenConfig) -> u32 {
    if config.key() == manifest.reference().key() {
        task.reference_size
    } else {
        calculate_size(task.reference_size, manifest.reference(), config)
    }
}

fn render_matrix_table(out: &mut String, manifest: &Manifest, configs: &[&ScreenConfig]) {
    let mut headers = vec!["Element".to_string(), "Font".to_string()];
    let mut aligns = vec![Align::Left, Align::Left];
    for config in configs {
        headers.push(format!("{}x{}\n{}", config.width, config.height, config.shape));
        aligns.push(Align::Right);
    }

    let mut rows = Vec::new();
    for task in manifest.tasks() {
        let mut row = vec![
            humanize_element_name(&task.font_id),
            humanize_font_name(&task.font_name),
        ];
        for config in configs {
            row.push(size_for(manifest, task, config).to_string());
        }
        rows.push(row);
    }

    render_table(out, &headers, &rows, &aligns);
}

fn render_resolution_list_table(out: &mut String, manifest: &Manifest, configs: &[&ScreenConfig]) {
    let headers = ["Resolution", "Shape", "Element", "Font", "Size"]
        .map(str::to_string)
        .to_vec();
    let aligns = [Align::Right, Align::Left, Align::Left, Align::Left, Align::Right];

    let mut entries = Vec::new();
    for config in configs {
        for task in manifest.tasks() {
            let element = humanize_element_name(&task.font_id);
            let row = vec![
                format!("{} x {}", config.width, config.height),
                config.shape.clone(),
                element.clone(),
                humanize_font_name(&task.font_name),
                size_for(manifest, task, config).to_string(),
            ];
            entries.push((config.pixel_area(), element, row));
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let rows: Vec<Vec<String>> = entries.into_iter().map(|(_, _, row)| row).collect();
    render_table(out, &headers, &rows, &aligns);
}

/// Markdown table with aligned columns. Headers may span multiple lines
/// (split on `\n`); shorter headers are top-padded with blank lines so every
/// header shares the same line count, and header lines are centered. Column
/// widths are the max of header and cell widths, floored at 3 so the
/// alignment separators always fit.
pub fn render_table(out: &mut String, headers: &[String], rows: &[Vec<String>], aligns: &[Align]) {
    let header_lines: Vec<Vec<&str>> = headers.iter().map(|h| h.split('\n').collect()).collect();
    let line_count = header_lines.iter().map(Vec::len).max().unwrap_or(1);

    let mut widths: Vec<usize> = header_lines
        .iter()
        .map(|lines| lines.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    for width in &mut widths {
        *width = (*width).max(3);
    }

    for line_idx in 0..line_count {
        let cells: Vec<String> = header_lines
            .iter()
            .enumerate()
            .map(|(i, lines)| {
                let pad = line_count - lines.len();
                let text = if line_idx < pad { "" } else { lines[line_idx - pad] };
                format!("{text:^width$}", width = widths[i])
            })
            .collect();
        push_row(out, &cells);
    }

    let separators: Vec<String> = widths
        .iter()
        .zip(aligns)
        .map(|(width, align)| match align {
            Align::Left => format!(":{}", "-".repeat(width - 1)),
            Align::Right => format!("{}:", "-".repeat(width - 1)),
        })
        .collect();
    push_row(out, &separators);

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| match aligns[i] {
                Align::Left => format!("{cell:<width$}", width = widths[i]),
                Align::Right => format!("{cell:>width$}", width = widths[i]),
            })
            .collect();
        push_row(out, &cells);
    }
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push_str("| ");
    out.push_str(&cells.join(" | "));
    out.push_str(" |\n");
}
