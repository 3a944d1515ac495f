//! Manifest parsing: the owned XML tree, embedded JSON configuration blocks,
//! and the typed font task list.
//!
//! The manifest is an XML document carrying `<font>` definitions plus zero or
//! more `<jsonData>` configuration blocks whose content is either inline JSON
//! text or, when the node has a `filename` attribute, JSON loaded from a file
//! next to the manifest.

use crate::config::DEFAULT_CHARSET;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

pub const FONT_NODE_NAME: &str = "font";
pub const JSON_NODE_NAME: &str = "jsonData";
pub const NODE_ID_ATTR: &str = "id";
pub const FONT_FILENAME_ATTR: &str = "filename";
pub const EXTERNAL_FILE_ATTR: &str = "filename";

pub const SCREEN_RESOLUTIONS_ID: &str = "ScreenResolutions";
pub const DEFAULT_CHARSET_ID: &str = "DefaultCharset";
pub const FONT_CHARSETS_ID: &str = "FontCharsets";

fn fnt_filename_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*)-(\d+)\.fnt$").expect("valid regex"))
}

/// One physical/logical screen target.
///
/// Two configurations are considered the same target iff their [`key`]s match;
/// equality derives from the same fields the key is built from.
///
/// [`key`]: ScreenConfig::key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub shape: String,
}

impl ScreenConfig {
    pub fn new(width: u32, height: u32, shape: impl Into<String>) -> Self {
        Self {
            width,
            height,
            shape: shape.into(),
        }
    }

    /// Identity key, also used for per-target directory naming.
    pub fn key(&self) -> String {
        format!("{}-{}x{}", self.shape, self.width, self.height)
    }

    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// One font-size variant to be generated.
///
/// Created by the loader with `target_size` unset; per-target copies are
/// derived with [`FontTask::with_target_size`] so the original list is never
/// mutated across target iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontTask {
    pub font_id: String,
    /// Font family, parsed from the `.fnt` filename (e.g. `Ubuntu-Bold`).
    pub font_name: String,
    /// Rasterized filename as currently recorded in the manifest.
    pub fnt_filename: String,
    /// Source TrueType filename, derived as `{font_name}.ttf`.
    pub ttf_filename: String,
    pub reference_size: u32,
    pub target_size: Option<u32>,
    pub charset: String,
}

impl FontTask {
    pub fn with_target_size(&self, target_size: u32) -> Self {
        Self {
            target_size: Some(target_size),
            ..self.clone()
        }
    }

    /// Output filename for the computed target size, e.g. `Ubuntu-Bold-97.fnt`.
    /// Falls back to the reference size while no target size is set.
    pub fn output_filename(&self) -> String {
        let size = self.target_size.unwrap_or(self.reference_size);
        format!("{}-{}.fnt", self.font_name, size)
    }
}

/// An owned XML element tree.
///
/// roxmltree only reads; the manifest rewriter needs to strip and patch nodes
/// and serialize the result, so the document is lifted into this owned form
/// first. Attribute order is preserved so rewritten manifests diff cleanly
/// against their sources.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attrs: IndexMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn parse(text: &str) -> std::result::Result<XmlElement, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> XmlElement {
        let mut attrs = IndexMap::new();
        for attr in node.attributes() {
            attrs.insert(attr.name().to_string(), attr.value().to_string());
        }

        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }

        XmlElement {
            name: node.tag_name().name().to_string(),
            attrs,
            // Whitespace-only text is indentation from the source document,
            // not content; the serializer re-indents from scratch.
            text: if text.trim().is_empty() { None } else { Some(text) },
            children,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|v| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    /// Drops every element (at any depth) for which `keep` returns false.
    /// The root itself is never dropped.
    pub fn retain_elements<F>(&mut self, keep: F)
    where
        F: Fn(&XmlElement) -> bool + Copy,
    {
        self.children.retain(|child| keep(child));
        for child in &mut self.children {
            child.retain_elements(keep);
        }
    }

    pub fn for_each_element<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a XmlElement),
    {
        f(self);
        for child in &self.children {
            child.for_each_element(f);
        }
    }

    pub fn for_each_element_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut XmlElement),
    {
        f(self);
        for child in &mut self.children {
            child.for_each_element_mut(f);
        }
    }

    /// Serializes the tree with an XML declaration and 4-space indentation.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_element(&mut out, 0);
        out
    }

    fn write_element(&self, out: &mut String, depth: usize) {
        let indent = "    ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        if self.children.is_empty() && self.text.is_none() {
            out.push_str(" />\n");
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text.trim()));
        }
        if !self.children.is_empty() {
            out.push('\n');
            for child in &self.children {
                child.write_element(out, depth + 1);
            }
            out.push_str(&indent);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

pub fn find_json_block<'a>(root: &'a XmlElement, id: &str) -> Option<&'a XmlElement> {
    let mut found = None;
    root.for_each_element(&mut |el: &'a XmlElement| {
        if found.is_none() && el.name == JSON_NODE_NAME && el.attr(NODE_ID_ATTR) == Some(id) {
            found = Some(el);
        }
    });
    found
}

fn font_nodes(root: &XmlElement) -> Vec<&XmlElement> {
    let mut nodes = Vec::new();
    root.for_each_element(&mut |el| {
        if el.name == FONT_NODE_NAME {
            nodes.push(el);
        }
    });
    nodes
}

/// Resolves a `<jsonData>` block to its JSON value: inline element text, or —
/// when the node carries a `filename` attribute — the content of that file
/// resolved relative to the manifest's directory. Shared by every recognized
/// block identifier.
fn resolve_block_json(
    block: &XmlElement,
    id: &'static str,
    base_dir: &Path,
) -> Result<serde_json::Value> {
    let raw = match block.attr(EXTERNAL_FILE_ATTR) {
        Some(filename) => {
            let path = base_dir.join(filename);
            if !path.exists() {
                return Err(Error::ExternalConfigNotFound {
                    id,
                    path: path.display().to_string(),
                });
            }
            fs::read_to_string(&path).map_err(|source| Error::ReadFile {
                path: path.display().to_string(),
                source,
            })?
        }
        None => block.text.clone().unwrap_or_default(),
    };

    if raw.trim().is_empty() {
        return Err(Error::ConfigInvalid {
            id,
            message: "empty JSON block".to_string(),
        });
    }
    serde_json::from_str(&raw).map_err(|e| Error::ConfigInvalid {
        id,
        message: e.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct ScreenConfigJson {
    resolution: [u32; 2],
    shape: String,
}

impl ScreenConfigJson {
    fn into_screen_config(self, id: &'static str) -> Result<ScreenConfig> {
        let [width, height] = self.resolution;
        if width == 0 || height == 0 {
            return Err(Error::ConfigInvalid {
                id,
                message: format!(
                    "resolution [{width}, {height}] must have positive width and height"
                ),
            });
        }
        Ok(ScreenConfig::new(width, height, self.shape))
    }
}

#[derive(Debug, Deserialize)]
struct ScreenResolutionsJson {
    reference: ScreenConfigJson,
    targets: Vec<ScreenConfigJson>,
}

#[derive(Debug, Deserialize)]
struct FontCharsetJson {
    #[serde(rename = "fontId")]
    font_id: String,
    #[serde(rename = "fontCharset")]
    font_charset: String,
}

/// The parsed manifest: reference + target screen configurations and the
/// ordered font task list, plus the source text for per-target re-parsing.
#[derive(Debug, Clone)]
pub struct Manifest {
    reference: ScreenConfig,
    targets: Vec<ScreenConfig>,
    tasks: Vec<FontTask>,
    source_text: String,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Manifest> {
        if !path.exists() {
            return Err(Error::ManifestNotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::parse(&text, base_dir)
    }

    /// Parses manifest text. `base_dir` resolves external `<jsonData filename>`
    /// references.
    pub fn parse(text: &str, base_dir: &Path) -> Result<Manifest> {
        let root = XmlElement::parse(text)?;

        let resolutions_block = find_json_block(&root, SCREEN_RESOLUTIONS_ID).ok_or(
            Error::ConfigMissing {
                id: SCREEN_RESOLUTIONS_ID,
            },
        )?;
        let value = resolve_block_json(resolutions_block, SCREEN_RESOLUTIONS_ID, base_dir)?;
        let resolutions: ScreenResolutionsJson =
            serde_json::from_value(value).map_err(|e| Error::ConfigInvalid {
                id: SCREEN_RESOLUTIONS_ID,
                message: e.to_string(),
            })?;
        let reference = resolutions.reference.into_screen_config(SCREEN_RESOLUTIONS_ID)?;
        if resolutions.targets.is_empty() {
            return Err(Error::ConfigInvalid {
                id: SCREEN_RESOLUTIONS_ID,
                message: "targets must not be empty".to_string(),
            });
        }
        let targets = resolutions
            .targets
            .into_iter()
            .map(|t| t.into_screen_config(SCREEN_RESOLUTIONS_ID))
            .collect::<Result<Vec<_>>>()?;

        let default_charset = match find_json_block(&root, DEFAULT_CHARSET_ID) {
            Some(block) => {
                json_value_to_string(resolve_block_json(block, DEFAULT_CHARSET_ID, base_dir)?)
            }
            None => DEFAULT_CHARSET.to_string(),
        };

        let charset_map: IndexMap<String, String> = match find_json_block(&root, FONT_CHARSETS_ID) {
            Some(block) => {
                let value = resolve_block_json(block, FONT_CHARSETS_ID, base_dir)?;
                let entries: Vec<FontCharsetJson> =
                    serde_json::from_value(value).map_err(|e| Error::ConfigInvalid {
                        id: FONT_CHARSETS_ID,
                        message: e.to_string(),
                    })?;
                entries
                    .into_iter()
                    .map(|e| (e.font_id, e.font_charset))
                    .collect()
            }
            None => {
                warn!("<jsonData id='{FONT_CHARSETS_ID}'> not found");
                IndexMap::new()
            }
        };

        let mut tasks = Vec::new();
        for node in font_nodes(&root) {
            let Some(font_id) = node.attr(NODE_ID_ATTR) else {
                warn!("skipping <{FONT_NODE_NAME}> without an '{NODE_ID_ATTR}' attribute");
                continue;
            };
            let Some(fnt_filename) = node.attr(FONT_FILENAME_ATTR) else {
                warn!("skipping '{font_id}' without a '{FONT_FILENAME_ATTR}' attribute");
                continue;
            };
            let Some(caps) = fnt_filename_regex().captures(fnt_filename) else {
                warn!("skipping {fnt_filename} (format '<font-name>-<font-size>.fnt' required)");
                continue;
            };
            let font_name = caps[1].to_string();
            let Ok(reference_size) = caps[2].parse::<u32>() else {
                warn!("skipping {fnt_filename} (size out of range)");
                continue;
            };

            let charset = charset_map
                .get(font_id)
                .cloned()
                .unwrap_or_else(|| default_charset.clone());

            tasks.push(FontTask {
                font_id: font_id.to_string(),
                ttf_filename: format!("{font_name}.ttf"),
                font_name,
                fnt_filename: fnt_filename.to_string(),
                reference_size,
                target_size: None,
                charset,
            });
        }

        Ok(Manifest {
            reference,
            targets,
            tasks,
            source_text: text.to_string(),
        })
    }

    pub fn reference(&self) -> &ScreenConfig {
        &self.reference
    }

    pub fn targets(&self) -> &[ScreenConfig] {
        &self.targets
    }

    pub fn tasks(&self) -> &[FontTask] {
        &self.tasks
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

fn json_value_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
