use crate::error::Error;
use crate::manifest::{Manifest, ScreenConfig, XmlElement, find_json_block};
use crate::tests::SAMPLE_MANIFEST;
use std::fs;
use std::path::Path;

fn parse_sample() -> Manifest {
    Manifest::parse(SAMPLE_MANIFEST, Path::new(".")).expect("sample manifest parses")
}

#[test]
fn parses_screen_configurations() {
    let manifest = parse_sample();
    assert_eq!(*manifest.reference(), ScreenConfig::new(280, 280, "round"));
    assert_eq!(
        manifest.targets(),
        [
            ScreenConfig::new(454, 454, "round"),
            ScreenConfig::new(148, 205, "rectangle"),
        ]
    );
    assert_eq!(manifest.reference().key(), "round-280x280");
    assert_eq!(manifest.targets()[1].key(), "rectangle-148x205");
}

#[test]
fn parses_font_tasks_with_charset_resolution() {
    let manifest = parse_sample();
    let tasks = manifest.tasks();
    assert_eq!(tasks.len(), 3);

    let time = &tasks[0];
    assert_eq!(time.font_id, "TimeFont");
    assert_eq!(time.font_name, "Ubuntu-Bold");
    assert_eq!(time.fnt_filename, "Ubuntu-Bold-60.fnt");
    assert_eq!(time.ttf_filename, "Ubuntu-Bold.ttf");
    assert_eq!(time.reference_size, 60);
    assert_eq!(time.target_size, None);
    // DefaultCharset block applies where FontCharsets has no entry.
    assert_eq!(time.charset, "0-9");

    let heart_rate = &tasks[2];
    assert_eq!(heart_rate.font_name, "Roboto-Condensed");
    assert_eq!(heart_rate.charset, "0123456789");
}

#[test]
fn with_target_size_leaves_the_original_untouched() {
    let manifest = parse_sample();
    let task = &manifest.tasks()[0];
    let derived = task.with_target_size(97);
    assert_eq!(derived.target_size, Some(97));
    assert_eq!(derived.output_filename(), "Ubuntu-Bold-97.fnt");
    assert_eq!(task.target_size, None);
}

#[test]
fn drops_font_node_with_unparseable_filename() {
    let text = r#"<resources>
        <font id="BadFont" filename="badname.fnt" />
        <font id="TimeFont" filename="Ubuntu-Bold-60.fnt" />
        <jsonData id="ScreenResolutions">{
            "reference": { "resolution": [280, 280], "shape": "round" },
            "targets": [{ "resolution": [454, 454], "shape": "round" }]
        }</jsonData>
    </resources>"#;
    let manifest = Manifest::parse(text, Path::new(".")).expect("bad filename is not fatal");
    assert_eq!(manifest.tasks().len(), 1);
    assert_eq!(manifest.tasks()[0].font_id, "TimeFont");
}

#[test]
fn missing_screen_resolutions_block_fails() {
    let text = r#"<resources>
        <font id="TimeFont" filename="Ubuntu-Bold-60.fnt" />
    </resources>"#;
    let err = Manifest::parse(text, Path::new(".")).unwrap_err();
    assert!(matches!(err, Error::ConfigMissing { id: "ScreenResolutions" }));
}

#[test]
fn empty_targets_fail() {
    let text = r#"<resources>
        <jsonData id="ScreenResolutions">{
            "reference": { "resolution": [280, 280], "shape": "round" },
            "targets": []
        }</jsonData>
    </resources>"#;
    let err = Manifest::parse(text, Path::new(".")).unwrap_err();
    assert!(matches!(err, Error::ConfigInvalid { .. }));
}

#[test]
fn zero_dimension_fails() {
    let text = r#"<resources>
        <jsonData id="ScreenResolutions">{
            "reference": { "resolution": [280, 0], "shape": "round" },
            "targets": [{ "resolution": [454, 454], "shape": "round" }]
        }</jsonData>
    </resources>"#;
    let err = Manifest::parse(text, Path::new(".")).unwrap_err();
    assert!(matches!(err, Error::ConfigInvalid { .. }));
}

#[test]
fn malformed_manifest_xml_fails() {
    let err = Manifest::parse("<resources><font</resources>", Path::new(".")).unwrap_err();
    assert!(matches!(err, Error::ManifestParse(_)));
}

#[test]
fn falls_back_to_builtin_default_charset() {
    let text = r#"<resources>
        <font id="TimeFont" filename="Ubuntu-Bold-60.fnt" />
        <jsonData id="ScreenResolutions">{
            "reference": { "resolution": [280, 280], "shape": "round" },
            "targets": [{ "resolution": [454, 454], "shape": "round" }]
        }</jsonData>
    </resources>"#;
    let manifest = Manifest::parse(text, Path::new(".")).unwrap();
    assert_eq!(manifest.tasks()[0].charset, "0123456789:");
}

#[test]
fn coerces_non_string_default_charset() {
    let text = r#"<resources>
        <font id="TimeFont" filename="Ubuntu-Bold-60.fnt" />
        <jsonData id="ScreenResolutions">{
            "reference": { "resolution": [280, 280], "shape": "round" },
            "targets": [{ "resolution": [454, 454], "shape": "round" }]
        }</jsonData>
        <jsonData id="DefaultCharset">12345</jsonData>
    </resources>"#;
    let manifest = Manifest::parse(text, Path::new(".")).unwrap();
    assert_eq!(manifest.tasks()[0].charset, "12345");
}

#[test]
fn resolves_external_configuration_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("screens.json"),
        r#"{
            "reference": { "resolution": [280, 280], "shape": "round" },
            "targets": [{ "resolution": [148, 205], "shape": "rectangle" }]
        }"#,
    )
    .expect("write external config");

    let text = r#"<resources>
        <font id="TimeFont" filename="Ubuntu-Bold-60.fnt" />
        <jsonData id="ScreenResolutions" filename="screens.json" />
    </resources>"#;
    let manifest = Manifest::parse(text, dir.path()).unwrap();
    assert_eq!(
        manifest.targets(),
        [ScreenConfig::new(148, 205, "rectangle")]
    );
}

#[test]
fn missing_external_configuration_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let text = r#"<resources>
        <jsonData id="ScreenResolutions" filename="screens.json" />
    </resources>"#;
    let err = Manifest::parse(text, dir.path()).unwrap_err();
    assert!(matches!(err, Error::ExternalConfigNotFound { .. }));
}

#[test]
fn load_reports_missing_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Manifest::load(&dir.path().join("fonts.xml")).unwrap_err();
    assert!(matches!(err, Error::ManifestNotFound { .. }));
}

#[test]
fn stripped_serialization_drops_configuration_blocks() {
    let mut root = XmlElement::parse(SAMPLE_MANIFEST).expect("well-formed");
    assert!(find_json_block(&root, "ScreenResolutions").is_some());

    root.retain_elements(|el| el.name != "jsonData");
    let serialized = root.to_xml_string();

    assert!(serialized.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(!serialized.contains("jsonData"));
    // 4-space indentation, self-closing font nodes.
    assert!(serialized.contains("    <fonts>\n"));
    assert!(serialized.contains("        <font id=\"TimeFont\" filename=\"Ubuntu-Bold-60.fnt\" />\n"));
}

#[test]
fn serialization_escapes_attribute_values() {
    let mut root = XmlElement::parse("<resources />").expect("well-formed");
    root.set_attr("charset", "a<b>&\"c\"");
    assert!(
        root.to_xml_string()
            .contains("charset=\"a&lt;b&gt;&amp;&quot;c&quot;\"")
    );
}
