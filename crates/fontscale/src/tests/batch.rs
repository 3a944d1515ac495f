use crate::batch::{BatchKey, plan_batches, size_argument, unique_sorted_sizes};
use crate::manifest::{FontTask, ScreenConfig};

fn task(font_id: &str, font_name: &str, reference_size: u32, charset: &str) -> FontTask {
    FontTask {
        font_id: font_id.to_string(),
        font_name: font_name.to_string(),
        fnt_filename: format!("{font_name}-{reference_size}.fnt"),
        ttf_filename: format!("{font_name}.ttf"),
        reference_size,
        target_size: None,
        charset: charset.to_string(),
    }
}

#[test]
fn shared_ttf_and_charset_collapse_to_one_batch() {
    let reference = ScreenConfig::new(280, 280, "round");
    let target = ScreenConfig::new(454, 454, "round");
    let tasks = vec![
        task("TimeFont", "Ubuntu-Bold", 60, "0-9"),
        task("DateFont", "Ubuntu-Bold", 24, "0-9"),
    ];

    let batches = plan_batches(&tasks, &reference, &target);
    assert_eq!(batches.len(), 1);

    let key = BatchKey {
        ttf_filename: "Ubuntu-Bold.ttf".to_string(),
        charset: "0-9".to_string(),
    };
    let batch = &batches[&key];
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].target_size, Some(97));
    assert_eq!(batch[1].target_size, Some(39));
    assert_eq!(size_argument(batch), "39,97");
}

#[test]
fn differing_charsets_split_batches() {
    let reference = ScreenConfig::new(280, 280, "round");
    let target = ScreenConfig::new(454, 454, "round");
    let tasks = vec![
        task("TimeFont", "Ubuntu-Bold", 60, "0-9"),
        task("LabelFont", "Ubuntu-Bold", 60, "abc"),
    ];

    let batches = plan_batches(&tasks, &reference, &target);
    assert_eq!(batches.len(), 2);
}

#[test]
fn equal_computed_sizes_are_requested_once() {
    let reference = ScreenConfig::new(280, 280, "round");
    let target = ScreenConfig::new(454, 454, "round");
    // Two elements that happen to share a reference size.
    let tasks = vec![
        task("HourFont", "Ubuntu-Bold", 60, "0-9"),
        task("MinuteFont", "Ubuntu-Bold", 60, "0-9"),
    ];

    let batches = plan_batches(&tasks, &reference, &target);
    assert_eq!(batches.len(), 1);
    let batch = batches.values().next().expect("one batch");
    assert_eq!(batch.len(), 2);
    assert_eq!(unique_sorted_sizes(batch), [97]);
    assert_eq!(size_argument(batch), "97");
}

#[test]
fn batches_preserve_manifest_order() {
    let reference = ScreenConfig::new(280, 280, "round");
    let target = ScreenConfig::new(148, 205, "rectangle");
    let tasks = vec![
        task("TimeFont", "Zed-Mono", 60, "0-9"),
        task("DateFont", "Andika", 24, "0-9"),
    ];

    let batches = plan_batches(&tasks, &reference, &target);
    let ttfs: Vec<&str> = batches.keys().map(|k| k.ttf_filename.as_str()).collect();
    assert_eq!(ttfs, ["Zed-Mono.ttf", "Andika.ttf"]);
}
