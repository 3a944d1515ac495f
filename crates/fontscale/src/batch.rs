//! Grouping of font tasks into rasterizer batches.
//!
//! The external tool accepts a comma-separated size list per invocation, so
//! every task sharing a source TTF and charset is rasterized in one call: M
//! distinct (font, charset) pairs cost M invocations regardless of how many
//! size variants they cover.

use crate::manifest::{FontTask, ScreenConfig};
use crate::scale::calculate_size;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchKey {
    pub ttf_filename: String,
    pub charset: String,
}

/// Groups `tasks` by (TTF, charset) for one target configuration. Each task in
/// a batch is a derived copy carrying its computed target size; insertion
/// order follows manifest order so tool invocations stay deterministic.
pub fn plan_batches(
    tasks: &[FontTask],
    reference: &ScreenConfig,
    target: &ScreenConfig,
) -> IndexMap<BatchKey, Vec<FontTask>> {
    let mut batches: IndexMap<BatchKey, Vec<FontTask>> = IndexMap::new();
    for task in tasks {
        let target_size = calculate_size(task.reference_size, reference, target);
        batches
            .entry(BatchKey {
                ttf_filename: task.ttf_filename.clone(),
                charset: task.charset.clone(),
            })
            .or_default()
            .push(task.with_target_size(target_size));
    }
    batches
}

/// Sorted, deduplicated target sizes of one batch. Two tasks that scale to the
/// same size must not be requested twice.
pub fn unique_sorted_sizes(tasks: &[FontTask]) -> Vec<u32> {
    let mut sizes: Vec<u32> = tasks.iter().filter_map(|t| t.target_size).collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// The `-s` argument: comma-joined sorted unique sizes.
pub fn size_argument(tasks: &[FontTask]) -> String {
    unique_sorted_sizes(tasks)
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
