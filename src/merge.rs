use itertools::Itertools;
use tracing::info;

use crate::model::ProblemRecord;

pub struct MergeReport {
    pub appended: usize,
    pub total: usize,
}

/// Append newly scraped rows onto an existing dataset. With a `min_id`
/// floor only new rows with `id >= min_id` qualify (id-less new rows never
/// pass a floor). The merged set is sorted by id ascending, rows without
/// an id last. Duplicate ids are left for the clean stage to collapse.
pub fn merge_datasets(
    existing: Vec<ProblemRecord>,
    new: Vec<ProblemRecord>,
    min_id: Option<i64>,
) -> (Vec<ProblemRecord>, MergeReport) {
    let appended: Vec<ProblemRecord> = new
        .into_iter()
        .filter(|row| match min_id {
            Some(floor) => row.id.is_some_and(|id| id >= floor),
            None => true,
        })
        .collect();
    info!("Appending {} new rows", appended.len());

    let report_appended = appended.len();
    let merged: Vec<ProblemRecord> = existing
        .into_iter()
        .chain(appended)
        .sorted_by_key(|row| (row.id.is_none(), row.id))
        .collect();

    let report = MergeReport {
        appended: report_appended,
        total: merged.len(),
    };
    (merged, report)
}

// ── Tests ──
