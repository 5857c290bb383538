//! Dataset normalization: scalar field cleanup, description segmentation,
//! and structural fixes (id recovery, dedup, sort) ahead of the load.

use std::sync::LazyLock;

use itertools::Itertools;
use rayon::prelude::*;
use regex::Regex;
use tracing::warn;

use crate::model::ProblemRecord;
use crate::segment;

static LEADING_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)").unwrap());
static TITLE_ID_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*[-–]\s*").unwrap());
static TRAILING_SLASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/+$").unwrap());

pub struct CleanReport {
    pub rows: Vec<ProblemRecord>,
    pub recovered_ids: usize,
    pub dropped_missing_id: usize,
    pub dropped_duplicates: usize,
}

impl CleanReport {
    pub fn print(&self) {
        println!(
            "Cleaned {} rows ({} ids recovered from titles, {} dropped without id, {} duplicate ids dropped).",
            self.rows.len(),
            self.recovered_ids,
            self.dropped_missing_id,
            self.dropped_duplicates,
        );
    }
}

/// Clean every row, then drop rows that still have no id, collapse
/// duplicate ids to the first occurrence, and sort by id ascending.
pub fn clean_dataset(rows: Vec<ProblemRecord>) -> CleanReport {
    let cleaned: Vec<(ProblemRecord, bool)> = rows.into_par_iter().map(clean_row).collect();
    let recovered_ids = cleaned.iter().filter(|(_, recovered)| *recovered).count();

    let mut dropped_missing_id = 0;
    let with_id: Vec<ProblemRecord> = cleaned
        .into_iter()
        .map(|(row, _)| row)
        .filter(|row| {
            if row.id.is_none() {
                warn!("Dropping row with no id (title {:?})", row.title);
                dropped_missing_id += 1;
            }
            row.id.is_some()
        })
        .collect();

    let before_dedup = with_id.len();
    let rows: Vec<ProblemRecord> = with_id
        .into_iter()
        .unique_by(|row| row.id)
        .sorted_by_key(|row| row.id)
        .collect();
    let dropped_duplicates = before_dedup - rows.len();

    CleanReport {
        rows,
        recovered_ids,
        dropped_missing_id,
        dropped_duplicates,
    }
}

/// Normalize one row's scalars and run the segmenter over its
/// description. Returns whether a missing id was recovered from the
/// title. An id already present is never overwritten.
fn clean_row(mut row: ProblemRecord) -> (ProblemRecord, bool) {
    let mut recovered = false;
    let title = row.title.trim().to_string();

    if row.id.is_none() {
        if let Some(cap) = LEADING_ID.captures(&title) {
            row.id = cap[1].parse().ok();
            recovered = row.id.is_some();
        }
    }

    row.title = TITLE_ID_PREFIX.replace(&title, "").trim().to_string();
    row.url = TRAILING_SLASHES.replace(row.url.trim(), "").into_owned();
    row.description = row.description.split_whitespace().join(" ");

    let seg = segment::segment_description(&row.description);
    row.question = seg.question;
    row.examples = seg.examples;
    row.constraints = seg.constraints;
    row.follow_up = seg.follow_up;

    (row, recovered)
}

// ── Tests ──
