use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::ProblemRecord;

/// Read a dataset CSV. Columns are matched by header name, so files with a
/// subset of the columns (raw scrape output) parse with the rest defaulted.
pub fn read_csv(path: &str) -> Result<Vec<ProblemRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path))?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        let row: ProblemRecord =
            record.with_context(|| format!("Bad CSV record at line {} of {}", i + 2, path))?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn write_csv(path: &str, rows: &[ProblemRecord]) -> Result<()> {
    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to write {}", path))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_columns_fill_defaults() {
        let data = "id,title\n5,Two Sum\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<ProblemRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, Some(5));
        assert_eq!(rows[0].title, "Two Sum");
        assert_eq!(rows[0].difficulty, "");
        assert_eq!(rows[0].companies, "");
    }

    #[test]
    fn empty_id_cell_is_none() {
        let data = "id,title,url\n,Orphan,https://example.com\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<ProblemRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].title, "Orphan");
    }

    #[test]
    fn round_trip_preserves_rows() {
        let rows = vec![
            ProblemRecord {
                id: Some(1),
                title: "Two Sum".into(),
                difficulty: "Easy".into(),
                url: "https://leetcode.ca/2015-12-31-1-Two-Sum/".into(),
                likes: "42".into(),
                companies: "Google,Amazon".into(),
                similar_questions: "[Three Sum, /problems/3sum]".into(),
                ..Default::default()
            },
            ProblemRecord {
                id: None,
                title: "Untitled".into(),
                ..Default::default()
            },
        ];

        let path = std::env::temp_dir().join("leet_dataset_roundtrip.csv");
        let path = path.to_str().unwrap();
        write_csv(path, &rows).unwrap();
        let back = read_csv(path).unwrap();
        assert_eq!(back, rows);
        let _ = fs::remove_file(path);
    }
}
